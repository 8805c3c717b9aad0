//! Class special abilities.
//!
//! Abilities run once per entry into the Ability state. Their lasting
//! consequences are timed effects, placed charges, or deferred team effects;
//! an ability never mutates another agent directly.

use glam::Vec3;
use tracing::{info, warn};

use super::{Agent, AgentClass, AgentState, EffectKind, Insertion, TimedEffect};
use crate::config::SquadConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::events::SquadEvent;
use crate::state::AgentId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    #[strum(serialize = "Adrenaline Rush")]
    AdrenalineRush,
    #[strum(serialize = "Sniper Mode")]
    SniperMode,
    #[strum(serialize = "Explosive Charge")]
    ExplosiveCharge,
    #[strum(serialize = "System Override")]
    SystemOverride,
    #[strum(serialize = "Tactical Command")]
    TacticalCommand,
    #[strum(serialize = "Field Support")]
    FieldSupport,
}

impl AbilityKind {
    pub const fn for_class(class: AgentClass) -> Self {
        match class {
            AgentClass::Assault => AbilityKind::AdrenalineRush,
            AgentClass::Sniper => AbilityKind::SniperMode,
            AgentClass::Demolitions => AbilityKind::ExplosiveCharge,
            AgentClass::Hacker => AbilityKind::SystemOverride,
            AgentClass::Leader => AbilityKind::TacticalCommand,
            AgentClass::Medic => AbilityKind::FieldSupport,
        }
    }
}

/// Rejected ability requests. State is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("{ability} has no uses left")]
    Exhausted { ability: AbilityKind },

    #[error("{ability} is already active")]
    AlreadyActive { ability: AbilityKind },

    #[error("{ability} is at capacity ({max} active)")]
    AtCapacity { ability: AbilityKind, max: usize },

    #[error("agent is down")]
    AgentDown,
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AbilityError::AgentDown => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AbilityError::Exhausted { .. } => "ABILITY_EXHAUSTED",
            AbilityError::AlreadyActive { .. } => "ABILITY_ALREADY_ACTIVE",
            AbilityError::AtCapacity { .. } => "ABILITY_AT_CAPACITY",
            AbilityError::AgentDown => "ABILITY_AGENT_DOWN",
        }
    }
}

/// An armed explosive waiting for its fuse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedCharge {
    pub position: Vec3,
    pub detonates_at: f32,
}

impl PlacedCharge {
    /// Distance ahead of the agent a charge is placed at.
    pub const PLACEMENT_DISTANCE: f32 = 2.0;
    pub const FUSE: f32 = 5.0;
    pub const RADIUS: f32 = 10.0;
    pub const BASE_DAMAGE: f32 = 100.0;
    pub const DEMOLITION_BONUS: f32 = 1.5;

    pub const fn damage() -> f32 {
        Self::BASE_DAMAGE * Self::DEMOLITION_BONUS
    }
}

/// Cross-agent effect queued during a tick and resolved at the next tick
/// boundary by the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredEffect {
    /// Speed boost for every live member.
    TeamBoost { source: AgentId },
}

/// Per-agent ability bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityKit {
    kind: AbilityKind,
    explosives: u32,
    charges: Vec<PlacedCharge>,
}

impl AbilityKit {
    pub fn for_class(class: AgentClass) -> Self {
        let kind = AbilityKind::for_class(class);
        let explosives = match kind {
            AbilityKind::ExplosiveCharge => SquadConfig::MAX_EXPLOSIVES,
            _ => 0,
        };
        Self {
            kind,
            explosives,
            charges: Vec::new(),
        }
    }

    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    pub fn explosives_left(&self) -> u32 {
        self.explosives
    }

    pub fn armed_charges(&self) -> &[PlacedCharge] {
        &self.charges
    }

    fn place_charge(&mut self, position: Vec3, now: f32) -> Result<PlacedCharge, AbilityError> {
        if self.explosives == 0 {
            return Err(AbilityError::Exhausted { ability: self.kind });
        }
        self.explosives -= 1;
        let charge = PlacedCharge {
            position,
            detonates_at: now + PlacedCharge::FUSE,
        };
        self.charges.push(charge);
        Ok(charge)
    }

    /// Disarms every charge that has not gone off yet.
    pub(crate) fn abandon_charges(&mut self) {
        self.charges.clear();
    }

    /// Removes and returns charges whose fuse has run out.
    pub(crate) fn take_due_charges(&mut self, now: f32) -> Vec<PlacedCharge> {
        let (due, armed) = self
            .charges
            .drain(..)
            .partition(|c| now >= c.detonates_at);
        self.charges = armed;
        due
    }
}

impl Agent {
    /// Executes this agent's class ability.
    ///
    /// # Errors
    ///
    /// Returns an [`AbilityError`] when the request cannot be honored; the
    /// agent is left unchanged.
    pub fn use_ability(&mut self, now: f32) -> Result<AbilityKind, AbilityError> {
        if !self.is_alive() {
            return Err(AbilityError::AgentDown);
        }

        let ability = self.kit.kind();
        match ability {
            AbilityKind::AdrenalineRush => {
                if self.effects.has(EffectKind::AdrenalineRush) {
                    return Err(AbilityError::AlreadyActive { ability });
                }
                self.apply_effect(TimedEffect::timed(
                    EffectKind::AdrenalineRush,
                    now,
                    EffectKind::ADRENALINE_DURATION,
                ));
            }
            AbilityKind::SniperMode => {
                if self.effects.has(EffectKind::SniperMode) {
                    let removed = self.effects.remove(EffectKind::SniperMode);
                    self.end_effects(removed, false);
                } else {
                    self.apply_effect(TimedEffect::toggle(EffectKind::SniperMode, now));
                }
            }
            AbilityKind::ExplosiveCharge => {
                let position =
                    self.pose.position + self.pose.forward() * PlacedCharge::PLACEMENT_DISTANCE;
                let charge = self.kit.place_charge(position, now)?;
                self.emit(SquadEvent::ChargePlaced {
                    agent: self.id,
                    position: charge.position,
                    detonates_at: charge.detonates_at,
                });
            }
            AbilityKind::SystemOverride => {
                let active = self.effects.count(EffectKind::SystemHack);
                if active >= SquadConfig::MAX_ACTIVE_HACKS {
                    return Err(AbilityError::AtCapacity {
                        ability,
                        max: SquadConfig::MAX_ACTIVE_HACKS,
                    });
                }
                let hack = TimedEffect::timed(EffectKind::SystemHack, now, EffectKind::HACK_DURATION)
                    .bound_to(AgentState::Ability);
                if self.apply_effect(hack) == Insertion::Rejected {
                    return Err(AbilityError::AtCapacity {
                        ability,
                        max: SquadConfig::MAX_ACTIVE_HACKS,
                    });
                }
            }
            AbilityKind::TacticalCommand => {
                self.deferred.push(DeferredEffect::TeamBoost { source: self.id });
            }
            AbilityKind::FieldSupport => {}
        }

        info!(
            target: "squad::agent",
            agent = %self.id,
            ability = %ability,
            "ability used"
        );
        self.emit(SquadEvent::AbilityUsed {
            agent: self.id,
            ability,
        });
        Ok(ability)
    }

    /// Runs the pending ability for the current Ability-state entry.
    pub(crate) fn run_pending_ability(&mut self, now: f32) {
        if !self.ability_pending {
            return;
        }
        self.ability_pending = false;
        if let Err(reason) = self.use_ability(now) {
            warn!(
                target: "squad::agent",
                agent = %self.id,
                code = reason.error_code(),
                "ability rejected: {reason}"
            );
            self.emit(SquadEvent::AbilityRejected {
                agent: self.id,
                reason,
            });
        }
    }

    pub(crate) fn detonate_due_charges(&mut self, now: f32) {
        for charge in self.kit.take_due_charges(now) {
            info!(
                target: "squad::agent",
                agent = %self.id,
                x = charge.position.x,
                z = charge.position.z,
                "charge detonated"
            );
            self.emit(SquadEvent::ChargeDetonated {
                agent: self.id,
                position: charge.position,
                radius: PlacedCharge::RADIUS,
                damage: PlacedCharge::damage(),
            });
        }
    }
}
