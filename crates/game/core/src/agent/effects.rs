//! Timed effects on an agent.
//!
//! Effects are never applied by mutating stats in place. Stats are derived
//! from the base profile and the set of active effects (see
//! [`StatBlock`](super::StatBlock)), so inserting an effect applies it and
//! removing it reverts it, exactly once, with nothing to restore.
//!
//! # Time-based Duration
//!
//! Effects store `expires_at` in simulation seconds and are removed when
//! `now >= expires_at`. Toggle effects have no expiry and last until removed.

use arrayvec::ArrayVec;

use super::AgentState;
use crate::config::SquadConfig;

/// Types of timed effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Assault burst: faster and stronger.
    AdrenalineRush,
    /// Team-wide speed boost from a tactical command.
    TeamBoost,
    /// Sniper stance: better accuracy and critical chance.
    SniperMode,
    /// One in-flight hack; completes on expiry.
    SystemHack,
}

/// Multiplicative stat modifiers contributed by one effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    pub move_speed: f32,
    pub strength: f32,
    pub accuracy: f32,
    pub critical_chance: f32,
}

impl Modifiers {
    pub const NONE: Self = Self {
        move_speed: 1.0,
        strength: 1.0,
        accuracy: 1.0,
        critical_chance: 1.0,
    };
}

impl EffectKind {
    pub const ADRENALINE_SPEED: f32 = 1.5;
    pub const ADRENALINE_STRENGTH: f32 = 1.3;
    pub const ADRENALINE_DURATION: f32 = 15.0;
    pub const TEAM_BOOST_SPEED: f32 = 1.2;
    pub const TEAM_BOOST_DURATION: f32 = 10.0;
    pub const SNIPER_ACCURACY: f32 = 1.2;
    pub const SNIPER_CRITICAL: f32 = 1.5;
    /// Base hack time divided by hack speed (3 s / 1.5).
    pub const HACK_DURATION: f32 = 3.0 / 1.5;

    pub const fn modifiers(self) -> Modifiers {
        match self {
            EffectKind::AdrenalineRush => Modifiers {
                move_speed: Self::ADRENALINE_SPEED,
                strength: Self::ADRENALINE_STRENGTH,
                ..Modifiers::NONE
            },
            EffectKind::TeamBoost => Modifiers {
                move_speed: Self::TEAM_BOOST_SPEED,
                ..Modifiers::NONE
            },
            EffectKind::SniperMode => Modifiers {
                accuracy: Self::SNIPER_ACCURACY,
                critical_chance: Self::SNIPER_CRITICAL,
                ..Modifiers::NONE
            },
            EffectKind::SystemHack => Modifiers::NONE,
        }
    }

    /// Stacking effects keep one instance per insertion; all others refresh
    /// the existing instance.
    pub const fn stacks(self) -> bool {
        matches!(self, EffectKind::SystemHack)
    }
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub started_at: f32,
    /// `None` for toggles that last until removed.
    pub expires_at: Option<f32>,
    /// State whose exit cancels this effect.
    pub bound_to: Option<AgentState>,
}

impl TimedEffect {
    pub fn timed(kind: EffectKind, now: f32, duration: f32) -> Self {
        Self {
            kind,
            started_at: now,
            expires_at: Some(now + duration),
            bound_to: None,
        }
    }

    pub fn toggle(kind: EffectKind, now: f32) -> Self {
        Self {
            kind,
            started_at: now,
            expires_at: None,
            bound_to: None,
        }
    }

    #[must_use]
    pub fn bound_to(mut self, state: AgentState) -> Self {
        self.bound_to = Some(state);
        self
    }

    #[inline]
    pub fn is_expired(&self, now: f32) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }
}

/// Result of inserting an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Applied,
    /// A non-stacking effect was already active; its expiry was extended.
    Refreshed,
    /// The effect set is full.
    Rejected,
}

pub type RemovedEffects = ArrayVec<TimedEffect, { SquadConfig::MAX_ACTIVE_EFFECTS }>;

/// Active effects on an agent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveEffects {
    effects: ArrayVec<TimedEffect, { SquadConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect.
    ///
    /// A non-stacking effect that is already active is not applied twice: it
    /// keeps its original start and extends to the later expiry.
    pub fn insert(&mut self, effect: TimedEffect) -> Insertion {
        if !effect.kind.stacks()
            && let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind)
        {
            existing.expires_at = match (existing.expires_at, effect.expires_at) {
                (Some(a), Some(b)) => Some(a.max(b)),
                _ => None,
            };
            return Insertion::Refreshed;
        }

        match self.effects.try_push(effect) {
            Ok(()) => Insertion::Applied,
            Err(_) => Insertion::Rejected,
        }
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    pub fn has_bound_to(&self, state: AgentState) -> bool {
        self.effects.iter().any(|e| e.bound_to == Some(state))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Removes every instance of `kind`.
    pub fn remove(&mut self, kind: EffectKind) -> RemovedEffects {
        self.drain_where(|e| e.kind == kind)
    }

    /// Removes effects whose expiry has passed.
    pub fn expire(&mut self, now: f32) -> RemovedEffects {
        self.drain_where(|e| e.is_expired(now))
    }

    /// Removes effects bound to `state`.
    pub fn cancel_bound(&mut self, state: AgentState) -> RemovedEffects {
        self.drain_where(|e| e.bound_to == Some(state))
    }

    pub fn cancel_all(&mut self) -> RemovedEffects {
        self.drain_where(|_| true)
    }

    /// Product of every active effect's modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.effects
            .iter()
            .map(|e| e.kind.modifiers())
            .fold(Modifiers::NONE, |acc, m| Modifiers {
                move_speed: acc.move_speed * m.move_speed,
                strength: acc.strength * m.strength,
                accuracy: acc.accuracy * m.accuracy,
                critical_chance: acc.critical_chance * m.critical_chance,
            })
    }

    fn drain_where(&mut self, mut pred: impl FnMut(&TimedEffect) -> bool) -> RemovedEffects {
        let mut removed = RemovedEffects::new();
        self.effects.retain(|e| {
            if pred(e) {
                removed.push(*e);
                false
            } else {
                true
            }
        });
        removed
    }
}
