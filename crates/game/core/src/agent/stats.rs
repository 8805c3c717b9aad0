use super::{ActiveEffects, ClassProfile};

/// Effective statistics: class profile scaled by active effects.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub move_speed: f32,
    pub strength: f32,
    pub accuracy: f32,
    pub critical_chance: f32,
}

impl StatBlock {
    pub fn derive(profile: &ClassProfile, effects: &ActiveEffects) -> Self {
        let m = effects.modifiers();
        Self {
            move_speed: profile.move_speed * m.move_speed,
            strength: profile.strength * m.strength,
            accuracy: profile.accuracy * m.accuracy,
            critical_chance: profile.critical_chance * m.critical_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentClass, EffectKind, TimedEffect};

    #[test]
    fn effects_multiply_base_profile() {
        let profile = AgentClass::Assault.profile();
        let mut effects = ActiveEffects::empty();
        assert_eq!(StatBlock::derive(&profile, &effects).move_speed, 5.0);

        effects.insert(TimedEffect::timed(EffectKind::AdrenalineRush, 0.0, 15.0));
        effects.insert(TimedEffect::timed(EffectKind::TeamBoost, 0.0, 10.0));
        let stats = StatBlock::derive(&profile, &effects);
        assert!((stats.move_speed - 5.0 * 1.5 * 1.2).abs() < 1e-5);
        assert!((stats.strength - 13.0).abs() < 1e-5);
        assert_eq!(stats.accuracy, profile.accuracy);
    }
}
