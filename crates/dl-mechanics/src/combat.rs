//! Combat bridge.
//!
//! Combat itself is resolved elsewhere; this module turns a numeric
//! [`CombatOutcome`] into the side effects the presentation layer plays.

use dl_core::effect::{GameEvent, NotifyTone, ParticleKind, SoundCue};
use dl_core::{BilingualText, GridPos, SideEffect};
use serde::{Deserialize, Serialize};

/// Numeric result of one exchange of blows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatOutcome {
    /// Damage the player dealt.
    pub damage_dealt: f64,
    /// Damage the player took.
    pub damage_taken: f64,
    /// Whether the player's hit was critical.
    pub critical: bool,
    /// Whether the enemy died.
    pub target_defeated: bool,
    /// Whether the player escaped.
    pub player_fled: bool,
    /// Where the fight happened.
    pub position: Option<GridPos>,
}

/// Blood droplets per point of damage dealt, capped.
const BLOOD_PER_DAMAGE: f64 = 0.5;
const MAX_BLOOD: u32 = 20;
const CRIT_SPARKS: u32 = 12;

/// Side effects for a combat outcome, in play order.
///
/// An outcome where nothing happened yields an empty list.
pub fn combat_effects(outcome: &CombatOutcome) -> Vec<SideEffect> {
    let mut effects = Vec::new();

    if outcome.damage_dealt > 0.0 {
        if outcome.critical {
            effects.push(SideEffect::sound(SoundCue::CriticalHit));
            effects.push(SideEffect::particles(ParticleKind::Sparks, CRIT_SPARKS));
        } else {
            effects.push(SideEffect::sound(SoundCue::Hit));
        }
        let drops = (outcome.damage_dealt * BLOOD_PER_DAMAGE).ceil().min(f64::from(MAX_BLOOD)) as u32;
        effects.push(SideEffect::particles(ParticleKind::Blood, drops.max(1)));
    }

    if outcome.damage_taken > 0.0 {
        let amount = outcome.damage_taken.round();
        effects.push(SideEffect::sound(SoundCue::Hurt));
        effects.push(SideEffect::notify(
            BilingualText::new(
                format!("You take {amount} damage."),
                format!("Bạn nhận {amount} sát thương."),
            ),
            NotifyTone::Warning,
        ));
    }

    if outcome.target_defeated {
        effects.push(SideEffect::sound(SoundCue::Victory));
        effects.push(SideEffect::notify(
            BilingualText::new("Enemy defeated!", "Đã hạ gục kẻ thù!"),
            NotifyTone::Success,
        ));
        effects.push(SideEffect::event(GameEvent::EnemyDefeated {
            position: outcome.position,
        }));
    }

    if outcome.player_fled {
        effects.push(SideEffect::sound(SoundCue::Escape));
        effects.push(SideEffect::event(GameEvent::PlayerFled));
    }

    if !effects.is_empty() {
        tracing::trace!(count = effects.len(), "combat effects");
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_happened_means_no_effects() {
        assert!(combat_effects(&CombatOutcome::default()).is_empty());
    }

    #[test]
    fn plain_hit() {
        let effects = combat_effects(&CombatOutcome {
            damage_dealt: 7.0,
            ..CombatOutcome::default()
        });
        assert_eq!(
            effects,
            vec![
                SideEffect::sound(SoundCue::Hit),
                SideEffect::particles(ParticleKind::Blood, 4),
            ]
        );
    }

    #[test]
    fn critical_hit_adds_sparks_and_caps_blood() {
        let effects = combat_effects(&CombatOutcome {
            damage_dealt: 500.0,
            critical: true,
            ..CombatOutcome::default()
        });
        assert_eq!(effects[0], SideEffect::sound(SoundCue::CriticalHit));
        assert_eq!(effects[1], SideEffect::particles(ParticleKind::Sparks, 12));
        assert_eq!(effects[2], SideEffect::particles(ParticleKind::Blood, 20));
    }

    #[test]
    fn victory_publishes_event_with_position() {
        let pos = GridPos::new(3, -2);
        let effects = combat_effects(&CombatOutcome {
            damage_dealt: 10.0,
            target_defeated: true,
            position: Some(pos),
            ..CombatOutcome::default()
        });
        assert!(effects.contains(&SideEffect::event(GameEvent::EnemyDefeated {
            position: Some(pos)
        })));
        assert!(effects.contains(&SideEffect::sound(SoundCue::Victory)));
    }

    #[test]
    fn taking_damage_notifies() {
        let effects = combat_effects(&CombatOutcome {
            damage_taken: 12.4,
            ..CombatOutcome::default()
        });
        assert_eq!(effects[0], SideEffect::sound(SoundCue::Hurt));
        match &effects[1] {
            SideEffect::Notify { message, tone } => {
                assert_eq!(message.en, "You take 12 damage.");
                assert_eq!(*tone, NotifyTone::Warning);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn fleeing_publishes_event() {
        let effects = combat_effects(&CombatOutcome {
            player_fled: true,
            ..CombatOutcome::default()
        });
        assert_eq!(
            effects,
            vec![
                SideEffect::sound(SoundCue::Escape),
                SideEffect::event(GameEvent::PlayerFled),
            ]
        );
    }
}
