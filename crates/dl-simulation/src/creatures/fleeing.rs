//! Threat assessment and escape.
//!
//! Only the first entry of a threat list is consulted. Callers order the
//! list; the nearest threat is not searched for.

use dl_core::balance::CreatureBalance;
use dl_core::{CreatureId, GridPos, WildlifeCreature};
use rand::Rng;

/// Who poses a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatSource {
    /// The player character.
    Player,
    /// A predator creature.
    Creature(CreatureId),
}

/// Something a creature may run from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    /// Who it is.
    pub source: ThreatSource,
    /// Where it stands.
    pub position: GridPos,
    /// How dangerous it is, nominally 0..=100.
    pub severity: f64,
}

/// Distance within which the primary threat can trigger flight.
pub fn flee_threshold(creature: &WildlifeCreature, balance: &CreatureBalance) -> f64 {
    let alertness = (creature.personality.caution() + creature.genetics.fearfulness) / 10.0;
    balance.min_flee_distance.max(alertness)
}

/// Whether the creature should run from `threats[0]`.
///
/// Inside the flee threshold, a creature flees when it is weak and the
/// threat is at least moderate, or when `severity * fearfulness / 100`
/// exceeds the fear threshold.
pub fn should_flee(
    creature: &WildlifeCreature,
    threats: &[Threat],
    balance: &CreatureBalance,
) -> bool {
    let Some(primary) = threats.first() else {
        return false;
    };
    let distance = creature.position.distance_to(primary.position);
    if distance > flee_threshold(creature, balance) {
        return false;
    }
    let weak = creature.health < balance.low_health && primary.severity > balance.low_health_severity;
    let afraid = primary.severity * creature.genetics.fearfulness / 100.0 > balance.fear_score_threshold;
    weak || afraid
}

/// Integer step away from `threats[0]`.
///
/// The unit vector away from the threat is scaled by `speed / 50` and by
/// the effort multiplier `1 - laziness / 100`, then rounded per axis.
/// Returns `(0, 0)` when there is no threat or it shares the cell.
pub fn calculate_flee_direction(creature: &WildlifeCreature, threats: &[Threat]) -> (i32, i32) {
    let Some(primary) = threats.first() else {
        return (0, 0);
    };
    let dx = f64::from(creature.position.x - primary.position.x);
    let dy = f64::from(creature.position.y - primary.position.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return (0, 0);
    }
    let effort = (1.0 - creature.personality.laziness() / 100.0).clamp(0.0, 1.0);
    let scale = creature.genetics.speed / 50.0 * effort;
    (
        (dx / len * scale).round() as i32,
        (dy / len * scale).round() as i32,
    )
}

/// First cell along `direction`, 1..=`range` cells out, that `is_safe` accepts.
///
/// The scan walks one cell at a time using the sign of each axis.
pub fn find_safe_refuge<F>(
    creature: &WildlifeCreature,
    direction: (i32, i32),
    range: i32,
    is_safe: F,
) -> Option<GridPos>
where
    F: Fn(GridPos) -> bool,
{
    let (sx, sy) = (direction.0.signum(), direction.1.signum());
    if (sx, sy) == (0, 0) {
        return None;
    }
    (1..=range)
        .map(|step| creature.position.offset(sx * step, sy * step))
        .find(|cell| is_safe(*cell))
}

/// One of the nine unit deltas, including standing still, uniformly.
pub fn panic_movement<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32) {
    (rng.random_range(-1..=1), rng.random_range(-1..=1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::creature::Personality;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn creature_at(x: i32, y: i32) -> WildlifeCreature {
        WildlifeCreature::adult(CreatureId(1), "rabbit", GridPos::new(x, y))
    }

    fn threat_at(x: i32, y: i32, severity: f64) -> Threat {
        Threat {
            source: ThreatSource::Player,
            position: GridPos::new(x, y),
            severity,
        }
    }

    #[test]
    fn no_threats_no_flight() {
        assert!(!should_flee(&creature_at(0, 0), &[], &CreatureBalance::default()));
    }

    #[test]
    fn threshold_floor_is_three_cells() {
        let mut c = creature_at(0, 0);
        c.genetics.fearfulness = 10.0;
        assert!((flee_threshold(&c, &CreatureBalance::default()) - 3.0).abs() < f64::EPSILON);
        c.personality.caution = Some(60.0);
        c.genetics.fearfulness = 80.0;
        assert!((flee_threshold(&c, &CreatureBalance::default()) - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fear_score_triggers_flight() {
        let balance = CreatureBalance::default();
        let mut c = creature_at(0, 0);
        c.genetics.fearfulness = 90.0;
        // 50 * 90 / 100 = 45 > 40
        assert!(should_flee(&c, &[threat_at(2, 0, 50.0)], &balance));
        c.genetics.fearfulness = 70.0;
        // 35, healthy: no flight
        assert!(!should_flee(&c, &[threat_at(2, 0, 50.0)], &balance));
    }

    #[test]
    fn weak_creatures_flee_moderate_threats() {
        let balance = CreatureBalance::default();
        let mut c = creature_at(0, 0);
        c.genetics.fearfulness = 10.0;
        c.health = 20.0;
        assert!(should_flee(&c, &[threat_at(1, 1, 25.0)], &balance));
        assert!(!should_flee(&c, &[threat_at(1, 1, 15.0)], &balance));
    }

    #[test]
    fn distant_threat_is_ignored() {
        let mut c = creature_at(0, 0);
        c.genetics.fearfulness = 100.0;
        assert!(!should_flee(&c, &[threat_at(20, 0, 100.0)], &CreatureBalance::default()));
    }

    #[test]
    fn only_first_threat_counts() {
        let balance = CreatureBalance::default();
        let mut c = creature_at(0, 0);
        c.genetics.fearfulness = 100.0;
        let threats = [threat_at(30, 0, 100.0), threat_at(1, 0, 100.0)];
        assert!(!should_flee(&c, &threats, &balance));
        assert_eq!(calculate_flee_direction(&c, &threats), (-1, 0));
    }

    #[test]
    fn direction_points_away_and_scales() {
        let mut c = creature_at(5, 5);
        let threats = [threat_at(5, 3, 50.0)];
        assert_eq!(calculate_flee_direction(&c, &threats), (0, 1));
        c.genetics.speed = 100.0;
        assert_eq!(calculate_flee_direction(&c, &threats), (0, 2));
        c.personality = Personality {
            laziness: Some(100.0),
            ..Personality::default()
        };
        assert_eq!(calculate_flee_direction(&c, &threats), (0, 0));
    }

    #[test]
    fn shared_cell_gives_no_direction() {
        assert_eq!(calculate_flee_direction(&creature_at(1, 1), &[threat_at(1, 1, 90.0)]), (0, 0));
    }

    #[test]
    fn refuge_scan_uses_predicate() {
        let c = creature_at(0, 0);
        let refuge = find_safe_refuge(&c, (2, 1), 5, |cell| cell.x >= 3);
        assert_eq!(refuge, Some(GridPos::new(3, 3)));
        assert_eq!(find_safe_refuge(&c, (1, 0), 5, |_| false), None);
        assert_eq!(find_safe_refuge(&c, (0, 0), 5, |_| true), None);
    }

    #[test]
    fn panic_covers_all_nine_deltas() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            let d = panic_movement(&mut rng);
            assert!((-1..=1).contains(&d.0) && (-1..=1).contains(&d.1));
            seen.insert(d);
        }
        assert_eq!(seen.len(), 9);
    }
}
