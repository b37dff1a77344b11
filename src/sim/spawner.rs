//! Procedural obstacle and bonus placement

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::state::{BonusItem, Entity, EntityKind, EntityRegistry, ObstaclePair, TimeOfDay};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn one obstacle pair with its left edge at `x`
///
/// The lower obstacle's top edge is drawn uniformly from the tuning range; the
/// upper one is derived from it so the gap is the same for every draw. A
/// bonus coin is attached with `tuning.bonus_chance`. Returns the pair id.
pub fn spawn_pair(
    registry: &mut EntityRegistry,
    rng: &mut impl Rng,
    x: f32,
    skin: TimeOfDay,
    tuning: &Tuning,
) -> u32 {
    let lower_y = rng.random_range(tuning.lower_y_min..=tuning.lower_y_max) as f32;
    let upper_y = lower_y - tuning.gap - OBSTACLE_HEIGHT;

    let pair_id = registry.next_entity_id();
    let mut upper = Entity::new(
        registry.next_entity_id(),
        EntityKind::UpperObstacle,
        Aabb::new(x, upper_y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    );
    let mut lower = Entity::new(
        registry.next_entity_id(),
        EntityKind::LowerObstacle,
        Aabb::new(x, lower_y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    );
    upper.apply_skin(skin);
    lower.apply_skin(skin);

    if rng.random_bool(tuning.bonus_chance) {
        let center = Vec2::new(x + OBSTACLE_WIDTH / 2.0, lower_y - tuning.gap / 2.0);
        let bonus = Entity::new(
            registry.next_entity_id(),
            EntityKind::Bonus,
            Aabb::centered(center, Vec2::splat(BONUS_SIZE)),
        );
        log::debug!("bonus {} attached to pair {}", bonus.id, pair_id);
        registry.insert_bonus(BonusItem {
            entity: bonus,
            pair_id,
            collected: false,
        });
    }

    registry.insert_pair(ObstaclePair {
        id: pair_id,
        upper,
        lower,
        passed: false,
    });
    pair_id
}

/// Fill the track ahead of the player at session start
pub fn prespawn_run(
    registry: &mut EntityRegistry,
    rng: &mut impl Rng,
    skin: TimeOfDay,
    tuning: &Tuning,
) {
    for i in 0..tuning.prespawn_count {
        let x = tuning.first_obstacle_x + i as f32 * tuning.obstacle_spacing;
        spawn_pair(registry, rng, x, skin, tuning);
    }
}

/// Spawn the next pair one spacing behind the current last pair
pub fn replenish(
    registry: &mut EntityRegistry,
    rng: &mut impl Rng,
    skin: TimeOfDay,
    tuning: &Tuning,
) -> u32 {
    let x = registry
        .rightmost_x()
        .map(|x| x + tuning.obstacle_spacing)
        .unwrap_or(tuning.first_obstacle_x);
    spawn_pair(registry, rng, x, skin, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_prespawn_spacing() {
        let tuning = Tuning::default();
        let mut registry = EntityRegistry::new();
        let mut rng = Pcg32::seed_from_u64(7);
        prespawn_run(&mut registry, &mut rng, TimeOfDay::Night, &tuning);

        let xs: Vec<f32> = registry.pairs().iter().map(|p| p.x()).collect();
        assert_eq!(xs.len(), tuning.prespawn_count as usize);
        assert_eq!(xs[0], tuning.first_obstacle_x);
        for w in xs.windows(2) {
            assert_eq!(w[1] - w[0], tuning.obstacle_spacing);
        }
        assert!(xs.iter().all(|&x| x > PLAYER_X));
        assert!(registry.pairs().iter().all(|p| p.upper.skin == TimeOfDay::Night));
    }

    #[test]
    fn test_replenish_appends_after_last() {
        let tuning = Tuning::default();
        let mut registry = EntityRegistry::new();
        let mut rng = Pcg32::seed_from_u64(7);

        replenish(&mut registry, &mut rng, TimeOfDay::Day, &tuning);
        assert_eq!(registry.rightmost_x(), Some(tuning.first_obstacle_x));

        replenish(&mut registry, &mut rng, TimeOfDay::Day, &tuning);
        assert_eq!(
            registry.rightmost_x(),
            Some(tuning.first_obstacle_x + tuning.obstacle_spacing)
        );
    }

    #[test]
    fn test_bonus_sits_in_gap_center() {
        let tuning = Tuning {
            bonus_chance: 1.0,
            ..Default::default()
        };
        let mut registry = EntityRegistry::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let id = spawn_pair(&mut registry, &mut rng, 400.0, TimeOfDay::Day, &tuning);

        let pair = registry.pair(id).unwrap();
        let bonus = &registry.bonuses()[0];
        assert_eq!(bonus.pair_id, id);
        let center = bonus.entity.bounds.center();
        assert_eq!(center.x, pair.lower.bounds.center().x);
        assert_eq!(center.y, (pair.upper.bounds.bottom() + pair.lower.bounds.top()) / 2.0);
    }

    #[test]
    fn test_bonus_rate_converges() {
        let tuning = Tuning::default();
        let mut registry = EntityRegistry::new();
        let mut rng = Pcg32::seed_from_u64(42);
        let spawns = 20_000;
        for _ in 0..spawns {
            spawn_pair(&mut registry, &mut rng, 400.0, TimeOfDay::Day, &tuning);
        }
        let rate = registry.bonuses().len() as f64 / spawns as f64;
        assert!((rate - 0.25).abs() < 0.02, "bonus rate {rate}");
    }

    proptest! {
        #[test]
        fn prop_gap_is_exact(seed in any::<u64>(), x in 0.0f32..1000.0) {
            let tuning = Tuning::default();
            let mut registry = EntityRegistry::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let id = spawn_pair(&mut registry, &mut rng, x, TimeOfDay::Day, &tuning);
            let pair = registry.pair(id).unwrap();

            prop_assert_eq!(
                pair.upper.bounds.top() + pair.upper.bounds.size.y + tuning.gap,
                pair.lower.bounds.top()
            );
            prop_assert_eq!(pair.upper.x(), pair.lower.x());
            let lower_y = pair.lower.bounds.top();
            prop_assert!(lower_y >= tuning.lower_y_min as f32);
            prop_assert!(lower_y <= tuning.lower_y_max as f32);
            prop_assert!(!pair.passed);
        }
    }
}
