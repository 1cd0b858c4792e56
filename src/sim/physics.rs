//! Per-tick movement, bounds clamping, classification, and collision
//!
//! The resolver is a pure function over an explicit snapshot of the
//! creature and world. It never reads ambient state, which keeps every
//! tick free of stale captures by construction.

use crate::core::config::SimConfig;
use crate::core::types::{Direction, FoodId, Vec2};
use crate::creature::state::BehavioralState;
use crate::sim::input::{InputState, MoveKey};
use crate::world::food::FoodItem;

/// Immutable inputs to one resolver pass
#[derive(Debug, Clone, Copy)]
pub struct PhysicsInput<'a> {
    pub position: Vec2,
    pub direction: Direction,
    pub state: BehavioralState,
    pub keys: &'a InputState,
    pub food: &'a [FoodItem],
}

/// Result of one resolver pass
#[derive(Debug, Clone)]
pub struct PhysicsOutcome {
    pub position: Vec2,
    pub direction: Direction,
    pub moved_horizontally: bool,
    pub in_water: bool,
    /// Auto-classification, absent while a lock suppressed it
    pub candidate: Option<BehavioralState>,
    /// Food within eating range, in collection order
    pub eaten: Vec<FoodId>,
}

/// Resolve one tick of movement and collision
pub fn resolve(input: PhysicsInput<'_>, config: &SimConfig) -> PhysicsOutcome {
    if input.state.is_locked() {
        // Locked states freeze the creature. Collisions are skipped
        // too, since consuming would start a new eating episode under
        // an active lock.
        return PhysicsOutcome {
            position: input.position,
            direction: input.direction,
            moved_horizontally: false,
            in_water: input.position.y > config.water_line(),
            candidate: None,
            eaten: Vec::new(),
        };
    }

    let mut position = input.position;
    let mut direction = input.direction;
    let mut moved_horizontally = false;

    // Held keys compose, so diagonals displace on both axes. Vertical
    // movement changes position but does not count as "moving" for
    // classification; only horizontal presses do.
    if input.keys.is_held(MoveKey::Up) {
        position.y -= config.move_speed;
    }
    if input.keys.is_held(MoveKey::Down) {
        position.y += config.move_speed;
    }
    if input.keys.is_held(MoveKey::Left) {
        position.x -= config.move_speed;
        direction = Direction::Left;
        moved_horizontally = true;
    }
    if input.keys.is_held(MoveKey::Right) {
        position.x += config.move_speed;
        direction = Direction::Right;
        moved_horizontally = true;
    }

    position = position.clamped(
        config.edge_margin,
        config.world_width - config.edge_margin,
        config.world_height - config.edge_margin,
    );

    let in_water = position.y > config.water_line();
    let candidate = if in_water {
        BehavioralState::Swimming
    } else if moved_horizontally {
        BehavioralState::Walking
    } else {
        BehavioralState::Idle
    };

    let eaten = input
        .food
        .iter()
        .filter(|item| item.position.distance(&position) <= config.eat_radius)
        .map(|item| item.id)
        .collect();

    PhysicsOutcome {
        position,
        direction,
        moved_horizontally,
        in_water,
        candidate: Some(candidate),
        eaten,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::food::FoodKind;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    fn resolve_at(
        position: Vec2,
        state: BehavioralState,
        keys: &InputState,
        food: &[FoodItem],
    ) -> PhysicsOutcome {
        resolve(
            PhysicsInput {
                position,
                direction: Direction::Right,
                state,
                keys,
                food,
            },
            &config(),
        )
    }

    #[test]
    fn test_no_keys_no_movement() {
        let keys = InputState::new();
        let out = resolve_at(Vec2::new(400.0, 300.0), BehavioralState::Idle, &keys, &[]);
        assert_eq!(out.position, Vec2::new(400.0, 300.0));
        assert_eq!(out.candidate, Some(BehavioralState::Idle));
    }

    #[test]
    fn test_diagonal_press_moves_both_axes() {
        let mut keys = InputState::new();
        keys.press(MoveKey::Left);
        keys.press(MoveKey::Up);

        let out = resolve_at(Vec2::new(400.0, 300.0), BehavioralState::Idle, &keys, &[]);
        assert_eq!(out.position, Vec2::new(395.0, 295.0));
        assert_eq!(out.direction, Direction::Left);
        assert_eq!(out.candidate, Some(BehavioralState::Walking));
    }

    #[test]
    fn test_vertical_only_classifies_idle() {
        // Position changes but the creature is not "moving" for state
        // purposes; observed asymmetry kept on purpose.
        let mut keys = InputState::new();
        keys.press(MoveKey::Up);

        let out = resolve_at(Vec2::new(400.0, 300.0), BehavioralState::Idle, &keys, &[]);
        assert_eq!(out.position, Vec2::new(400.0, 295.0));
        assert!(!out.moved_horizontally);
        assert_eq!(out.candidate, Some(BehavioralState::Idle));
    }

    #[test]
    fn test_facing_persists_without_horizontal_input() {
        let keys = InputState::new();
        let out = resolve(
            PhysicsInput {
                position: Vec2::new(400.0, 300.0),
                direction: Direction::Left,
                state: BehavioralState::Idle,
                keys: &keys,
                food: &[],
            },
            &config(),
        );
        assert_eq!(out.direction, Direction::Left);
    }

    #[test]
    fn test_clamped_to_margins() {
        let mut keys = InputState::new();
        keys.press(MoveKey::Left);
        keys.press(MoveKey::Up);

        let out = resolve_at(Vec2::new(51.0, 52.0), BehavioralState::Idle, &keys, &[]);
        assert_eq!(out.position, Vec2::new(50.0, 50.0));

        let mut keys = InputState::new();
        keys.press(MoveKey::Right);
        keys.press(MoveKey::Down);
        let out = resolve_at(Vec2::new(749.0, 549.0), BehavioralState::Idle, &keys, &[]);
        assert_eq!(out.position, Vec2::new(750.0, 550.0));
    }

    #[test]
    fn test_water_classifies_swimming() {
        let keys = InputState::new();
        let out = resolve_at(Vec2::new(400.0, 500.0), BehavioralState::Idle, &keys, &[]);
        assert!(out.in_water);
        assert_eq!(out.candidate, Some(BehavioralState::Swimming));
    }

    #[test]
    fn test_water_line_is_exclusive() {
        let keys = InputState::new();
        let out = resolve_at(Vec2::new(400.0, 420.0), BehavioralState::Idle, &keys, &[]);
        assert!(!out.in_water);
    }

    #[test]
    fn test_locked_state_freezes_everything() {
        let mut keys = InputState::new();
        keys.press(MoveKey::Right);
        let food = vec![FoodItem::new(Vec2::new(400.0, 300.0), FoodKind::Orange)];

        for state in [
            BehavioralState::Eating,
            BehavioralState::Sleeping,
            BehavioralState::Meditating,
        ] {
            let out = resolve_at(Vec2::new(400.0, 300.0), state, &keys, &food);
            assert_eq!(out.position, Vec2::new(400.0, 300.0));
            assert_eq!(out.candidate, None);
            assert!(out.eaten.is_empty());
        }
    }

    #[test]
    fn test_collision_within_radius() {
        let keys = InputState::new();
        let near = FoodItem::new(Vec2::new(120.0, 100.0), FoodKind::Orange);
        let far = FoodItem::new(Vec2::new(300.0, 100.0), FoodKind::Orange);
        let food = vec![near.clone(), far];

        let out = resolve_at(Vec2::new(100.0, 100.0), BehavioralState::Idle, &keys, &food);
        assert_eq!(out.eaten, vec![near.id]);
    }

    #[test]
    fn test_collision_radius_boundary_inclusive() {
        let keys = InputState::new();
        let edge = FoodItem::new(Vec2::new(150.0, 100.0), FoodKind::Orange);
        let food = vec![edge.clone()];

        let out = resolve_at(Vec2::new(100.0, 100.0), BehavioralState::Idle, &keys, &food);
        assert_eq!(out.eaten, vec![edge.id]);
    }

    #[test]
    fn test_multiple_collisions_in_collection_order() {
        let keys = InputState::new();
        let a = FoodItem::new(Vec2::new(110.0, 100.0), FoodKind::Orange);
        let b = FoodItem::new(Vec2::new(90.0, 100.0), FoodKind::Watermelon);
        let food = vec![a.clone(), b.clone()];

        let out = resolve_at(Vec2::new(100.0, 100.0), BehavioralState::Idle, &keys, &food);
        assert_eq!(out.eaten, vec![a.id, b.id]);
    }

    #[test]
    fn test_collision_uses_post_movement_position() {
        let mut keys = InputState::new();
        keys.press(MoveKey::Right);
        // Out of range before the tick, in range after moving 5 units
        let item = FoodItem::new(Vec2::new(154.0, 100.0), FoodKind::Orange);
        let food = vec![item.clone()];

        let out = resolve_at(Vec2::new(100.0, 100.0), BehavioralState::Idle, &keys, &food);
        assert_eq!(out.eaten, vec![item.id]);
    }
}
