//! Pressed-key set consumed by the physics resolver

use ahash::AHashSet;

/// Movement keys the host input layer can hold down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

/// Live set of currently held movement keys
///
/// Owned and mutated by the input collaborator; the simulation core
/// only reads membership.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: AHashSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: MoveKey) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held.remove(&key);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }
}
