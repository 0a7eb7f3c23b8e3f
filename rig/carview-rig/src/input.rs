//! Held steering keys.
//!
//! The host delivers key-down/key-up events asynchronously; they only ever
//! insert into or remove from this set. The frame tick reads it once at the
//! start of the frame.

/// A logical steering key. Physical bindings live in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteerKey {
    Left,
    Right,
}

/// Net steering request for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteerDirection {
    Left,
    Right,
    /// Neither key, or both keys, are held.
    #[default]
    None,
}

/// Set of currently held steering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteerInput {
    left: bool,
    right: bool,
}

impl SteerInput {
    /// Input with the given keys held.
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Mark a key as held.
    pub fn press(&mut self, key: SteerKey) {
        self.set(key, true);
    }

    /// Mark a key as released.
    pub fn release(&mut self, key: SteerKey) {
        self.set(key, false);
    }

    /// Set a key's held state.
    pub fn set(&mut self, key: SteerKey, held: bool) {
        match key {
            SteerKey::Left => self.left = held,
            SteerKey::Right => self.right = held,
        }
    }

    /// Whether a key is held.
    pub fn is_held(&self, key: SteerKey) -> bool {
        match key {
            SteerKey::Left => self.left,
            SteerKey::Right => self.right,
        }
    }

    /// Resolve the held keys into a single direction.
    pub fn direction(&self) -> SteerDirection {
        match (self.left, self.right) {
            (true, false) => SteerDirection::Left,
            (false, true) => SteerDirection::Right,
            _ => SteerDirection::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_resolution() {
        let mut input = SteerInput::default();
        assert_eq!(input.direction(), SteerDirection::None);

        input.press(SteerKey::Left);
        assert_eq!(input.direction(), SteerDirection::Left);

        // Both held cancels out.
        input.press(SteerKey::Right);
        assert_eq!(input.direction(), SteerDirection::None);

        input.release(SteerKey::Left);
        assert_eq!(input.direction(), SteerDirection::Right);
        assert!(!input.is_held(SteerKey::Left));
        assert!(input.is_held(SteerKey::Right));
    }

    #[test]
    fn test_release_unheld_key_is_noop() {
        let mut input = SteerInput::new(true, false);
        input.release(SteerKey::Right);
        assert_eq!(input, SteerInput::new(true, false));
    }
}
