//! Held-key record consumed by the movement controller.
//!
//! The record is event driven: it only changes when a press or release is observed. A release
//! that never arrives (for example because the window lost focus while the key was held) leaves
//! the flag set until the key is pressed and released again.

/// Movement inputs the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

#[cfg(test)]
impl MoveKey {
    pub const ALL: [MoveKey; 5] = [
        MoveKey::Forward,
        MoveKey::Backward,
        MoveKey::Left,
        MoveKey::Right,
        MoveKey::Jump,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl KeyState {
    /// Record a press (`held = true`) or release (`held = false`) of `key`.
    #[inline]
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Backward => self.backward = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
            MoveKey::Jump => self.jump = held,
        }
    }

    #[cfg(test)]
    pub fn is_held(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Backward => self.backward,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
            MoveKey::Jump => self.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_toggle_only_that_flag() {
        let mut keys = KeyState::default();
        keys.set(MoveKey::Left, true);
        assert!(keys.left);
        assert_eq!(
            keys,
            KeyState {
                left: true,
                ..KeyState::default()
            }
        );

        keys.set(MoveKey::Left, false);
        assert_eq!(keys, KeyState::default());
    }

    #[test]
    fn missed_release_leaves_flag_stuck() {
        // Only presses are observed; nothing clears the flag on its own.
        let mut keys = KeyState::default();
        keys.set(MoveKey::Forward, true);
        keys.set(MoveKey::Jump, true);
        keys.set(MoveKey::Jump, false);
        assert!(keys.is_held(MoveKey::Forward));
        assert!(!keys.is_held(MoveKey::Jump));
    }

    #[test]
    fn every_key_maps_to_its_own_flag() {
        for key in MoveKey::ALL {
            let mut keys = KeyState::default();
            keys.set(key, true);
            for other in MoveKey::ALL {
                assert_eq!(keys.is_held(other), other == key, "{key:?} vs {other:?}");
            }
        }
    }
}
