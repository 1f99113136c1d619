//! Grounded flag driven by the player's foot sensor.
//!
//! The sensor is a small trigger volume under the capsule. Overlap start with any collider
//! marks the player grounded, overlap end clears it. Overlaps are not counted: stepping off one
//! of two touched surfaces clears the flag even though the other is still underfoot.

/// Last-write-wins grounded flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroundSensor {
    grounded: bool,
}

impl GroundSensor {
    /// The foot sensor started overlapping another collider.
    #[inline]
    pub fn on_enter(&mut self) {
        self.grounded = true;
    }

    /// The foot sensor stopped overlapping another collider.
    #[inline]
    pub fn on_exit(&mut self) {
        self.grounded = false;
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Consume the grounded state for a jump: returns whether the player was grounded and
    /// clears the flag so the jump cannot fire again within the same contact.
    #[inline]
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.grounded)
    }
}
