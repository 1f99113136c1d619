//! Interaction state shared by the movement controller and the overlay.
//!
//! Two independent fields drive three UI modes:
//!
//! | active content | pointer locked | mode          |
//! |----------------|----------------|---------------|
//! | none           | true           | `Exploring`   |
//! | none           | false          | `Paused`      |
//! | some           | any            | `ContentOpen` |
//!
//! Only open content freezes the player. Losing pointer lock pauses mouse look and shows the
//! resume prompt, but held movement keys keep moving the body.

use crate::catalog::ContentItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Exploring,
    Paused,
    ContentOpen,
}

/// What a primary click did to the interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Paused: the click asks for pointer lock.
    EngagedLock,
    /// Exploring with a frame under the crosshair: its content is now open.
    Opened(u32),
    /// Nothing aimed at, or the modal owns the pointer.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    active_content: Option<ContentItem>,
    pointer_locked: bool,
}

impl InteractionState {
    /// Show `item` in the modal. The modal needs a free cursor, so pointer lock is released.
    pub fn open_content(&mut self, item: ContentItem) {
        log::debug!("open content {} ({})", item.id, item.title);
        self.active_content = Some(item);
        self.pointer_locked = false;
    }

    /// Dismiss the modal and request pointer lock back.
    pub fn close_content(&mut self) {
        log::debug!("close content");
        self.active_content = None;
        self.pointer_locked = true;
    }

    /// Mirror the platform's actual pointer-lock status. Never touches the active content.
    pub fn set_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    /// Apply a primary click given the content of the frame under the crosshair, if any.
    ///
    /// Paused engages pointer lock, Exploring opens the aimed content (releasing the lock), and
    /// ContentOpen leaves everything to the modal.
    pub fn interact(&mut self, aimed: Option<&ContentItem>) -> ClickOutcome {
        match self.mode() {
            UiMode::Paused => {
                self.set_locked(true);
                ClickOutcome::EngagedLock
            }
            UiMode::Exploring => match aimed {
                Some(item) => {
                    self.open_content(*item);
                    ClickOutcome::Opened(item.id)
                }
                None => ClickOutcome::Ignored,
            },
            UiMode::ContentOpen => ClickOutcome::Ignored,
        }
    }

    #[inline]
    pub fn active_content(&self) -> Option<&ContentItem> {
        self.active_content.as_ref()
    }

    #[inline]
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Whether the player must be held in place this frame.
    #[inline]
    pub fn movement_frozen(&self) -> bool {
        self.active_content.is_some()
    }

    pub fn mode(&self) -> UiMode {
        match (&self.active_content, self.pointer_locked) {
            (Some(_), _) => UiMode::ContentOpen,
            (None, true) => UiMode::Exploring,
            (None, false) => UiMode::Paused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    #[test]
    fn starts_paused() {
        let state = InteractionState::default();
        assert_eq!(state.mode(), UiMode::Paused);
        assert!(state.active_content().is_none());
        assert!(!state.pointer_locked());
    }

    #[test]
    fn open_content_sets_item_and_unlocks() {
        for locked in [true, false] {
            let mut state = InteractionState::default();
            state.set_locked(locked);
            state.open_content(CATALOG[1]);
            assert_eq!(state.active_content(), Some(&CATALOG[1]));
            assert!(!state.pointer_locked());
            assert_eq!(state.mode(), UiMode::ContentOpen);
        }
    }

    #[test]
    fn close_content_clears_item_and_requests_lock() {
        let mut state = InteractionState::default();
        state.open_content(CATALOG[0]);
        state.close_content();
        assert!(state.active_content().is_none());
        assert!(state.pointer_locked());
        assert_eq!(state.mode(), UiMode::Exploring);
    }

    #[test]
    fn set_locked_never_touches_content() {
        let mut state = InteractionState::default();
        state.open_content(CATALOG[2]);

        state.set_locked(true);
        assert_eq!(state.active_content(), Some(&CATALOG[2]));
        assert_eq!(state.mode(), UiMode::ContentOpen);

        state.set_locked(false);
        assert_eq!(state.active_content(), Some(&CATALOG[2]));

        let mut empty = InteractionState::default();
        empty.set_locked(true);
        assert!(empty.active_content().is_none());
        assert_eq!(empty.mode(), UiMode::Exploring);
        empty.set_locked(false);
        assert_eq!(empty.mode(), UiMode::Paused);
    }

    #[test]
    fn click_while_paused_engages_lock() {
        let mut state = InteractionState::default();
        // Whatever happens to be aimed at is not opened from the prompt.
        assert_eq!(state.interact(Some(&CATALOG[0])), ClickOutcome::EngagedLock);
        assert!(state.pointer_locked());
        assert!(state.active_content().is_none());
        assert_eq!(state.mode(), UiMode::Exploring);
    }

    #[test]
    fn click_while_exploring_opens_aimed_content_and_unlocks() {
        let mut state = InteractionState::default();
        state.set_locked(true);

        assert_eq!(state.interact(Some(&CATALOG[2])), ClickOutcome::Opened(CATALOG[2].id));
        assert_eq!(state.active_content(), Some(&CATALOG[2]));
        assert!(!state.pointer_locked());
        assert_eq!(state.mode(), UiMode::ContentOpen);
    }

    #[test]
    fn click_while_exploring_at_nothing_is_ignored() {
        let mut state = InteractionState::default();
        state.set_locked(true);
        let before = state.clone();

        assert_eq!(state.interact(None), ClickOutcome::Ignored);
        assert_eq!(state, before);
    }

    #[test]
    fn click_while_content_open_is_ignored() {
        for locked in [false, true] {
            let mut state = InteractionState::default();
            state.open_content(CATALOG[1]);
            state.set_locked(locked);
            let before = state.clone();

            assert_eq!(state.interact(Some(&CATALOG[3])), ClickOutcome::Ignored);
            assert_eq!(state.interact(None), ClickOutcome::Ignored);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn close_after_click_relocks_and_resumes_exploring() {
        let mut state = InteractionState::default();
        state.interact(None);
        state.interact(Some(&CATALOG[0]));
        assert_eq!(state.mode(), UiMode::ContentOpen);

        state.close_content();
        assert!(state.pointer_locked());
        assert!(state.active_content().is_none());
        assert_eq!(state.interact(None), ClickOutcome::Ignored);
        assert_eq!(state.mode(), UiMode::Exploring);
    }

    #[test]
    fn losing_lock_pauses_without_touching_content() {
        // Escape and window focus loss both report an unlocked pointer.
        let mut exploring = InteractionState::default();
        exploring.set_locked(true);
        exploring.set_locked(false);
        assert_eq!(exploring.mode(), UiMode::Paused);
        assert!(exploring.active_content().is_none());

        let mut reading = InteractionState::default();
        reading.open_content(CATALOG[3]);
        reading.set_locked(false);
        assert_eq!(reading.active_content(), Some(&CATALOG[3]));
        assert_eq!(reading.mode(), UiMode::ContentOpen);
    }

    #[test]
    fn only_content_freezes_movement() {
        let mut state = InteractionState::default();
        state.set_locked(false);
        assert!(!state.movement_frozen());
        state.open_content(CATALOG[3]);
        assert!(state.movement_frozen());
        state.set_locked(true);
        assert!(state.movement_frozen());
    }
}
