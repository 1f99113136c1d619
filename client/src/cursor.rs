use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};
use leafwing_input_manager::prelude::*;

use crate::{input::InputAction, ui_state::UiState};

pub(super) fn plugin(app: &mut App) {
    // Before any click of this frame can ask for the lock again.
    app.add_systems(PreUpdate, release_on_lost_grab);
    app.add_systems(Update, (release_on_escape, release_on_focus_loss));

    // Apply when the desired lock state changes
    app.add_systems(
        PostUpdate,
        apply_pointer_lock.run_if(resource_changed::<UiState>),
    );
}

fn release_on_escape(actions: Res<ActionState<InputAction>>, mut ui_state: ResMut<UiState>) {
    if actions.just_pressed(&InputAction::Release) && ui_state.pointer_locked() {
        ui_state.set_locked(false);
        info!("Pointer lock released");
    }
}

/// Losing focus drops the lock, but never closes open content.
fn release_on_focus_loss(
    mut messages: MessageReader<WindowFocused>,
    mut ui_state: ResMut<UiState>,
) {
    for message in messages.read() {
        if !message.focused && ui_state.pointer_locked() {
            ui_state.set_locked(false);
            info!("Window lost focus; pointer lock released");
        }
    }
}

/// The platform dropped the grab on its own while the state still asks for it.
fn grab_lost(locked: bool, grab_mode: CursorGrabMode) -> bool {
    locked && grab_mode == CursorGrabMode::None
}

/// Read the cursor grab back so the state follows releases it did not ask for.
fn release_on_lost_grab(
    cursors: Query<&CursorOptions, (With<PrimaryWindow>, Changed<CursorOptions>)>,
    mut ui_state: ResMut<UiState>,
) {
    for cursor in &cursors {
        if grab_lost(ui_state.pointer_locked(), cursor.grab_mode) {
            ui_state.set_locked(false);
            info!("Cursor grab lost; pointer lock released");
        }
    }
}

fn apply_pointer_lock(
    ui_state: Res<UiState>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if ui_state.pointer_locked() {
        // Browsers only support confining the pointer.
        #[cfg(not(target_family = "wasm"))]
        {
            cursor.grab_mode = CursorGrabMode::Locked;
        }
        #[cfg(target_family = "wasm")]
        {
            cursor.grab_mode = CursorGrabMode::Confined;
        }
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_dropped_grab_counts_as_lost() {
        assert!(grab_lost(true, CursorGrabMode::None));
        assert!(!grab_lost(true, CursorGrabMode::Locked));
        assert!(!grab_lost(true, CursorGrabMode::Confined));
        assert!(!grab_lost(false, CursorGrabMode::None));
    }
}
