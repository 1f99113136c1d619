use bevy::prelude::*;
use gallery_shared::MoveKey;
use leafwing_input_manager::prelude::*;

use crate::player::Controller;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    /// Engage pointer lock or pick the aimed frame.
    Interact,
    /// Release pointer lock.
    Release,
}

/// Bindings that feed the movement key state.
const MOVE_ACTIONS: [(InputAction, MoveKey); 5] = [
    (InputAction::Forward, MoveKey::Forward),
    (InputAction::Backward, MoveKey::Backward),
    (InputAction::Left, MoveKey::Left),
    (InputAction::Right, MoveKey::Right),
    (InputAction::Jump, MoveKey::Jump),
];

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::Forward, KeyCode::KeyW);
    input_map.insert(InputAction::Forward, KeyCode::ArrowUp);
    input_map.insert(InputAction::Backward, KeyCode::KeyS);
    input_map.insert(InputAction::Backward, KeyCode::ArrowDown);
    input_map.insert(InputAction::Left, KeyCode::KeyA);
    input_map.insert(InputAction::Left, KeyCode::ArrowLeft);
    input_map.insert(InputAction::Right, KeyCode::KeyD);
    input_map.insert(InputAction::Right, KeyCode::ArrowRight);
    input_map.insert(InputAction::Jump, KeyCode::Space);
    input_map.insert(InputAction::Interact, MouseButton::Left);
    input_map.insert(InputAction::Release, KeyCode::Escape);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());

    app.add_systems(Update, record_move_keys);
}

/// Mirror press/release edges of the movement bindings into the controller's key state.
///
/// Edges are recorded in every mode, so keys held while the modal is open still count once it
/// closes. A release that never arrives (focus lost mid-press) leaves the key held.
fn record_move_keys(actions: Res<ActionState<InputAction>>, mut controller: ResMut<Controller>) {
    for (action, key) in MOVE_ACTIONS {
        if actions.just_pressed(&action) {
            controller.keys.set(key, true);
        } else if actions.just_released(&action) {
            controller.keys.set(key, false);
        }
    }
}
