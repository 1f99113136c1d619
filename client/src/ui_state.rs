use bevy::prelude::*;
use gallery_shared::{InteractionState, UiMode};

/// The app's single [`InteractionState`].
///
/// Systems only take it mutably when they actually transition it, so `resource_changed` run
/// conditions fire on real mode changes.
#[derive(Resource, Default, Debug, Deref, DerefMut)]
pub struct UiState(pub InteractionState);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<UiState>();
    app.add_systems(
        Update,
        log_mode_change.run_if(resource_changed::<UiState>),
    );
}

/// Run condition: the interaction state is currently in `mode`.
pub fn in_mode(mode: UiMode) -> impl FnMut(Res<UiState>) -> bool + Clone {
    move |state: Res<UiState>| state.mode() == mode
}

fn log_mode_change(state: Res<UiState>) {
    debug!("UI mode: {:?}", state.mode());
}
