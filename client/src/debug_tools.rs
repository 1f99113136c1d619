//! Performance overlay for native dev builds, toggled with F3.

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use iyes_perf_ui::prelude::*;

const TOGGLE_KEY: KeyCode = KeyCode::F3;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, toggle_perf_ui);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn((
        PerfUiRoot::default(),
        PerfUiEntryFPS::default(),
        PerfUiEntryFrameTime::default(),
        PerfUiEntryEntityCount::default(),
    ));
}

fn toggle_perf_ui(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    roots: Query<Entity, With<PerfUiRoot>>,
) {
    if !keys.just_pressed(TOGGLE_KEY) {
        return;
    }

    if roots.is_empty() {
        spawn_perf_ui(commands);
    } else {
        for root in &roots {
            commands.entity(root).despawn();
        }
    }
}
