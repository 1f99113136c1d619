//! Screen-space overlay: crosshair while exploring, the resume prompt while paused, the
//! content modal while a picture is open, and the title labels pinned to each frame's plaque.

use bevy::{prelude::*, ui::UiSystems};
use gallery_shared::{CATALOG, PLAQUE_HALF_EXTENTS, PLAQUE_OFFSET, UiMode};
use nalgebra as na;

use crate::{
    camera::PlayerCamera, convert::to_bevy_vec3, gallery::handle_interact, player::follow_eye,
    ui_state::UiState,
};

const PROMPT_BACKDROP: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);
const MODAL_BACKGROUND: Color = Color::srgb(1.0, 1.0, 1.0);
const MODAL_TEXT: Color = Color::srgb(0.13, 0.13, 0.13);
const BUTTON_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.35, 0.35, 0.35);
const LABEL_BACKGROUND: Color = Color::srgb(0.961, 0.961, 0.863);
const LABEL_TEXT: Color = Color::srgb(0.243, 0.153, 0.137);

/// Plaque labels further away than this are hidden (meters).
const LABEL_MAX_DISTANCE: f32 = 14.0;
const LABEL_WIDTH: f32 = 220.0;
const LABEL_SUBTITLE: &str = "Vintage Collection";

/// Overlay subtree shown only in the given mode.
#[derive(Component)]
struct OverlaySection(UiMode);

#[derive(Component)]
struct ModalImage;

#[derive(Component)]
struct ModalTitle;

#[derive(Component)]
struct ModalBody;

#[derive(Component)]
struct CloseButton;

/// Title label following a plaque's front face on screen.
#[derive(Component)]
struct PlaqueLabel {
    anchor: Vec3,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, (spawn_overlay, spawn_plaque_labels));
    app.add_systems(
        PostUpdate,
        place_plaque_labels
            .after(follow_eye)
            .before(UiSystems::Layout),
    );
    app.add_systems(
        Update,
        (
            // A click on CLOSE must not also count as a click into the scene.
            handle_close_button.after(handle_interact),
            hover_close_button,
            sync_overlay
                .run_if(resource_changed::<UiState>)
                .after(handle_close_button),
        ),
    );
}

fn spawn_overlay(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Overlay"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                OverlaySection(UiMode::Exploring),
                Node {
                    display: Display::None,
                    ..default()
                },
                Text::new("+"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            root.spawn((
                OverlaySection(UiMode::Paused),
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(12.0),
                    padding: UiRect::all(Val::Px(32.0)),
                    ..default()
                },
                BackgroundColor(PROMPT_BACKDROP),
            ))
            .with_children(|prompt| {
                prompt.spawn((
                    Text::new("CLICK TO EXPLORE"),
                    TextFont {
                        font_size: 42.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
                prompt.spawn((
                    Text::new("WASD to Move, Click paintings to Read"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });

            root.spawn((
                OverlaySection(UiMode::ContentOpen),
                Node {
                    display: Display::None,
                    width: Val::Px(720.0),
                    max_width: Val::Percent(90.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(16.0),
                    padding: UiRect::all(Val::Px(24.0)),
                    ..default()
                },
                BackgroundColor(MODAL_BACKGROUND),
            ))
            .with_children(|modal| {
                modal.spawn((
                    ModalImage,
                    ImageNode::default(),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(320.0),
                        ..default()
                    },
                ));
                modal.spawn((
                    ModalTitle,
                    Text::default(),
                    TextFont {
                        font_size: 32.0,
                        ..default()
                    },
                    TextColor(MODAL_TEXT),
                ));
                modal.spawn((
                    ModalBody,
                    Text::default(),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(MODAL_TEXT),
                ));
                modal
                    .spawn((
                        CloseButton,
                        Button,
                        Node {
                            align_self: AlignSelf::FlexEnd,
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                            ..default()
                        },
                        BackgroundColor(BUTTON_COLOR),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new("CLOSE"),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            });
        });
}

fn spawn_plaque_labels(mut commands: Commands) {
    for item in &CATALOG {
        let front = na::Vector3::new(
            PLAQUE_OFFSET[0],
            PLAQUE_OFFSET[1],
            PLAQUE_OFFSET[2] + PLAQUE_HALF_EXTENTS[2],
        );
        commands
            .spawn((
                Name::new(format!("Plaque label {}", item.title)),
                PlaqueLabel {
                    anchor: to_bevy_vec3(&item.frame_to_world(front)),
                },
                Node {
                    display: Display::None,
                    position_type: PositionType::Absolute,
                    width: Val::Px(LABEL_WIDTH),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(LABEL_BACKGROUND),
            ))
            .with_children(|label| {
                label.spawn((
                    Text::new(item.title),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(LABEL_TEXT),
                ));
                label.spawn((
                    Text::new(LABEL_SUBTITLE),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(LABEL_TEXT.with_alpha(0.8)),
                ));
            });
    }
}

/// Whether a plaque label is drawn. The modal covers the scene, so labels hide behind it.
fn label_visible(mode: UiMode, distance: f32, in_front: bool) -> bool {
    mode != UiMode::ContentOpen && in_front && distance <= LABEL_MAX_DISTANCE
}

fn place_plaque_labels(
    ui_state: Res<UiState>,
    camera: Single<(&Camera, &Transform), With<PlayerCamera>>,
    mut labels: Query<(&PlaqueLabel, &mut Node)>,
) {
    let (camera, transform) = *camera;
    let camera_global = GlobalTransform::from(*transform);
    let mode = ui_state.mode();

    for (label, mut node) in &mut labels {
        let to_label = label.anchor - transform.translation;
        let in_front = to_label.dot(*transform.forward()) > 0.0;
        let screen = camera.world_to_viewport(&camera_global, label.anchor).ok();

        match screen {
            Some(screen) if label_visible(mode, to_label.length(), in_front) => {
                node.display = Display::Flex;
                node.left = Val::Px(screen.x - LABEL_WIDTH / 2.0);
                node.top = Val::Px(screen.y);
            }
            _ => node.display = Display::None,
        }
    }
}

/// Show the section for the current mode and fill the modal with the active content.
fn sync_overlay(
    ui_state: Res<UiState>,
    asset_server: Res<AssetServer>,
    mut sections: Query<(&OverlaySection, &mut Node)>,
    mut title: Single<&mut Text, (With<ModalTitle>, Without<ModalBody>)>,
    mut body: Single<&mut Text, (With<ModalBody>, Without<ModalTitle>)>,
    mut image: Single<&mut ImageNode, With<ModalImage>>,
) {
    let mode = ui_state.mode();
    for (section, mut node) in &mut sections {
        node.display = if section.0 == mode {
            Display::Flex
        } else {
            Display::None
        };
    }

    let Some(item) = ui_state.active_content() else {
        return;
    };
    title.0 = item.title.to_string();
    body.0 = item.body.to_string();
    image.image = asset_server.load(item.image);
}

fn handle_close_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<CloseButton>)>,
    mut ui_state: ResMut<UiState>,
) {
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        ui_state.close_content();
        info!("Content closed");
    }
}

fn hover_close_button(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<CloseButton>)>,
) {
    for (interaction, mut background) in &mut buttons {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_show_only_near_and_ahead() {
        for mode in [UiMode::Exploring, UiMode::Paused] {
            assert!(label_visible(mode, 5.0, true));
            assert!(label_visible(mode, LABEL_MAX_DISTANCE, true));
            assert!(!label_visible(mode, LABEL_MAX_DISTANCE + 0.1, true));
            assert!(!label_visible(mode, 5.0, false));
        }
    }

    #[test]
    fn labels_hide_while_content_is_open() {
        assert!(!label_visible(UiMode::ContentOpen, 2.0, true));
    }

    #[test]
    fn every_item_gets_a_label_below_its_frame() {
        for item in &CATALOG {
            let front = na::Vector3::new(0.0, PLAQUE_OFFSET[1], PLAQUE_HALF_EXTENTS[2]);
            let anchor = to_bevy_vec3(&item.frame_to_world(front));
            assert!(anchor.y < item.translation[1]);
            // The label sits on the hall side of the frame centre.
            assert!(anchor.x.abs() < item.translation[0].abs());
        }
    }
}
