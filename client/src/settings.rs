use bevy::prelude::*;

/// Mouse-look radians per pixel of mouse motion.
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

/// Vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;

const FOV_RANGE_DEGREES: std::ops::RangeInclusive<f32> = 20.0..=120.0;

/// Runtime settings read once at startup.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct GallerySettings {
    pub sensitivity: f32,
    pub fov_degrees: f32,
    /// Draw the player capsule and foot sensor.
    pub debug_physics: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            fov_degrees: DEFAULT_FOV_DEGREES,
            debug_physics: false,
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    let settings = read_settings_from_cli_env();
    info!(
        "Settings: sensitivity {} rad/px, fov {} deg, physics debug {}",
        settings.sensitivity, settings.fov_degrees, settings.debug_physics
    );
    app.insert_resource(settings);
}

fn read_settings_from_cli_env() -> GallerySettings {
    parse_settings(std::env::args().skip(1), |key| std::env::var(key).ok())
}

/// Build settings from CLI args, falling back to the environment.
///
/// Supported:
///   --sensitivity <f32>
///   --sensitivity=<f32>
///   --fov <degrees>
///   --fov=<degrees>
///   --debug-physics
///   GALLERY_SENSITIVITY and GALLERY_FOV environment variables
///
/// Unparseable or out of range values keep the default.
fn parse_settings(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> GallerySettings {
    let mut sensitivity: Option<String> = None;
    let mut fov: Option<String> = None;
    let mut debug_physics = false;

    let mut pending_key: Option<&'static str> = None;
    for arg in args {
        if let Some(key) = pending_key.take() {
            if key == "sensitivity" {
                sensitivity = Some(arg);
            } else if key == "fov" {
                fov = Some(arg);
            }
        } else if arg == "--sensitivity" {
            pending_key = Some("sensitivity");
        } else if let Some(val) = arg.strip_prefix("--sensitivity=") {
            sensitivity = Some(val.to_string());
        } else if arg == "--fov" {
            pending_key = Some("fov");
        } else if let Some(val) = arg.strip_prefix("--fov=") {
            fov = Some(val.to_string());
        } else if arg == "--debug-physics" {
            debug_physics = true;
        }
    }

    let sensitivity = sensitivity.or_else(|| env("GALLERY_SENSITIVITY"));
    let fov = fov.or_else(|| env("GALLERY_FOV"));

    GallerySettings {
        sensitivity: parse_value(sensitivity, "sensitivity", DEFAULT_SENSITIVITY, |v| v > 0.0),
        fov_degrees: parse_value(fov, "fov", DEFAULT_FOV_DEGREES, |v| {
            FOV_RANGE_DEGREES.contains(&v)
        }),
        debug_physics,
    }
}

fn parse_value(
    raw: Option<String>,
    name: &str,
    default: f32,
    valid: impl Fn(f32) -> bool,
) -> f32 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() && valid(value) => value,
        _ => {
            warn!("Ignoring invalid {name} value {raw:?}; using {default}");
            default
        }
    }
}
