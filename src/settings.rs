use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::renderer::camera::{AspectMode, DEFAULT_ORBIT_STEP};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default = "ViewerSettings::default_mesh_path")]
    pub mesh_path: PathBuf,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub present_mode: PresentModeSetting,
    #[serde(default = "ViewerSettings::default_orbit_step")]
    pub orbit_step: f32,
    #[serde(default)]
    pub aspect_mode: AspectMode,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            mesh_path: Self::default_mesh_path(),
            resolution: Resolution::default(),
            present_mode: PresentModeSetting::default(),
            orbit_step: Self::default_orbit_step(),
            aspect_mode: AspectMode::default(),
        }
    }
}

impl ViewerSettings {
    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => {
                    info!("Loaded viewer settings from {:?}", path);
                    settings
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default viewer settings.",
                        path, err
                    );
                    ViewerSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Viewer settings file {:?} not found. Using default settings.",
                    path
                );
                ViewerSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default viewer settings.",
                    path, err
                );
                ViewerSettings::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ViewerSettings>(contents).map(Self::validate)
    }

    fn validate(mut self) -> Self {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            warn!("Resolution must be greater than zero. Using default resolution.");
            self.resolution = Resolution::default();
        }

        if !(self.orbit_step.is_finite() && self.orbit_step > 0.0) {
            warn!("Orbit step must be positive and finite. Using default value.");
            self.orbit_step = Self::default_orbit_step();
        }

        self
    }

    pub fn present_mode(&self, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
        let desired = self.present_mode.to_wgpu();
        if available.contains(&desired) {
            return desired;
        }

        warn!(
            "Requested present mode {:?} is not supported. Falling back to FIFO.",
            desired
        );

        if available.contains(&wgpu::PresentMode::Fifo) {
            wgpu::PresentMode::Fifo
        } else {
            available
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo)
        }
    }

    fn default_mesh_path() -> PathBuf {
        PathBuf::from("assets/model.glb")
    }

    const fn default_orbit_step() -> f32 {
        DEFAULT_ORBIT_STEP
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentModeSetting {
    #[default]
    Fifo,
    FifoRelaxed,
    Immediate,
    Mailbox,
    AutoVsync,
    AutoNoVsync,
}

impl PresentModeSetting {
    fn to_wgpu(&self) -> wgpu::PresentMode {
        match self {
            PresentModeSetting::Fifo => wgpu::PresentMode::Fifo,
            PresentModeSetting::FifoRelaxed => wgpu::PresentMode::FifoRelaxed,
            PresentModeSetting::Immediate => wgpu::PresentMode::Immediate,
            PresentModeSetting::Mailbox => wgpu::PresentMode::Mailbox,
            PresentModeSetting::AutoVsync => wgpu::PresentMode::AutoVsync,
            PresentModeSetting::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let settings = ViewerSettings::from_json("{}").unwrap();
        assert_eq!(settings.mesh_path, PathBuf::from("assets/model.glb"));
        assert_eq!(settings.orbit_step, DEFAULT_ORBIT_STEP);
        assert_eq!(settings.aspect_mode, AspectMode::WidthOverHeight);
        assert_eq!(settings.resolution.width, 1280);
    }

    #[test]
    fn json_fields_are_read() {
        let settings = ViewerSettings::from_json(
            r#"{
                "mesh_path": "models/skull.glb",
                "orbit_step": 0.01,
                "aspect_mode": "height_over_width",
                "present_mode": "mailbox",
                "resolution": { "width": 800, "height": 600 }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.mesh_path, PathBuf::from("models/skull.glb"));
        assert_eq!(settings.orbit_step, 0.01);
        assert_eq!(settings.aspect_mode, AspectMode::HeightOverWidth);
        assert_eq!(settings.resolution.height, 600);
        assert!(matches!(settings.present_mode, PresentModeSetting::Mailbox));
    }

    #[test]
    fn validate_replaces_invalid_values_with_defaults() {
        let settings = ViewerSettings {
            resolution: Resolution {
                width: 0,
                height: 0,
            },
            orbit_step: f32::NAN,
            ..ViewerSettings::default()
        };
        let validated = settings.validate();

        assert_eq!(validated.resolution.width, Resolution::default().width);
        assert_eq!(validated.resolution.height, Resolution::default().height);
        assert_eq!(validated.orbit_step, DEFAULT_ORBIT_STEP);

        for step in [-0.5, 0.0] {
            let settings = ViewerSettings {
                orbit_step: step,
                ..ViewerSettings::default()
            };
            assert_eq!(settings.validate().orbit_step, DEFAULT_ORBIT_STEP);
        }
    }

    #[test]
    fn negative_orbit_step_in_json_is_replaced() {
        let settings = ViewerSettings::from_json(r#"{ "orbit_step": -0.5 }"#).unwrap();
        assert_eq!(settings.orbit_step, DEFAULT_ORBIT_STEP);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = ViewerSettings::load_from_path("does/not/exist/settings.json");
        assert_eq!(settings.orbit_step, DEFAULT_ORBIT_STEP);
    }

    #[test]
    fn present_mode_returns_desired_when_available() {
        let settings = ViewerSettings {
            present_mode: PresentModeSetting::Mailbox,
            ..ViewerSettings::default()
        };

        let available = [
            wgpu::PresentMode::Fifo,
            wgpu::PresentMode::Mailbox,
            wgpu::PresentMode::Immediate,
        ];

        assert_eq!(
            settings.present_mode(&available),
            wgpu::PresentMode::Mailbox
        );
    }

    #[test]
    fn present_mode_falls_back_to_fifo_when_desired_missing() {
        let settings = ViewerSettings {
            present_mode: PresentModeSetting::Mailbox,
            ..ViewerSettings::default()
        };

        let available = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate];

        assert_eq!(settings.present_mode(&available), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn present_and_aspect_modes_round_trip_through_json() {
        let settings = ViewerSettings {
            present_mode: PresentModeSetting::Immediate,
            aspect_mode: AspectMode::HeightOverWidth,
            ..ViewerSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""present_mode":"immediate""#), "{}", json);
        assert!(json.contains(r#""aspect_mode":"height_over_width""#), "{}", json);

        let reloaded = ViewerSettings::from_json(&json).unwrap();
        assert!(matches!(reloaded.present_mode, PresentModeSetting::Immediate));
        assert_eq!(reloaded.aspect_mode, AspectMode::HeightOverWidth);
        assert_eq!(reloaded.mesh_path, settings.mesh_path);
        assert_eq!(
            reloaded.present_mode(&[wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate]),
            wgpu::PresentMode::Immediate
        );
    }

    #[test]
    fn present_mode_uses_first_available_when_fifo_missing() {
        let settings = ViewerSettings {
            present_mode: PresentModeSetting::Mailbox,
            ..ViewerSettings::default()
        };

        let available = [wgpu::PresentMode::Immediate];

        assert_eq!(
            settings.present_mode(&available),
            wgpu::PresentMode::Immediate
        );
    }
}
