//! Scene description files
//!
//! A [`SceneDescription`] is a camera plus [`RenderSettings`], stored as TOML
//! or JSON. The format is picked from the file extension.

use crate::camera::Camera;
use crate::params::{FrameParameters, RenderSettings};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported description formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(Error::UnsupportedFormat(other.to_string())),
            None => Err(Error::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
        }
    }
}

/// Everything the host needs to set up a frame, minus the output resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: Camera,
    pub settings: RenderSettings,
}

impl SceneDescription {
    /// Parse from a string in the given format
    pub fn parse(source: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(source)?),
            ConfigFormat::Json => Ok(serde_json::from_str(source)?),
        }
    }

    /// Serialize to a string in the given format
    pub fn to_text(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Load from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let source = std::fs::read_to_string(path)?;
        let scene = Self::parse(&source, format)?;
        tracing::debug!("Loaded scene description from {}", path.display());
        Ok(scene)
    }

    /// Save to a `.toml` or `.json` file
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path)?;
        std::fs::write(path, self.to_text(format)?)?;
        Ok(())
    }

    /// Freeze into frame parameters for an output of `width` x `height`.
    pub fn frame(&self, width: u32, height: u32) -> FrameParameters {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        FrameParameters::new(&self.camera, aspect, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("scene.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/b.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("scene.yaml")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(ConfigFormat::from_path(Path::new("scene")).is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let source = r#"
            [camera]
            position = [0.0, 0.0, 0.0]
            target = [0.0, 0.0, 5.0]

            [settings.march]
            max_iterations = 100

            [settings.sdf]
            sphere1 = [0.0, 0.0, 5.0, 1.0]
        "#;
        let scene = SceneDescription::parse(source, ConfigFormat::Toml).unwrap();

        assert_eq!(scene.camera.target, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(scene.camera.fov_degrees, Camera::default().fov_degrees);
        assert_eq!(scene.settings.march.max_iterations, 100);
        assert_eq!(scene.settings.march.accuracy, 0.01);
        assert_eq!(scene.settings.sdf.sphere1, Vec4::new(0.0, 0.0, 5.0, 1.0));
        assert_eq!(scene.settings.light.direction, Vec3::NEG_Y);
    }

    #[test]
    fn json_is_accepted() {
        let source = r#"{ "settings": { "shadow": { "penumbra": 32.0 } } }"#;
        let scene = SceneDescription::parse(source, ConfigFormat::Json).unwrap();
        assert_eq!(scene.settings.shadow.penumbra, 32.0);
        assert_eq!(scene.camera, Camera::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SceneDescription::parse("[camera\nfov", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, Error::TomlDe(_)));
    }

    #[test]
    fn frame_uses_output_aspect() {
        let scene = SceneDescription::default();
        let frame = scene.frame(200, 100);
        let expected = scene.camera.frustum(2.0);
        assert_eq!(frame.frustum, expected);
    }
}
