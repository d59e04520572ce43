use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the renderers and side-effecting
/// collaborators. Every default reproduces the fixed layout constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeatroConfig {
    pub svg: SvgConfig,
    pub image: ImageConfig,
    pub animation: AnimationConfig,
    pub score: ScoreConfig,
}

impl TeatroConfig {
    /// Reads a JSON configuration file. Missing sections fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Geometry of the SVG text emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub width: u32,
    pub line_height: u32,
    pub x: u32,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: 600,
            line_height: 20,
            x: 10,
            font_family: "monospace".to_string(),
            font_size: 14,
        }
    }
}

/// Canvas used by the image renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub first_baseline: u32,
    pub line_height: u32,
    pub font_family: String,
    pub font_size: u32,
    pub default_output: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x: 10,
            first_baseline: 30,
            line_height: 20,
            font_family: "monospace".to_string(),
            font_size: 16,
            default_output: PathBuf::from("output.png"),
        }
    }
}

/// Where frame sequences are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub output_dir: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Animations"),
        }
    }
}

/// External typesetting tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub program: String,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            program: "lilypond".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_layout() {
        let config = TeatroConfig::default();
        assert_eq!(config.svg.width, 600);
        assert_eq!(config.svg.line_height, 20);
        assert_eq!((config.image.width, config.image.height), (800, 600));
        assert_eq!(config.image.first_baseline, 30);
        assert_eq!(config.image.default_output, PathBuf::from("output.png"));
        assert_eq!(config.animation.output_dir, PathBuf::from("Animations"));
        assert_eq!(config.score.program, "lilypond");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = TeatroConfig::from_json(r#"{ "svg": { "width": 1024 } }"#).unwrap();
        assert_eq!(config.svg.width, 1024);
        assert_eq!(config.svg.font_size, 14);
        assert_eq!(config.image, ImageConfig::default());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teatro.json");
        std::fs::write(&path, r#"{ "score": { "program": "lily" } }"#).unwrap();

        let config = TeatroConfig::load(&path).unwrap();
        assert_eq!(config.score.program, "lily");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(TeatroConfig::from_json("{ not json").is_err());
    }
}
