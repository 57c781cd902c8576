//! JSON runtime configuration for the `lane_finder` binary.
use crate::detector::LaneParams;
use crate::error::{LaneError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub image: Option<ImageJob>,
    #[serde(default)]
    pub video: Option<VideoJob>,
    #[serde(default)]
    pub params: LaneParams,
}

/// Still-image job: process one picture and write the result plus a report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Also write every intermediate stage.
    #[serde(default)]
    pub save_stages: bool,
}

/// Video job. Either side may be a directory of stills or, with the
/// `video-file` feature, a container file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Output frame rate when the source does not report one.
    #[serde(default)]
    pub fps: Option<f64>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let data = fs::read_to_string(path).map_err(|source| LaneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RuntimeConfig = serde_json::from_str(&data).map_err(|source| LaneError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    config.params.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_default_params() {
        let json = r#"{ "image": { "input": "a.jpg", "output_dir": "out" } }"#;
        let config: RuntimeConfig = serde_json::from_str(json).unwrap();
        let image = config.image.unwrap();
        assert_eq!(image.input, PathBuf::from("a.jpg"));
        assert!(!image.save_stages);
        assert!(config.video.is_none());
        assert_eq!(config.params, LaneParams::default());
    }

    #[test]
    fn invalid_params_fail_loading() {
        let path = std::env::temp_dir().join(format!("lane_cfg_{}.json", std::process::id()));
        fs::write(&path, r#"{ "params": { "line_thickness": 0 } }"#).unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, LaneError::InvalidParams(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/lane.json")).unwrap_err();
        assert!(matches!(err, LaneError::Io { .. }));
    }
}
