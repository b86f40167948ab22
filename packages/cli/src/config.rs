use clap::ValueEnum;
use gotex_compiler_tex::ModeSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "gotex.config.json";

/// gotex configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory receiving the generated .tex files
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Emit psgo's \pass directive (needs psgo 0.14)
    #[serde(default = "default_use_pass")]
    pub use_pass: bool,

    /// Sequence mode for game diagrams
    #[serde(default)]
    pub mode: ModeName,

    /// Export the final position instead of the move sequence
    #[serde(default)]
    pub position: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    /// Annotated when the record has overlays, strict otherwise
    #[default]
    Auto,
    /// Stop at the first move that cannot be drawn
    Strict,
    /// Draw every move and annotate the rest
    Annotated,
}

impl From<ModeName> for ModeSelection {
    fn from(mode: ModeName) -> Self {
        match mode {
            ModeName::Auto => ModeSelection::Auto,
            ModeName::Strict => ModeSelection::Strict,
            ModeName::Annotated => ModeSelection::Annotated,
        }
    }
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_use_pass() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            use_pass: default_use_pass(),
            mode: ModeName::Auto,
            position: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "outDir": "diagrams",
            "usePass": false,
            "mode": "annotated",
            "position": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.out_dir, "diagrams");
        assert!(!config.use_pass);
        assert_eq!(config.mode, ModeName::Annotated);
        assert!(config.position);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "mode": "strict" }"#).unwrap();
        assert_eq!(config.out_dir, "dist");
        assert!(config.use_pass);
        assert_eq!(config.mode, ModeName::Strict);
        assert!(!config.position);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.out_dir, "dist");
        assert!(config.use_pass);
        assert_eq!(config.mode, ModeName::Auto);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.out_dir, "dist");
    }
}
