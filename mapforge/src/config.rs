//! Optional `mapforge.toml` settings.
//!
//! Every key has a default, and a missing or unreadable file only costs a warning: the tool
//! then runs with the built-in defaults. Command line flags override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use mapforge_data::TeamOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

pub const CONFIG_FILE: &str = "mapforge.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Where `build` writes a fresh map.
    pub output: PathBuf,
    /// Default target for `append`.
    pub map: Option<PathBuf>,
    /// Where `preview` writes the trigger graph page.
    pub preview: PathBuf,
    /// Directory holding the rules, eva and sound INI files read by `catalog`.
    pub ini_dir: PathBuf,
    pub catalog_dest: PathBuf,
    /// File name suffix of the catalog sources, e.g. `md` for `rulesmd.ini`.
    pub suffix: String,
    /// Option block every new team starts from.
    pub team_defaults: TeamOptions,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("Output/map.ini"),
            map: None,
            preview: PathBuf::from("Output/preview.html"),
            ini_dir: PathBuf::from("Ini"),
            catalog_dest: PathBuf::from("catalog.rs"),
            suffix: "md".to_string(),
            team_defaults: TeamOptions::default(),
        }
    }
}

impl ForgeConfig {
    /// Load settings from `path`, falling back to defaults on any error.
    ///
    /// A missing file is expected and only logged at info level; a file that exists but does
    /// not parse is reported with `warn!`.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("no config at '{}', using defaults", path.display());
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => {
                info!("settings loaded from '{}'", path.display());
                config
            },
            Err(e) => {
                warn!("Could not load settings from '{}': {e}. Using defaults.", path.display());
                Self::default()
            },
        }
    }

    /// Strict variant of [`ForgeConfig::load`].
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Config` if it is not valid TOML for these settings.
    pub fn try_load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// # Errors
    /// `Config` when `text` is not valid TOML for these settings.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ForgeError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ForgeConfig::parse("output = \"out/a.ini\"\n[team_defaults]\npriority = 30\n")
            .expect("valid config");
        assert_eq!(config.output, PathBuf::from("out/a.ini"));
        assert_eq!(config.suffix, "md");
        assert_eq!(config.team_defaults.priority, 30);
        assert_eq!(config.team_defaults.max, 5);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            ForgeConfig::parse("output = ["),
            Err(ForgeError::Config(_))
        ));
    }

    #[test]
    fn load_falls_back_on_bad_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "suffix = 12").expect("write");
        assert_eq!(ForgeConfig::load(file.path()), ForgeConfig::default());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = ForgeConfig::load(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, ForgeConfig::default());
    }
}
