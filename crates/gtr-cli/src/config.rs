//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON project index.
    pub project_index: PathBuf,
    /// Notes ref holding time data.
    pub notes_ref: String,
    /// git executable to run.
    pub git_binary: PathBuf,
    /// Abort report queries after this many seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let index_dir = dirs_index_path().unwrap_or_else(|| PathBuf::from(".git-time-metric"));
        Self {
            project_index: index_dir.join("project.json"),
            notes_ref: gtr_git::DEFAULT_NOTES_REF.to_string(),
            git_binary: PathBuf::from("git"),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (GTR_*)
        figment = figment.merge(Env::prefixed("GTR_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for gtr.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gtr"))
}

/// Returns the directory the time-metric recorder keeps its project index in.
///
/// On Linux: `~/.git-time-metric`
pub fn dirs_index_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".git-time-metric"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_index_path_returns_some() {
        assert!(dirs_index_path().is_some());
    }

    #[test]
    fn test_default_config_uses_index_dir() {
        let config = Config::default();
        let index_dir = dirs_index_path().unwrap();
        assert_eq!(config.project_index, index_dir.join("project.json"));
        assert_eq!(config.notes_ref, "gtm-data");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("gtr.toml");
        std::fs::write(
            &path,
            "project_index = \"/data/index.json\"\nnotes_ref = \"time\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.project_index, PathBuf::from("/data/index.json"));
        assert_eq!(config.notes_ref, "time");
        assert_eq!(config.git_binary, PathBuf::from("git"));
        assert_eq!(config.timeout_secs, Some(5));
    }
}
