//! Configuration loading and root folder resolution

use crate::Result;
use std::path::{Path, PathBuf};

/// Resolved service configuration: the root folder plus the paths derived
/// from it (database file, static directory, sample directory).
#[derive(Debug, Clone)]
pub struct Config {
    pub root_folder: PathBuf,
}

impl Config {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("gridbeat.db")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root_folder.join("static")
    }

    /// Where uploaded sample files land; served back under `/samples`
    pub fn sample_dir(&self) -> PathBuf {
        self.static_dir().join("samples")
    }

    /// Create the root and static/sample directories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(self.sample_dir())?;
        Ok(())
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(config_path) = config_file_path() {
        if let Some(root_folder) = read_root_folder_from_toml(&config_path) {
            return root_folder;
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Default configuration file path for the platform
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("gridbeat").join("config.toml"));
    if let Some(path) = &user_config {
        if path.exists() {
            return user_config;
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/gridbeat/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

fn read_root_folder_from_toml(config_path: &Path) -> Option<PathBuf> {
    let content = std::fs::read_to_string(config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&content).ok()?;
    config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gridbeat"))
        .unwrap_or_else(|| PathBuf::from("./gridbeat_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let root = resolve_root_folder(Some("/tmp/gb-cli"), "GRIDBEAT_TEST_UNSET");
        assert_eq!(root, PathBuf::from("/tmp/gb-cli"));
    }

    #[test]
    fn derived_paths_hang_off_root() {
        let config = Config::new(PathBuf::from("/data/gridbeat"));
        assert_eq!(config.database_path(), PathBuf::from("/data/gridbeat/gridbeat.db"));
        assert_eq!(config.static_dir(), PathBuf::from("/data/gridbeat/static"));
        assert_eq!(
            config.sample_dir(),
            PathBuf::from("/data/gridbeat/static/samples")
        );
    }
}
