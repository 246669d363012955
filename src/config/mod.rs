use serde::Deserialize;
use std::path::PathBuf;

fn default_verbose() -> bool {
    false
}

/// Optional file configuration, merged under CLI flags.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Path of the zone store file
    #[serde(default)]
    pub store: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    /// Load the first parseable config file from the search paths.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polyzone.toml"));
    paths.push(PathBuf::from(".polyzone.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polyzone").join("config.toml"));
        paths.push(config_dir.join("polyzone.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polyzone.toml"));
        paths.push(home.join(".config").join("polyzone").join("config.toml"));
    }

    paths
}

/// Where zones live when neither the CLI nor a config file says otherwise.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("polyzone").join("zones.json"))
        .unwrap_or_else(|| PathBuf::from("zones.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_config() {
        let config: FileConfig =
            toml::from_str("store = \"/tmp/zones.json\"\nverbose = true").unwrap();
        assert_eq!(config.store, Some(PathBuf::from("/tmp/zones.json")));
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.store.is_none());
        assert!(!config.verbose);
    }
}
