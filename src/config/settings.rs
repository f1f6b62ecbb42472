//! Configuration file support for minikube-mcp

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub minikube: MinikubeSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// Settings for the managed minikube binary
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MinikubeSettings {
    /// Binary name or path; resolved on PATH when not absolute
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Optional profile name, passed as `-p` to every invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Extra flags appended to `minikube start`, written shell-style,
    /// e.g. `"--driver=docker --memory=4g"`
    #[serde(default)]
    pub start_flags: String,
}

/// Identity advertised during the protocol handshake
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_server_version")]
    pub version: String,
}

fn default_binary() -> String {
    "minikube".to_string()
}

fn default_server_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for MinikubeSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            profile: None,
            start_flags: String::new(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
        }
    }
}

impl MinikubeSettings {
    /// Split `start_flags` into argv items
    pub fn parsed_start_flags(&self) -> Result<Vec<String>> {
        shell_words::split(&self.start_flags)
            .with_context(|| format!("Failed to parse start_flags: {}", self.start_flags))
    }
}

impl Settings {
    /// Load settings from file or return defaults
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_file() {
            Self::load_from_file(&path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .minikube-mcp.toml in current directory
    /// 2. ~/.config/minikube-mcp/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".minikube-mcp.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("minikube-mcp").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.minikube.binary, "minikube");
        assert!(settings.minikube.profile.is_none());
        assert_eq!(settings.server.name, "minikube-mcp");
    }

    #[test]
    fn test_settings_deserialization() {
        let toml_str = r#"
[minikube]
binary = "/usr/local/bin/minikube"
profile = "demo"
start_flags = "--driver=docker"

[server]
name = "custom-name"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.minikube.binary, "/usr/local/bin/minikube");
        assert_eq!(settings.minikube.profile.as_deref(), Some("demo"));
        assert_eq!(settings.server.name, "custom-name");
        assert_eq!(settings.server.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_start_flags_split_shell_style() {
        let minikube = MinikubeSettings {
            start_flags: r#"--driver=docker --extra-config "a b""#.to_string(),
            ..Default::default()
        };

        let flags = minikube.parsed_start_flags().unwrap();
        assert_eq!(flags, vec!["--driver=docker", "--extra-config", "a b"]);
    }

    #[test]
    fn test_empty_start_flags() {
        let minikube = MinikubeSettings::default();
        assert!(minikube.parsed_start_flags().unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced_start_flags_rejected() {
        let minikube = MinikubeSettings {
            start_flags: r#"--driver="unterminated"#.to_string(),
            ..Default::default()
        };
        assert!(minikube.parsed_start_flags().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(b"[minikube]\nprofile = \"ci\"\n").unwrap();

        let settings = Settings::load_from_file(&temp.path().to_path_buf()).unwrap();
        assert_eq!(settings.minikube.profile.as_deref(), Some("ci"));
        assert_eq!(settings.minikube.binary, "minikube");
    }
}
