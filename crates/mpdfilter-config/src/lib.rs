use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use mpdfilter_core::{Features, Operator};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "mpdfilter";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TAG: &str = "any";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_tag: String,
    pub default_operator: Operator,
    pub features: Features,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            default_operator: Operator::Contains,
            features: Features::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid default_tag value: {0:?}")]
    InvalidDefaultTag(String),
    #[error("invalid default_operator value: {0:?}")]
    InvalidDefaultOperator(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_tag: Option<String>,
    default_operator: Option<String>,
    features: Option<FeaturesFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeaturesFile {
    starts_with: Option<bool>,
    pcre: Option<bool>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(tag) = parsed.default_tag {
        if !is_valid_tag(&tag) {
            return Err(ConfigError::InvalidDefaultTag(tag));
        }
        config.default_tag = tag;
    }

    if let Some(operator) = parsed.default_operator {
        if operator.is_empty() || operator.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidDefaultOperator(operator));
        }
        config.default_operator = Operator::from(operator);
    }

    if let Some(features) = parsed.features {
        if let Some(starts_with) = features.starts_with {
            config.features.starts_with = starts_with;
        }
        if let Some(pcre) = features.pcre {
            config.features.pcre = pcre;
        }
    }

    Ok(config)
}

// Tags are written bare into expressions, so they must stay a single word.
fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile, FeaturesFile};
    use mpdfilter_core::Operator;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            default_tag: Some("Artist".to_string()),
            default_operator: Some("starts_with".to_string()),
            features: Some(FeaturesFile {
                starts_with: Some(false),
                pcre: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.default_tag, "Artist");
        assert_eq!(merged.default_operator, Operator::StartsWith);
        assert!(!merged.features.starts_with);
        assert!(merged.features.pcre);
    }

    #[test]
    fn merge_config_defaults() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert_eq!(merged.default_tag, "any");
        assert_eq!(merged.default_operator, Operator::Contains);
        assert!(merged.features.starts_with);
        assert!(merged.features.pcre);
    }

    #[test]
    fn merge_config_rejects_bad_tag() {
        let parsed = ConfigFile {
            default_tag: Some("album artist".to_string()),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDefaultTag(tag) if tag == "album artist"));

        let parsed = ConfigFile {
            default_tag: Some("Künstler".to_string()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidDefaultTag(_)
        ));
    }

    #[test]
    fn merge_config_rejects_blank_operator() {
        let parsed = ConfigFile {
            default_operator: Some(String::new()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed).unwrap_err(),
            ConfigError::InvalidDefaultOperator(_)
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "default_operator = \"==\"\n[features]\nstarts_with = false\npcre = false\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.default_tag, "any");
        assert_eq!(config.default_operator, Operator::Equal);
        assert!(!config.features.starts_with);
        assert!(!config.features.pcre);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[features]\nregex = true\n").expect("write config");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
