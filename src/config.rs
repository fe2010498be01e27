use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors raised while loading an engine profile
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open engine profile '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("engine profile '{path}' is not a valid rule/record settings file: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    pub rules: RuleRules,
    pub records: RecordRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            rules: RuleRules::default(),
            records: RecordRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleRules {
    /// Reject rule files containing regex literals that do not compile.
    pub validate_regex: bool,
}

impl Default for RuleRules {
    fn default() -> Self {
        Self {
            validate_regex: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordRules {
    /// Use `content` as the JSON payload when it holds a JSON object.
    pub parse_json_content: bool,
}

impl Default for RecordRules {
    fn default() -> Self {
        Self {
            parse_json_content: true,
        }
    }
}

/// Settings for the matcher engine: the profile at `path`, or the built-in base profile.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(default_config().clone());
    };
    let config = load_config_from_path(path)?;
    tracing::debug!(
        profile = %config.profile_name,
        validate_regex = config.rules.validate_regex,
        parse_json_content = config.records.parse_json_content,
        "engine profile loaded"
    );
    Ok(config)
}

/// Read a TOML engine profile. Sections left out keep their base values.
pub fn load_config_from_path(path: &Path) -> Result<EngineConfig, ConfigError> {
    let shown = || path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: shown(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: shown(),
        source,
    })
}

/// The base profile: regexes are validated and JSON content is lifted into the payload.
pub fn default_config() -> &'static EngineConfig {
    static BASE_PROFILE: LazyLock<EngineConfig> = LazyLock::new(EngineConfig::default);
    &BASE_PROFILE
}
