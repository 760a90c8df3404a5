use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, warn};

use clang_ast::navigation::DEFAULT_MAX_DEPTH;

/// Environment variable holding JSON configuration, read on first use.
pub const CONFIG_ENV: &str = "LIBCLANG_VIM_CONFIG";

/// Which comment text the comment query returns.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// The first paragraph, markup stripped
    #[default]
    Brief,
    /// The comment exactly as written
    Raw,
}

impl CommentStyle {
    pub fn key(self) -> &'static str {
        match self {
            CommentStyle::Brief => "brief",
            CommentStyle::Raw => "raw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub extra_args: Vec<String>,
    pub max_parent_depth: usize,
    pub comment_style: CommentStyle,
    /// `None` means unlimited
    pub completion_limit: Option<usize>,
    pub detailed_preprocessing_record: bool,
}

impl Default for Config {
    fn default() -> Self {
        UserConfig::default().into()
    }
}

/// Configuration as written by the user, camelCase JSON.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default)]
    pub extra_args: Vec<String>,
    #[serde(default = "default_max_parent_depth")]
    pub max_parent_depth: usize,
    #[serde(default)]
    pub comment_style: CommentStyle,
    #[serde(default)]
    pub completion_limit: usize,
    #[serde(default)]
    pub detailed_preprocessing_record: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            extra_args: Vec::new(),
            max_parent_depth: default_max_parent_depth(),
            comment_style: CommentStyle::default(),
            completion_limit: 0,
            detailed_preprocessing_record: false,
        }
    }
}

fn default_max_parent_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl From<UserConfig> for Config {
    fn from(user: UserConfig) -> Self {
        Self {
            extra_args: user
                .extra_args
                .into_iter()
                .filter(|arg| !arg.is_empty())
                .collect(),
            max_parent_depth: match user.max_parent_depth {
                0 => DEFAULT_MAX_DEPTH,
                depth => depth,
            },
            comment_style: user.comment_style,
            completion_limit: (user.completion_limit > 0).then_some(user.completion_limit),
            detailed_preprocessing_record: user.detailed_preprocessing_record,
        }
    }
}

impl UserConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

fn from_env() -> Config {
    let Ok(text) = std::env::var(CONFIG_ENV) else {
        return Config::default();
    };
    match UserConfig::from_json(&text) {
        Ok(user) => user.into(),
        Err(e) => {
            warn!("ignoring {}: {}", CONFIG_ENV, e);
            Config::default()
        }
    }
}

pub static GLOBAL_CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(from_env()));

pub fn initialize_config(config: UserConfig) {
    let mut global_config = GLOBAL_CONFIG.write();
    *global_config = config.into();
    debug!("config {:?}", global_config);
}

/// Replace the configuration from JSON text; on error the previous
/// configuration stays.
pub fn configure_from_json(text: &str) -> Result<(), serde_json::Error> {
    let config = UserConfig::from_json(text)?;
    initialize_config(config);
    Ok(())
}

/// Snapshot of the current configuration.
pub fn current() -> Config {
    GLOBAL_CONFIG.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = UserConfig::from_json("{}").unwrap().into();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_parent_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.comment_style, CommentStyle::Brief);
        assert_eq!(config.completion_limit, None);
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_camel_case_keys() {
        let user = UserConfig::from_json(
            r#"{"extraArgs": ["-std=c++17", ""], "maxParentDepth": 0,
                "commentStyle": "raw", "completionLimit": 20,
                "detailedPreprocessingRecord": true}"#,
        )
        .unwrap();
        let config = Config::from(user);
        assert_eq!(config.extra_args, vec!["-std=c++17"]);
        assert_eq!(config.max_parent_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.comment_style, CommentStyle::Raw);
        assert_eq!(config.completion_limit, Some(20));
        assert!(config.detailed_preprocessing_record);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(UserConfig::from_json(r#"{"commentStyle": "fancy"}"#).is_err());
        assert!(UserConfig::from_json("not json").is_err());
    }
}
