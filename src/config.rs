use crate::builder::{CommandBuild, DEFAULT_BUILD_ARGS, DEFAULT_BUILD_PROGRAM};
use crate::checks::OriginPattern;
use crate::logging;
use crate::target::{Sentinel, VerificationTarget, CLASSIC_MAP, DEFAULT_ORIGIN_PREFIX, MODULE_MAP};
use crate::CheckError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".sourcemap-check.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Working tree that map and source paths are resolved against
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub origin: OriginConfig,
    #[serde(default)]
    pub sentinel: Option<Sentinel>,
    /// Source maps to verify; the classic and module bundles when empty
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OriginConfig {
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    pub map: PathBuf,
    #[serde(default)]
    pub origin_prefix: Option<String>,
    #[serde(default)]
    pub sentinel: Option<Sentinel>,
}

impl Config {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        logging::log_loading_config(&path.to_string_lossy());

        let content = fs::read_to_string(path).map_err(|e| {
            CheckError::InvalidConfig(format!("failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml(&content).map_err(|e| {
            CheckError::InvalidConfig(format!("failed to parse TOML config from {:?}: {}", path, e))
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the default config file if present, falling back to defaults on error
    pub fn load_or_default() -> Self {
        match Self::load(Path::new(DEFAULT_CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    /// The build command, with defaults filled in.
    pub fn build_command(&self) -> CommandBuild {
        let program = self
            .build
            .command
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_PROGRAM.to_string());
        let args = self
            .build
            .args
            .clone()
            .unwrap_or_else(|| DEFAULT_BUILD_ARGS.iter().map(|s| s.to_string()).collect());
        CommandBuild::new(program, args)
    }

    /// Resolve configured targets in declaration order.
    pub fn targets(&self) -> Result<Vec<VerificationTarget>, CheckError> {
        let prefix = self
            .origin
            .prefix
            .as_deref()
            .unwrap_or(DEFAULT_ORIGIN_PREFIX);
        let origin = OriginPattern::new(prefix)?;
        let sentinel = self.sentinel.clone().unwrap_or_default();

        if self.targets.is_empty() {
            return Ok(vec![
                VerificationTarget::new("classic", CLASSIC_MAP, origin.clone(), sentinel.clone()),
                VerificationTarget::new("module", MODULE_MAP, origin, sentinel),
            ]);
        }

        self.targets
            .iter()
            .map(|t| -> Result<VerificationTarget, CheckError> {
                let origin = match &t.origin_prefix {
                    Some(prefix) => OriginPattern::new(prefix.as_str())?,
                    None => origin.clone(),
                };
                let sentinel = t.sentinel.clone().unwrap_or_else(|| sentinel.clone());
                Ok(VerificationTarget::new(
                    t.name.clone(),
                    t.map.clone(),
                    origin,
                    sentinel,
                ))
            })
            .collect()
    }
}
