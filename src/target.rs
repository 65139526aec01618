use crate::checks::origin::OriginPattern;
use crate::CheckError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Host prefix every `sourceRoot` must start with.
pub const DEFAULT_ORIGIN_PREFIX: &str = "https://raw.githubusercontent.com/ampproject/amphtml/";

/// Map produced for the classic (nomodule) bundle.
pub const CLASSIC_MAP: &str = "dist/v0.js.map";

/// Map produced for the module bundle.
pub const MODULE_MAP: &str = "dist/v0.mjs.map";

/// First source file pulled in by the entry module's import chain.
pub const DEFAULT_SENTINEL_FILE: &str = "src/polyfills/abort-controller.js";

/// First line of code in [`DEFAULT_SENTINEL_FILE`].
pub const DEFAULT_SENTINEL_CODE: &str = "class AbortController {";

/// Known first mapping of a bundle: the file and the code fragment the very
/// first mapped segment has to land on.
///
/// Both values change in lockstep with the entry module's import order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sentinel {
    pub file: String,
    pub code: String,
}

impl Sentinel {
    pub fn new(file: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            code: code.into(),
        }
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL_FILE, DEFAULT_SENTINEL_CODE)
    }
}

/// One source map artifact and the expectations it is checked against.
#[derive(Debug, Clone)]
pub struct VerificationTarget {
    pub name: String,
    /// Map path, relative to the verification root unless absolute.
    pub map: PathBuf,
    pub origin: OriginPattern,
    pub sentinel: Sentinel,
}

impl VerificationTarget {
    pub fn new(
        name: impl Into<String>,
        map: impl Into<PathBuf>,
        origin: OriginPattern,
        sentinel: Sentinel,
    ) -> Self {
        Self {
            name: name.into(),
            map: map.into(),
            origin,
            sentinel,
        }
    }

    /// The classic and module bundle maps. Both compile the same entry
    /// module, so they share origin and sentinel.
    pub fn defaults() -> Result<Vec<Self>, CheckError> {
        let origin = OriginPattern::new(DEFAULT_ORIGIN_PREFIX)?;
        Ok(vec![
            Self::new("classic", CLASSIC_MAP, origin.clone(), Sentinel::default()),
            Self::new("module", MODULE_MAP, origin, Sentinel::default()),
        ])
    }
}
