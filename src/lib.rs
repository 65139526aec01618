pub mod builder;
pub mod checks;
pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod sourcemap;
pub mod target;
pub mod ui;
pub mod verifier;

use checks::Check;
use miette::Diagnostic;
use sourcemap::VlqError;
use std::path::PathBuf;

pub use pipeline::Pipeline;
pub use sourcemap::SourceMapDocument;
pub use target::{Sentinel, VerificationTarget};
pub use verifier::{VerificationReport, Verifier, VerifyMode};

/// Result type alias for the command layer
pub type Result<T> = miette::Result<T>;

/// Error types raised while building or verifying source maps
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum CheckError {
    #[error("Could not find source map at {}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::missing_artifact),
        help("Build the bundle first, or drop --nobuild so the build step regenerates the maps.")
    )]
    MissingArtifact { path: PathBuf },

    #[error("Malformed source map {}: {reason}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::malformed_artifact),
        help("The map must be a JSON object with a string `mappings` and an array of string `sources`.")
    )]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("Could not decode mappings in {}: {source}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::malformed_mappings),
        help("The `mappings` field must be a valid base64 VLQ string; the bundler output is likely corrupt.")
    )]
    MalformedMappings { path: PathBuf, source: VlqError },

    #[error("Could not find sourceRoot in {}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::missing_origin_url),
        help("Source maps must carry a sourceRoot so error reports resolve to a specific build.")
    )]
    MissingOriginUrl { path: PathBuf },

    #[error("Badly formatted sourceRoot in {}: {actual:?} does not match {expected}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::malformed_origin_url),
        help("The sourceRoot must be the origin prefix followed by a 13-digit build identifier and a trailing '/'.")
    )]
    MalformedOriginUrl {
        path: PathBuf,
        actual: String,
        expected: String,
    },

    #[error("Found {} invalid source path(s) in {}: {}", .invalid.len(), .path.display(), .invalid.join(", "))]
    #[diagnostic(
        code(sourcemap_check::invalid_source_paths),
        help("Every non-synthetic entry in `sources` must exist relative to the working tree.")
    )]
    InvalidSourcePaths { path: PathBuf, invalid: Vec<String> },

    #[error("Source index {index} on generated line {line} of {} is out of range ({len} sources)", .path.display())]
    #[diagnostic(
        code(sourcemap_check::source_index_out_of_bounds),
        help("A mapping segment references a `sources` entry that does not exist.")
    )]
    SourceIndexOutOfBounds {
        path: PathBuf,
        line: usize,
        index: u32,
        len: usize,
    },

    #[error("Could not resolve the first mapped line of {}: {reason}", .path.display())]
    #[diagnostic(
        code(sourcemap_check::sentinel_unresolved),
        help("The first mapped segment must point at a readable line of an original source file.")
    )]
    SentinelUnresolved { path: PathBuf, reason: String },

    #[error(
        "Mappings in {} do not match the first line of code\n  actual:   {actual_file} {actual_code:?}\n  expected: {expected_file} {expected_code:?}",
        .path.display()
    )]
    #[diagnostic(
        code(sourcemap_check::sentinel_mismatch),
        help("If this is an intentional consequence of reordering the entry module's imports, update `sentinel.file` and `sentinel.code` in .sourcemap-check.toml (or the built-in defaults in src/target.rs).")
    )]
    SentinelMismatch {
        path: PathBuf,
        actual_file: String,
        actual_code: String,
        expected_file: String,
        expected_code: String,
    },

    #[error("Build command `{command}` failed: {reason}")]
    #[diagnostic(
        code(sourcemap_check::build_failed),
        help("Fix the build, or rerun with --nobuild to check maps that are already on disk.")
    )]
    BuildFailed { command: String, reason: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(sourcemap_check::invalid_config),
        help("Check the TOML syntax and field names in the configuration file.")
    )]
    InvalidConfig(String),
}

impl CheckError {
    /// The verification stage that raised this error, if any.
    pub fn check(&self) -> Option<Check> {
        match self {
            CheckError::MissingArtifact { .. } | CheckError::MalformedArtifact { .. } => {
                Some(Check::Load)
            }
            CheckError::MissingOriginUrl { .. } | CheckError::MalformedOriginUrl { .. } => {
                Some(Check::Origin)
            }
            CheckError::InvalidSourcePaths { .. } => Some(Check::Sources),
            CheckError::MalformedMappings { .. }
            | CheckError::SourceIndexOutOfBounds { .. }
            | CheckError::SentinelUnresolved { .. }
            | CheckError::SentinelMismatch { .. } => Some(Check::Sentinel),
            CheckError::BuildFailed { .. } | CheckError::InvalidConfig(_) => None,
        }
    }
}
