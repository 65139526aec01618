use crate::sourcemap::vlq::{self, DecodedMappings, Segment};
use crate::CheckError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Only revision 3 of the source map format is understood.
pub const SUPPORTED_VERSION: u32 = 3;

/// Parsed form of a source map artifact.
///
/// `sources` and `mappings` are required at load time. `sourceRoot` is
/// optional here so that its absence is reported by the origin check
/// rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMapDocument {
    /// Read and parse the map at `path`.
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        if !path.is_file() {
            return Err(CheckError::MissingArtifact {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| CheckError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: format!("failed to read file: {}", e),
        })?;

        Self::from_json(&content).map_err(|reason| CheckError::MalformedArtifact {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse a map from JSON text. The error string names the offending key.
    pub fn from_json(content: &str) -> Result<Self, String> {
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let document: SourceMapDocument =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
                let path = e.path().to_string();
                if path == "." {
                    e.inner().to_string()
                } else {
                    format!("{} (at `{}`)", e.inner(), path)
                }
            })?;
        deserializer.end().map_err(|e| e.to_string())?;

        if let Some(version) = document.version {
            if version != SUPPORTED_VERSION {
                return Err(format!(
                    "unsupported source map version {} (expected {})",
                    version, SUPPORTED_VERSION
                ));
            }
        }

        Ok(document)
    }

    /// Decode the `mappings` field. `map_path` is used for error reporting.
    pub fn decode_mappings(&self, map_path: &Path) -> Result<DecodedMappings, CheckError> {
        vlq::decode_mappings(&self.mappings).map_err(|source| CheckError::MalformedMappings {
            path: map_path.to_path_buf(),
            source,
        })
    }

    /// Look up the `sources` entry a segment on generated `line` points at,
    /// failing if the index is out of range.
    pub fn source_at(&self, index: u32, line: usize, map_path: &Path) -> Result<&str, CheckError> {
        self.sources
            .get(index as usize)
            .map(String::as_str)
            .ok_or_else(|| CheckError::SourceIndexOutOfBounds {
                path: map_path.to_path_buf(),
                line,
                index,
                len: self.sources.len(),
            })
    }

    /// Fail on the first segment, in generated order, whose source index is
    /// past the end of `sources`.
    pub fn check_source_indices(
        &self,
        lines: &[Vec<Segment>],
        map_path: &Path,
    ) -> Result<(), CheckError> {
        for (line, segments) in lines.iter().enumerate() {
            for position in segments.iter().filter_map(|segment| segment.source) {
                self.source_at(position.source_index, line, map_path)?;
            }
        }
        Ok(())
    }
}
