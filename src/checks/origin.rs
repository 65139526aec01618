use crate::sourcemap::SourceMapDocument;
use crate::CheckError;
use regex::Regex;
use std::path::Path;

/// Accepted `sourceRoot` shape: a fixed prefix, a 13-digit build identifier
/// and a trailing `/`.
#[derive(Debug, Clone)]
pub struct OriginPattern {
    prefix: String,
    regex: Regex,
}

impl OriginPattern {
    pub fn new(prefix: impl Into<String>) -> Result<Self, CheckError> {
        let prefix = prefix.into();
        let pattern = format!(r"^{}\d{{13}}/$", regex::escape(&prefix));
        let regex = Regex::new(&pattern).map_err(|e| {
            CheckError::InvalidConfig(format!("invalid origin prefix {:?}: {}", prefix, e))
        })?;
        Ok(Self { prefix, regex })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, source_root: &str) -> bool {
        self.regex.is_match(source_root)
    }
}

/// Fail unless `doc.sourceRoot` is present, non-empty and matches `pattern`.
pub fn check_origin(
    doc: &SourceMapDocument,
    map_path: &Path,
    pattern: &OriginPattern,
) -> Result<(), CheckError> {
    let source_root = match doc.source_root.as_deref() {
        Some(root) if !root.is_empty() => root,
        _ => {
            return Err(CheckError::MissingOriginUrl {
                path: map_path.to_path_buf(),
            })
        }
    };

    if !pattern.is_match(source_root) {
        return Err(CheckError::MalformedOriginUrl {
            path: map_path.to_path_buf(),
            actual: source_root.to_string(),
            expected: pattern.as_str().to_string(),
        });
    }

    tracing::debug!(source_root, "sourceRoot matches origin pattern");
    Ok(())
}
