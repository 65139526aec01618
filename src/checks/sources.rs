use crate::sourcemap::SourceMapDocument;
use crate::CheckError;
use std::path::Path;

/// Bracketed pseudo-paths such as `[synthetic:runtime]` name injected or
/// virtual modules that have no file on disk.
pub fn is_synthetic_source(source: &str) -> bool {
    source
        .find('[')
        .is_some_and(|open| source[open + 1..].contains(']'))
}

/// Fail with every `sources` entry that is neither synthetic nor present
/// under `root`.
pub fn check_sources(
    doc: &SourceMapDocument,
    map_path: &Path,
    root: &Path,
) -> Result<(), CheckError> {
    let mut invalid = Vec::new();
    let mut synthetic = 0usize;

    for source in &doc.sources {
        if is_synthetic_source(source) {
            synthetic += 1;
            continue;
        }
        if !root.join(source).exists() {
            invalid.push(source.clone());
        }
    }

    tracing::debug!(
        total = doc.sources.len(),
        synthetic,
        invalid = invalid.len(),
        "Checked source paths"
    );

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CheckError::InvalidSourcePaths {
            path: map_path.to_path_buf(),
            invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn doc_with_sources(sources: &[&str]) -> SourceMapDocument {
        SourceMapDocument {
            version: Some(3),
            file: None,
            source_root: None,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            sources_content: None,
            names: vec![],
            mappings: String::new(),
        }
    }

    fn tree_with_a_js() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.js"), "export const a = 1;\n").unwrap();
        dir
    }

    #[test]
    fn test_synthetic_pattern() {
        assert!(is_synthetic_source("[synthetic:runtime]"));
        assert!(is_synthetic_source("[babel]/helpers.js"));
        assert!(!is_synthetic_source("src/a.js"));
    }

    #[test]
    fn test_existing_and_synthetic_sources_pass() {
        let dir = tree_with_a_js();
        let doc = doc_with_sources(&["src/a.js", "[synthetic:runtime]"]);
        assert!(check_sources(&doc, Path::new("v0.js.map"), dir.path()).is_ok());
    }

    #[test]
    fn test_missing_source_is_reported() {
        let dir = tree_with_a_js();
        let doc = doc_with_sources(&["src/a.js", "src/missing.js"]);
        match check_sources(&doc, Path::new("v0.js.map"), dir.path()) {
            Err(CheckError::InvalidSourcePaths { invalid, .. }) => {
                assert_eq!(invalid, vec!["src/missing.js".to_string()]);
            }
            other => panic!("expected InvalidSourcePaths, got {:?}", other),
        }
    }

    #[test]
    fn test_all_missing_sources_collected_in_order() {
        let dir = tree_with_a_js();
        let doc = doc_with_sources(&["src/z.js", "src/a.js", "[x]", "src/b.js"]);
        match check_sources(&doc, Path::new("v0.js.map"), dir.path()) {
            Err(CheckError::InvalidSourcePaths { invalid, .. }) => {
                assert_eq!(invalid, vec!["src/z.js".to_string(), "src/b.js".to_string()]);
            }
            other => panic!("expected InvalidSourcePaths, got {:?}", other),
        }
    }
}
