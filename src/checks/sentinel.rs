use crate::sourcemap::vlq::first_mapped_segment;
use crate::sourcemap::SourceMapDocument;
use crate::target::Sentinel;
use crate::CheckError;
use std::fs;
use std::path::Path;

/// Resolve the first mapped segment of the bundle back to the original
/// source and compare it against the expected `sentinel`.
///
/// The leading generated lines carry no segments (the bundle starts with a
/// line break before any code), so the first non-empty line is used. A
/// one-field first segment points at no source and is rejected as
/// unresolved rather than skipped.
///
/// Every segment's source index is bounds-checked before the first one is
/// resolved.
pub fn check_mapping_sentinel(
    doc: &SourceMapDocument,
    map_path: &Path,
    root: &Path,
    sentinel: &Sentinel,
) -> Result<(), CheckError> {
    let unresolved = |reason: String| CheckError::SentinelUnresolved {
        path: map_path.to_path_buf(),
        reason,
    };

    let lines = doc.decode_mappings(map_path)?;
    tracing::debug!(
        generated_lines = lines.len(),
        segments = lines.iter().map(Vec::len).sum::<usize>(),
        "Decoded mappings"
    );
    doc.check_source_indices(&lines, map_path)?;

    let (generated_line, segment) = first_mapped_segment(&lines)
        .ok_or_else(|| unresolved("mappings contain no segments".to_string()))?;
    let position = segment.source.ok_or_else(|| {
        unresolved(format!(
            "first segment on generated line {} does not point into a source",
            generated_line
        ))
    })?;

    let file = doc.source_at(position.source_index, generated_line, map_path)?;
    let content = fs::read_to_string(root.join(file))
        .map_err(|e| unresolved(format!("failed to read {}: {}", file, e)))?;

    let line = content
        .split('\n')
        .nth(position.original_line as usize)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .ok_or_else(|| {
            unresolved(format!(
                "{} has {} lines, mapping points at line {}",
                file,
                content.split('\n').count(),
                position.original_line + 1
            ))
        })?;
    let code: String = line.chars().skip(position.original_column as usize).collect();

    tracing::debug!(
        file,
        line = position.original_line + 1,
        column = position.original_column,
        code = code.as_str(),
        "Resolved first mapped segment"
    );

    if file != sentinel.file || code != sentinel.code {
        return Err(CheckError::SentinelMismatch {
            path: map_path.to_path_buf(),
            actual_file: file.to_string(),
            actual_code: code,
            expected_file: sentinel.file.clone(),
            expected_code: sentinel.code.clone(),
        });
    }

    Ok(())
}
