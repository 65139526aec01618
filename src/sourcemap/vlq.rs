//! Base64 VLQ codec for the `mappings` field of a version 3 source map.
//!
//! Generated lines are separated by `;`, segments within a line by `,`.
//! Every segment field is stored as a signed delta. The generated column
//! restarts at zero on every line; the source index, original line,
//! original column and name index carry over across the whole string.

use std::fmt;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

/// Errors raised while decoding a `mappings` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VlqError {
    #[error("invalid base64 character {ch:?} at byte {offset}")]
    InvalidBase64 { offset: usize, ch: char },

    #[error("unterminated VLQ value at byte {offset}")]
    Unterminated { offset: usize },

    #[error("VLQ value starting at byte {offset} does not fit in 32 bits")]
    Overflow { offset: usize },

    #[error("segment on generated line {line} has {fields} fields (expected 1, 4 or 5)")]
    InvalidSegmentLength { line: usize, fields: usize },

    #[error("{field} became negative on generated line {line}")]
    NegativeValue { line: usize, field: Field },

    #[error("{field} exceeds the 32-bit range on generated line {line}")]
    OutOfRange { line: usize, field: Field },
}

/// Segment field names, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GeneratedColumn,
    SourceIndex,
    OriginalLine,
    OriginalColumn,
    NameIndex,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::GeneratedColumn => "generated column",
            Field::SourceIndex => "source index",
            Field::OriginalLine => "original line",
            Field::OriginalColumn => "original column",
            Field::NameIndex => "name index",
        };
        f.write_str(name)
    }
}

/// Position in an original source that a segment points at. Line and
/// column are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalPosition {
    pub source_index: u32,
    pub original_line: u32,
    pub original_column: u32,
    pub name_index: Option<u32>,
}

/// One decoded mapping segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub generated_column: u32,
    /// `None` for single-field segments, which map generated code to nothing.
    pub source: Option<OriginalPosition>,
}

impl Segment {
    pub fn unmapped(generated_column: u32) -> Self {
        Self {
            generated_column,
            source: None,
        }
    }

    pub fn mapped(
        generated_column: u32,
        source_index: u32,
        original_line: u32,
        original_column: u32,
    ) -> Self {
        Self {
            generated_column,
            source: Some(OriginalPosition {
                source_index,
                original_line,
                original_column,
                name_index: None,
            }),
        }
    }

    pub fn with_name(mut self, name_index: u32) -> Self {
        if let Some(source) = self.source.as_mut() {
            source.name_index = Some(name_index);
        }
        self
    }
}

/// Decoded mappings, one `Vec<Segment>` per generated line.
pub type DecodedMappings = Vec<Vec<Segment>>;

fn base64_value(byte: u8) -> Option<i64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(i64::from(value))
}

/// Read one VLQ value from `bytes` starting at `*pos`, advancing `*pos`.
fn decode_vlq(bytes: &[u8], pos: &mut usize) -> Result<i64, VlqError> {
    let start = *pos;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(VlqError::Unterminated { offset: start });
        };
        let digit = base64_value(byte).ok_or(VlqError::InvalidBase64 {
            offset: *pos,
            ch: char::from(byte),
        })?;
        *pos += 1;

        result |= (digit & VLQ_BASE_MASK) << shift;
        if result > i64::from(u32::MAX) {
            return Err(VlqError::Overflow { offset: start });
        }

        if digit & VLQ_CONTINUATION_BIT == 0 {
            break;
        }
        shift += VLQ_BASE_SHIFT;
        if shift > 32 {
            return Err(VlqError::Overflow { offset: start });
        }
    }

    let negative = result & 1 == 1;
    let magnitude = result >> 1;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Append the VLQ encoding of `value` to `out`.
pub fn encode_vlq(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };

    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(char::from(BASE64_ALPHABET[digit as usize]));
        if vlq == 0 {
            break;
        }
    }
}

fn apply_delta(current: i64, delta: i64, line: usize, field: Field) -> Result<i64, VlqError> {
    let next = current + delta;
    if next < 0 {
        return Err(VlqError::NegativeValue { line, field });
    }
    if next > i64::from(u32::MAX) {
        return Err(VlqError::OutOfRange { line, field });
    }
    Ok(next)
}

fn to_u32(value: i64) -> u32 {
    // apply_delta keeps every running value inside the u32 range
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Decode a full `mappings` string. Any malformed input fails the whole
/// decode; no partial result is returned.
pub fn decode_mappings(mappings: &str) -> Result<DecodedMappings, VlqError> {
    let bytes = mappings.as_bytes();
    let mut lines: DecodedMappings = vec![Vec::new()];

    let mut source_index: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name_index: i64 = 0;
    let mut generated_column: i64 = 0;

    let mut pos = 0;
    let mut fields: Vec<i64> = Vec::with_capacity(5);

    while pos < bytes.len() {
        match bytes[pos] {
            b';' => {
                lines.push(Vec::new());
                generated_column = 0;
                pos += 1;
                continue;
            }
            b',' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let line = lines.len() - 1;
        fields.clear();
        while pos < bytes.len() && bytes[pos] != b',' && bytes[pos] != b';' {
            fields.push(decode_vlq(bytes, &mut pos)?);
        }

        generated_column = apply_delta(generated_column, fields[0], line, Field::GeneratedColumn)?;
        let segment = match fields.len() {
            1 => Segment::unmapped(to_u32(generated_column)),
            4 | 5 => {
                source_index = apply_delta(source_index, fields[1], line, Field::SourceIndex)?;
                original_line = apply_delta(original_line, fields[2], line, Field::OriginalLine)?;
                original_column =
                    apply_delta(original_column, fields[3], line, Field::OriginalColumn)?;
                let name = if fields.len() == 5 {
                    name_index = apply_delta(name_index, fields[4], line, Field::NameIndex)?;
                    Some(to_u32(name_index))
                } else {
                    None
                };
                Segment {
                    generated_column: to_u32(generated_column),
                    source: Some(OriginalPosition {
                        source_index: to_u32(source_index),
                        original_line: to_u32(original_line),
                        original_column: to_u32(original_column),
                        name_index: name,
                    }),
                }
            }
            other => {
                return Err(VlqError::InvalidSegmentLength {
                    line,
                    fields: other,
                })
            }
        };

        lines[line].push(segment);
    }

    Ok(lines)
}

/// Encode decoded mappings back into a `mappings` string.
pub fn encode_mappings(lines: &[Vec<Segment>]) -> String {
    let mut out = String::new();

    let mut source_index: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name_index: i64 = 0;

    for (i, segments) in lines.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let mut generated_column: i64 = 0;

        for (j, segment) in segments.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let column = i64::from(segment.generated_column);
            encode_vlq(column - generated_column, &mut out);
            generated_column = column;

            let Some(source) = segment.source else {
                continue;
            };
            let index = i64::from(source.source_index);
            let line = i64::from(source.original_line);
            let col = i64::from(source.original_column);
            encode_vlq(index - source_index, &mut out);
            encode_vlq(line - original_line, &mut out);
            encode_vlq(col - original_column, &mut out);
            source_index = index;
            original_line = line;
            original_column = col;

            if let Some(name) = source.name_index {
                let name = i64::from(name);
                encode_vlq(name - name_index, &mut out);
                name_index = name;
            }
        }
    }

    out
}

/// First segment of the first non-empty generated line, with its line number.
pub fn first_mapped_segment(lines: &[Vec<Segment>]) -> Option<(usize, &Segment)> {
    lines
        .iter()
        .enumerate()
        .find_map(|(line, segments)| segments.first().map(|segment| (line, segment)))
}
