//! Source map document model and the VLQ mapping codec.

pub mod document;
pub mod vlq;

pub use document::SourceMapDocument;
pub use vlq::{decode_mappings, encode_mappings, DecodedMappings, OriginalPosition, Segment, VlqError};
