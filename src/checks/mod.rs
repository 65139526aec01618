//! Structural validators applied to a loaded source map.
//!
//! Each check returns `Result<(), CheckError>`; the verifier composes them.

pub mod origin;
pub mod sentinel;
pub mod sources;

use std::fmt;

pub use origin::{check_origin, OriginPattern};
pub use sentinel::check_mapping_sentinel;
pub use sources::{check_sources, is_synthetic_source};

/// Verification stages, in the order they run for each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    Load,
    Origin,
    Sources,
    Sentinel,
}

impl Check {
    pub fn name(&self) -> &'static str {
        match self {
            Check::Load => "load",
            Check::Origin => "origin",
            Check::Sources => "sources",
            Check::Sentinel => "sentinel",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
