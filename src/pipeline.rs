//! Two-stage pipeline: an optional build stage followed by verification.

use crate::builder::BuildTrigger;
use crate::target::VerificationTarget;
use crate::verifier::{VerificationReport, Verifier};
use crate::CheckError;

pub struct Pipeline {
    build: Option<Box<dyn BuildTrigger>>,
    verifier: Verifier,
}

impl Pipeline {
    /// A verify-only pipeline.
    pub fn new(verifier: Verifier) -> Self {
        Self {
            build: None,
            verifier,
        }
    }

    pub fn with_build(mut self, build: Box<dyn BuildTrigger>) -> Self {
        self.build = Some(build);
        self
    }

    pub fn has_build_stage(&self) -> bool {
        self.build.is_some()
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    /// Run the build stage. A pipeline without one succeeds trivially.
    pub fn run_build_stage(&self) -> Result<(), CheckError> {
        match &self.build {
            Some(build) => build.build(),
            None => {
                tracing::info!("Build stage skipped");
                Ok(())
            }
        }
    }

    pub fn run_verify_stage(&self, targets: &[VerificationTarget]) -> VerificationReport {
        self.verifier.verify(targets)
    }

    /// Build, then verify. A failed build aborts before any map is read.
    pub fn run(&self, targets: &[VerificationTarget]) -> Result<VerificationReport, CheckError> {
        self.run_build_stage()?;
        Ok(self.run_verify_stage(targets))
    }
}
