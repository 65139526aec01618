use crate::checks::{check_mapping_sentinel, check_origin, check_sources, Check};
use crate::logging;
use crate::sourcemap::SourceMapDocument;
use crate::target::VerificationTarget;
use crate::ui::formatter::Formatter;
use crate::CheckError;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How failures in one target affect the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifyMode {
    /// Stop at the first failing target.
    #[default]
    FailFast,
    /// Verify every target and report all failures.
    KeepGoing,
}

/// Result of verifying a single target.
#[derive(Debug)]
pub struct TargetOutcome {
    pub name: String,
    pub map: PathBuf,
    pub result: Result<(), CheckError>,
    pub duration_ms: u128,
}

impl TargetOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    /// Stage that failed, if any.
    pub fn failed_check(&self) -> Option<Check> {
        self.result.as_ref().err().and_then(CheckError::check)
    }
}

/// Outcomes in target declaration order.
#[derive(Debug, Default)]
pub struct VerificationReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &TargetOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// First failure in declaration order, or `Ok` if every target passed.
    pub fn into_result(self) -> Result<(), CheckError> {
        self.outcomes
            .into_iter()
            .map(|o| o.result)
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }

    /// Print a per-target summary to stdout. Every failure is followed by
    /// its error message, indented.
    pub fn display(&self) {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(()) => println!(
                    "{}",
                    Formatter::success(format!(
                        "PASS {:<10} {} ({}ms)",
                        outcome.name,
                        Formatter::format_path(&outcome.map),
                        outcome.duration_ms
                    ))
                ),
                Err(e) => {
                    println!(
                        "{}",
                        Formatter::error(format!(
                            "FAIL {:<10} {} [{}]",
                            outcome.name,
                            Formatter::format_path(&outcome.map),
                            outcome.failed_check().map(|c| c.name()).unwrap_or("unknown")
                        ))
                    );
                    for line in e.to_string().lines() {
                        println!("    {}", line);
                    }
                }
            }
        }

        let total = self.outcomes.len();
        let passed = self.passed_count();
        let summary = format!("{}/{} source map(s) verified", passed, total);
        if passed == total {
            println!("{}", Formatter::success(summary));
        } else {
            println!("{}", Formatter::error(summary));
        }
    }
}

/// Runs the load and check sequence for each target against a working tree.
#[derive(Debug, Clone)]
pub struct Verifier {
    root: PathBuf,
    mode: VerifyMode,
}

impl Verifier {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: VerifyMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: VerifyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mode(&self) -> VerifyMode {
        self.mode
    }

    /// Load the map, then run origin, sources and sentinel checks in that
    /// order, stopping at the first failure.
    pub fn verify_target(&self, target: &VerificationTarget) -> Result<(), CheckError> {
        let map_path = self.root.join(&target.map);
        let _span = tracing::info_span!("target", name = target.name.as_str()).entered();

        logging::log_loading_map(&map_path.to_string_lossy());
        let doc = SourceMapDocument::load(&map_path)?;
        logging::log_map_loaded(doc.sources.len(), doc.mappings.len());

        self.run_check(Check::Origin, || {
            check_origin(&doc, &map_path, &target.origin)
        })?;
        self.run_check(Check::Sources, || {
            check_sources(&doc, &map_path, &self.root)
        })?;
        self.run_check(Check::Sentinel, || {
            check_mapping_sentinel(&doc, &map_path, &self.root, &target.sentinel)
        })?;

        Ok(())
    }

    fn run_check<F>(&self, check: Check, run: F) -> Result<(), CheckError>
    where
        F: FnOnce() -> Result<(), CheckError>,
    {
        match run() {
            Ok(()) => {
                logging::log_check_passed(check.name());
                Ok(())
            }
            Err(e) => {
                logging::log_check_failed(check.name(), &e.to_string());
                Err(e)
            }
        }
    }

    fn outcome(&self, target: &VerificationTarget) -> TargetOutcome {
        let start = Instant::now();
        let result = self.verify_target(target);
        TargetOutcome {
            name: target.name.clone(),
            map: target.map.clone(),
            result,
            duration_ms: start.elapsed().as_millis(),
        }
    }

    /// Verify all targets according to the configured mode.
    pub fn verify(&self, targets: &[VerificationTarget]) -> VerificationReport {
        let outcomes = match self.mode {
            VerifyMode::FailFast => {
                let mut outcomes = Vec::with_capacity(targets.len());
                for target in targets {
                    let outcome = self.outcome(target);
                    let failed = !outcome.passed();
                    outcomes.push(outcome);
                    if failed {
                        break;
                    }
                }
                outcomes
            }
            // Targets share nothing; collect keeps declaration order.
            VerifyMode::KeepGoing => targets.par_iter().map(|t| self.outcome(t)).collect(),
        };

        let report = VerificationReport { outcomes };
        logging::log_verification_complete(report.passed_count(), report.outcomes.len());
        report
    }
}
