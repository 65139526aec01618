use crate::logging;
use crate::CheckError;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

/// Default build invocation: the core runtime with full source maps.
pub const DEFAULT_BUILD_PROGRAM: &str = "amp";
pub const DEFAULT_BUILD_ARGS: [&str; 3] = ["dist", "--core_runtime_only", "--full_sourcemaps"];

/// Something that (re)generates the bundles and their source maps.
pub trait BuildTrigger: Send + Sync {
    /// Human readable description, used in logs and errors.
    fn describe(&self) -> String;

    /// Run the build to completion.
    fn build(&self) -> Result<(), CheckError>;
}

/// Build by running an external command and waiting for it to exit.
#[derive(Debug, Clone)]
pub struct CommandBuild {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl CommandBuild {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for CommandBuild {
    fn default() -> Self {
        Self::new(
            DEFAULT_BUILD_PROGRAM,
            DEFAULT_BUILD_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl BuildTrigger for CommandBuild {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(&self) -> Result<(), CheckError> {
        let command = self.describe();
        logging::log_build_start(&command);
        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| CheckError::BuildFailed {
            command: command.clone(),
            reason: format!("failed to start: {}", e),
        })?;

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(CheckError::BuildFailed { command, reason });
        }

        logging::log_build_complete(&command, start.elapsed().as_millis());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_description() {
        assert_eq!(
            CommandBuild::default().describe(),
            "amp dist --core_runtime_only --full_sourcemaps"
        );
    }

    #[test]
    fn test_missing_program_is_build_failure() {
        let build = CommandBuild::new("definitely-not-a-real-build-tool-xyz", vec![]);
        match build.build() {
            Err(CheckError::BuildFailed { command, reason }) => {
                assert_eq!(command, "definitely-not-a-real-build-tool-xyz");
                assert!(reason.starts_with("failed to start"));
            }
            other => panic!("expected BuildFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        assert!(CommandBuild::new("true", vec![]).build().is_ok());

        let err = CommandBuild::new("false", vec![]).build().unwrap_err();
        assert!(matches!(err, CheckError::BuildFailed { .. }));
    }
}
