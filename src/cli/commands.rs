use crate::builder::BuildTrigger;
use crate::cli::args::{CheckArgs, Verbosity};
use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::ui::formatter::Formatter;
use crate::verifier::{Verifier, VerifyMode};
use crate::Result;
use std::path::PathBuf;

fn print_info(message: impl AsRef<str>) {
    if !Formatter::is_quiet() {
        println!("{}", Formatter::info(message));
    }
}

fn print_success(message: impl AsRef<str>) {
    if !Formatter::is_quiet() {
        println!("{}", Formatter::success(message));
    }
}

fn print_warning(message: impl AsRef<str>) {
    if !Formatter::is_quiet() {
        println!("{}", Formatter::warning(message));
    }
}

/// Resolve configuration: an explicit `--config` must load cleanly, the
/// implicit default file only warns.
pub fn resolve_config(args: &CheckArgs) -> Result<Config> {
    match &args.config {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::load_or_default()),
    }
}

/// Build the pipeline described by the flags and configuration.
pub fn build_pipeline(args: &CheckArgs, config: &Config) -> Pipeline {
    let root = args
        .root
        .clone()
        .or_else(|| config.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let mode = if args.keep_going {
        VerifyMode::KeepGoing
    } else {
        VerifyMode::FailFast
    };

    let pipeline = Pipeline::new(Verifier::new(root.clone()).with_mode(mode));
    if args.nobuild {
        pipeline
    } else {
        pipeline.with_build(Box::new(config.build_command().in_dir(root)))
    }
}

/// Execute the check command
pub fn check(args: CheckArgs, verbosity: Verbosity) -> Result<()> {
    Formatter::set_verbosity(verbosity.as_level());

    let config = resolve_config(&args)?;
    let targets = config.targets()?;
    let pipeline = build_pipeline(&args, &config);

    if pipeline.has_build_stage() {
        let build = config.build_command();
        print_info(format!("Building runtime: {}", build.describe()));
    } else {
        print_warning("Skipping build (--nobuild)");
    }
    pipeline.run_build_stage()?;

    print_info("Checking source maps...");
    if Formatter::is_verbose() {
        println!("{}", Formatter::format_targets(&targets));
    }

    let report = pipeline.run_verify_stage(&targets);
    if !Formatter::is_quiet() {
        report.display();
    }

    report.into_result()?;
    print_success("All source maps are valid");
    Ok(())
}
