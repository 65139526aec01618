use crate::target::VerificationTarget;
use crossterm::style::Stylize;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Pretty printing utilities for checker output
pub struct Formatter;

impl Formatter {
    /// Format a path for display, highlighted in cyan.
    pub fn format_path(path: &Path) -> String {
        Self::apply_color(&path.display().to_string(), ColorKind::Path)
    }

    /// Format the list of targets about to be checked.
    pub fn format_targets(targets: &[VerificationTarget]) -> String {
        if targets.is_empty() {
            return "No source maps configured".to_string();
        }

        let mut lines = vec!["Source maps:".to_string()];
        lines.extend(targets.iter().map(|t| {
            format!("  {:<10} {}", t.name, Self::format_path(&t.map))
        }));
        lines.join("\n")
    }

    /// Format an informational message in blue.
    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    /// Format a success message in green.
    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    /// Format a warning message in yellow.
    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    /// Format an error message in red.
    pub fn error(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Error)
    }

    /// Configure whether ANSI colors are enabled.
    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Auto-configure color output based on environment.
    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    /// Set output verbosity: 0 = quiet, 1 = normal, 2 = verbose.
    pub fn set_verbosity(level: u8) {
        VERBOSITY.store(level, Ordering::Relaxed);
    }

    pub fn is_quiet() -> bool {
        VERBOSITY.load(Ordering::Relaxed) == 0
    }

    pub fn is_verbose() -> bool {
        VERBOSITY.load(Ordering::Relaxed) >= 2
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
            ColorKind::Error => format!("{}", message.red()),
            ColorKind::Path => format!("{}", message.cyan()),
        }
    }
}

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
    Error,
    Path,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        for (level, quiet, verbose) in [(0u8, true, false), (1, false, false), (2, false, true)] {
            Formatter::set_verbosity(level);
            assert_eq!(Formatter::is_quiet(), quiet);
            assert_eq!(Formatter::is_verbose(), verbose);
        }
        Formatter::set_verbosity(1);
    }

    #[test]
    fn test_format_targets() {
        Formatter::configure_colors(false);
        let targets = VerificationTarget::defaults().unwrap();
        let text = Formatter::format_targets(&targets);
        assert!(text.contains("classic"));
        assert!(text.contains("dist/v0.mjs.map"));
        assert_eq!(Formatter::format_targets(&[]), "No source maps configured");
    }
}
