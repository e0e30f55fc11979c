// Logging and verbosity control

use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Quiet,
    /// Info and above
    Normal,
    /// Debug and above
    Verbose,
}

impl VerbosityLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default filter directive when `RUST_LOG` is not set
    pub fn directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Build the filter; `RUST_LOG` wins over the flags
pub fn build_filter(level: VerbosityLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global subscriber, logging to stderr
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = VerbosityLevel::from_flags(verbose, quiet);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(level == VerbosityLevel::Verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
