// Output formatting and styling

use std::io::IsTerminal;

use colored::Colorize;

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputStyle {
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    pub fn header(&self, msg: &str) -> String {
        if self.use_colors {
            msg.bold().underline().to_string()
        } else {
            msg.to_string()
        }
    }

    /// Dimmed secondary text such as locations
    pub fn muted(&self, msg: &str) -> String {
        if self.use_colors {
            msg.dimmed().to_string()
        } else {
            msg.to_string()
        }
    }
}

/// Print an error to stderr
pub fn print_error(msg: &str) {
    let style = OutputStyle {
        use_colors: std::io::stderr().is_terminal(),
    };
    eprintln!("{}", style.error(msg));
}
