// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console output macros shared by the library driver and the CLI.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbosity flag.
static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a plain message to stdout.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

/// Print a yellow warning to stderr.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        use colored::Colorize;
        eprintln!("{} {}", "warning:".yellow().bold(), format!($($arg)*));
    }
}

/// Print a red error to stderr.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        use colored::Colorize;
        eprintln!("{} {}", "error:".red().bold(), format!($($arg)*));
    }
}

/// Print a green completion message to stdout.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        use colored::Colorize;
        println!("{} {}", "done:".green().bold(), format!($($arg)*));
    }
}

/// Print to stdout only when verbose output is enabled.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::cli::logging::is_verbose() {
            println!("{}", format!($($arg)*));
        }
    }
}

/// Print a cyan section header when verbose output is enabled.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {
        use colored::Colorize;
        if $crate::cli::logging::is_verbose() {
            println!("{}", format!($($arg)*).cyan().bold());
        }
    }
}
