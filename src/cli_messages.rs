//! CLI command messaging system
//!
//! Console messages for command-line failures and warnings raised outside
//! the terminal UI.

const WARN_TAG: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR_TAG: &str = "\x1b[1;31m[ERROR]\x1b[0m";

/// Print CLI command warn message
pub fn print_warn(title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", WARN_TAG, title);
    } else {
        println!("{} {}\t {}", WARN_TAG, title, details);
    }
}

/// Print CLI command error
pub fn print_error(title: &str, details: Option<&str>) {
    println!("{} {}", ERROR_TAG, title);
    if let Some(details) = details {
        println!("{} Details: {}", ERROR_TAG, details);
    }
}

/// Warning with a formatted detail line.
#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}
