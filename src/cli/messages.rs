//! Message formatting for the command line output.
//!
//! - Highlight an argument (ferrum red, not bold)
//! - System messages, `[source] message`, for results
//! - Error messages, the same shape in a darker red

use colored::Colorize;

use crate::cli::colors::{ERROR_RED, FERRUM_RED};

pub fn highlight_argument(argument: &str) -> String {
    //! Highlight a name or value inside a message.

    format!("{}", argument.color(FERRUM_RED))
}

pub fn system_message(source_name: &str, message: String) -> String {
    //! Format a message as `[source] message`, with the source in bold
    //! ferrum red.

    let source_formatted = format!("{:6}", source_name.color(FERRUM_RED).bold());
    format!("[{}] {}", source_formatted, message)
}

pub fn error_message(message: String) -> String {
    let source_formatted = format!("{:6}", "error".color(ERROR_RED).bold());
    format!("[{}] {}", source_formatted, message)
}
