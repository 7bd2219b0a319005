//! GitHub Actions workflow commands
//!
//! The runner scans step output for lines like `::error::message`. Log
//! records are rendered that way when running inside Actions, so debug output
//! shows up only when step debugging is enabled and errors annotate the run.

use log::Level;
use std::io::Write;

/// True when the process runs as a GitHub Actions step
pub fn running_in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Escape a message for use as workflow-command data
pub fn escape_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Render a message as the workflow command for `level`
///
/// Info is plain output; the runner has no info command.
pub fn command_line(level: Level, message: &str) -> String {
    match level {
        Level::Error => format!("::error::{}", escape_data(message)),
        Level::Warn => format!("::warning::{}", escape_data(message)),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace => format!("::debug::{}", escape_data(message)),
    }
}

/// `env_logger` format function emitting workflow commands
pub fn format_record(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    writeln!(buf, "{}", command_line(record.level(), &record.args().to_string()))
}

/// Mark the step as failed with `message`; the caller sets the exit code
pub fn set_failed(message: &str) {
    println!("{}", command_line(Level::Error, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_data("plain"), "plain");
    }

    #[test]
    fn test_command_lines() {
        assert_eq!(command_line(Level::Error, "boom"), "::error::boom");
        assert_eq!(command_line(Level::Warn, "careful"), "::warning::careful");
        assert_eq!(command_line(Level::Info, "a\nb"), "a\nb");
        assert_eq!(command_line(Level::Debug, "- [ ] x\n- [x] y"), "::debug::- [ ] x%0A- [x] y");
        assert_eq!(command_line(Level::Trace, "t"), "::debug::t");
    }
}
