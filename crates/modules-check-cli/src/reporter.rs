//! Human-readable progress and version comparison output.

use colored::Colorize;
use modules_check_config::ColorChoice;
use modules_check_deps::{DependencyType, ResolvedDependency};
use std::io::{self, IsTerminal, Write};

pub const USAGE: &str = "usage:\n    modules-check <package.json>\n";

/// Writes everything the user sees on stdout.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<io::Stdout> {
    pub fn stdout(choice: ColorChoice) -> Self {
        let color = should_colorize(choice);
        if color {
            // colored does its own tty detection; the decision is already made
            colored::control::set_override(true);
        }
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn usage(&mut self) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", USAGE.green())
        } else {
            writeln!(self.out, "{}", USAGE)
        }
    }

    /// A pipeline step, e.g. "Backup package.json".
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", message.bright_white())
        } else {
            writeln!(self.out, "{}", message)
        }
    }

    pub fn group_header(&mut self, dep_type: DependencyType) -> io::Result<()> {
        writeln!(self.out, "{}: ", dep_type.field())
    }

    /// `name@current -> name@latest`
    pub fn comparison(&mut self, dep: &ResolvedDependency) -> io::Result<()> {
        let current = format!("@{}", dep.current);
        let latest = format!("@{}", dep.latest);
        if self.color {
            writeln!(
                self.out,
                "{}{} -> {}{}",
                dep.name.yellow(),
                current.green(),
                dep.name.yellow(),
                latest.red()
            )
        } else {
            writeln!(self.out, "{}{} -> {}{}", dep.name, current, dep.name, latest)
        }
    }

    pub fn group_end(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `auto` colors only a terminal, and honors `NO_COLOR`.
pub fn should_colorize(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
                && io::stdout().is_terminal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        current: &str,
        latest: &str,
        dep_type: DependencyType,
    ) -> ResolvedDependency {
        ResolvedDependency {
            name: name.to_string(),
            current: current.to_string(),
            latest: latest.to_string(),
            dep_type,
        }
    }

    fn plain() -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), false)
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_comparison_line() {
        let mut reporter = plain();
        reporter
            .comparison(&record("left-pad", "^1.0.0", "^1.3.0", DependencyType::Runtime))
            .unwrap();
        assert_eq!(output(reporter), "left-pad@^1.0.0 -> left-pad@^1.3.0\n");
    }

    #[test]
    fn test_group_layout() {
        let mut reporter = plain();
        reporter.group_header(DependencyType::Runtime).unwrap();
        reporter
            .comparison(&record("a", "1", "^2.0.0", DependencyType::Runtime))
            .unwrap();
        reporter.group_end().unwrap();
        reporter.group_header(DependencyType::Dev).unwrap();
        reporter.group_end().unwrap();

        assert_eq!(
            output(reporter),
            "dependencies: \na@1 -> a@^2.0.0\n\ndevDependencies: \n\n"
        );
    }

    #[test]
    fn test_usage_and_status() {
        let mut reporter = plain();
        reporter.usage().unwrap();
        reporter.status("Backup package.json").unwrap();
        assert_eq!(
            output(reporter),
            "usage:\n    modules-check <package.json>\n\nBackup package.json\n"
        );
    }

    #[test]
    fn test_explicit_color_choices() {
        assert!(should_colorize(ColorChoice::Always));
        assert!(!should_colorize(ColorChoice::Never));
    }
}
