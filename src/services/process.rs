//! External process invocation.
//!
//! Commands are built as argument vectors and spawned directly, never
//! through a shell, so titles and paths containing quotes or other shell
//! metacharacters reach the tool verbatim.

use std::ffi::{OsStr, OsString};
use std::process::Command;

/// Captured result of an external tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Check if the tool exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// First line of stdout, if it has any content.
    pub fn first_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .next()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
    }

    /// Best available diagnostic text.
    pub fn message(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{} {}", stdout, stderr),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => format!("exit status {:?}", self.status),
        }
    }
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Run the command to completion, capturing its output.
    pub fn run(&self) -> std::io::Result<ToolOutput> {
        tracing::debug!("Running {:?} {:?}", self.program, self.args);

        let output = Command::new(&self.program).args(&self.args).output()?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Check if a program can be started with the given version flag.
pub fn is_installed(program: &str, version_flag: &str) -> bool {
    ToolCommand::new(program)
        .arg(version_flag)
        .run()
        .map(|o| o.success())
        .unwrap_or(false)
}

/// First line of a program's version output.
pub fn get_version(program: &str, version_flag: &str) -> std::io::Result<String> {
    let output = ToolCommand::new(program).arg(version_flag).run()?;
    Ok(output.first_line().unwrap_or("unknown").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let output = ToolOutput {
            status: Some(0),
            stdout: "Title\r\nmore\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.first_line(), Some("Title"));

        let blank = ToolOutput {
            status: Some(0),
            stdout: "  \n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(blank.first_line(), None);
    }

    #[test]
    fn test_message_prefers_output() {
        let output = ToolOutput {
            status: Some(2),
            stdout: String::new(),
            stderr: "Error: no such file\n".to_string(),
        };
        assert_eq!(output.message(), "Error: no such file");

        let silent = ToolOutput {
            status: Some(2),
            ..Default::default()
        };
        assert_eq!(silent.message(), "exit status Some(2)");
    }

    #[test]
    fn test_missing_program_is_not_installed() {
        assert!(!is_installed("mkvedit-no-such-program", "--version"));
    }
}
