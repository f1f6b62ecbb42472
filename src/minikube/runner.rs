//! External command execution for the minikube binary

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

/// Captured outcome of one external command invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Combined stdout and stderr, stdout first
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }
}

/// Narrow interface for running an external command to completion
///
/// The cluster handle holds its runner behind this trait so tests can
/// substitute scripted exit codes and output without spawning processes.
pub trait CommandRunner: Send + Sync {
    /// Run `binary` with `args`, blocking until the process exits
    fn run(&self, binary: &str, args: &[String]) -> io::Result<CommandOutput>;
}

impl<T: CommandRunner> CommandRunner for Arc<T> {
    fn run(&self, binary: &str, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(binary, args)
    }
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, binary: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_runner_captures_stdout() {
        let output = ProcessRunner
            .run("echo", &["hello".to_string()])
            .unwrap();
        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_process_runner_missing_binary() {
        let result = ProcessRunner.run("nonexistent-tool-xyz", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_orders_stdout_first() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert_eq!(output.combined(), "outerr");
    }
}
