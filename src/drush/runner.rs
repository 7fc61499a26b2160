//! Process execution seam.
//!
//! Every subprocess the facade starts (version probe, catalog query, alias
//! probe, command invocation) goes through a [`Runner`]. The production
//! implementation is [`SystemRunner`]; tests plug in a scripted runner so the
//! argument vectors can be inspected without a real Drush installation.

use std::io;
use std::process::{Command, Stdio};

/// Captured outcome of one finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, decoded lossily.
    pub fn combined(&self) -> String {
        let mut out = String::from_utf8_lossy(&self.stdout).into_owned();
        out.push_str(&String::from_utf8_lossy(&self.stderr));
        out
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs an argument vector (`argv[0]` is the program) to completion.
///
/// Implementations must block until the child has exited and both output
/// streams have been drained.
pub trait Runner {
    fn run(&self, argv: &[String]) -> io::Result<RunOutput>;
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, argv: &[String]) -> io::Result<RunOutput> {
        (**self).run(argv)
    }
}

/// Spawns real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, argv: &[String]) -> io::Result<RunOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector"))?;

        // `output()` pipes both streams, reads them to EOF and waits for the
        // child on every path, so no pipe or zombie outlives this call.
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(RunOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_is_rejected() {
        let err = SystemRunner.run(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let argv = vec!["definitely-not-a-real-drush-binary-4821".to_string()];
        assert!(SystemRunner.run(&argv).is_err());
    }

    #[test]
    fn combined_keeps_stdout_first() {
        let out = RunOutput {
            code: Some(0),
            stdout: b"Drush Version : 8.1.0\n".to_vec(),
            stderr: b"warning\n".to_vec(),
        };
        assert!(out.success());
        assert_eq!(out.combined(), "Drush Version : 8.1.0\nwarning\n");
    }

    #[cfg(unix)]
    #[test]
    fn captures_streams_and_exit_code() {
        let argv: Vec<String> = ["sh", "-c", "echo out; echo err >&2; exit 3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let out = SystemRunner.run(&argv).unwrap();
        assert_eq!(out.code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout, b"out\n");
        assert_eq!(out.stderr_lossy(), "err\n");
    }
}
