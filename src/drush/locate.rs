//! Executable locator and version gate.
//!
//! `locate` probes candidate commands with `--version` and accepts the first
//! one reporting Drush 6 or newer. An outdated Drush is a hard error: the
//! remaining candidates are not consulted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::error::{DrushError, DrushResult};
use super::runner::Runner;

/// Oldest supported major version (JSON output and `help --format=json`).
pub const MIN_MAJOR_VERSION: u64 = 6;

/// Candidates tried when the caller names none and verification is on.
pub const DEFAULT_CANDIDATES: &[&str] = &["drush6", "drush"];

/// Command used when the caller names none and verification is off.
pub const DEFAULT_COMMAND: &str = "drush";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)drush version\s*(?::\s*)?([\d.]+)").expect("version regex is valid")
});

/// Dotted numeric version, e.g. `8.1.15` -> `[8, 1, 15]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn new(components: Vec<u64>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    pub fn major(&self) -> u64 {
        self.0.first().copied().unwrap_or(0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Resolved Drush executable. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    command: String,
    version_string: Option<String>,
    version: Option<Version>,
}

impl Executable {
    /// An executable accepted without probing; version fields stay empty.
    pub fn unverified(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            version_string: None,
            version: None,
        }
    }

    /// Command name or path, directly re-invokable as `argv[0]`.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Version text exactly as reported, e.g. `"8.1.15"`.
    pub fn version_string(&self) -> Option<&str> {
        self.version_string.as_deref()
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn is_verified(&self) -> bool {
        self.version.is_some()
    }
}

/// Extract the version from `drush --version` output.
///
/// Returns the raw dotted string and its parsed components, or `None` when
/// the text does not look like a Drush version banner.
pub fn parse_version(output: &str) -> Option<(String, Version)> {
    let caps = VERSION_RE.captures(output)?;
    let raw = caps.get(1)?.as_str();
    let components = raw
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;
    if components.is_empty() {
        return None;
    }
    Some((raw.to_string(), Version(components)))
}

/// Probe `candidates` in order and return the first usable Drush.
pub fn locate<R, S>(runner: &R, candidates: &[S]) -> DrushResult<Executable>
where
    R: Runner + ?Sized,
    S: AsRef<str>,
{
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let Some((version_string, version)) = probe(runner, candidate) else {
            continue;
        };

        if version.major() < MIN_MAJOR_VERSION {
            return Err(DrushError::VersionTooOld {
                command: candidate.to_string(),
                version: version_string,
                required: MIN_MAJOR_VERSION,
            });
        }

        info!(command = candidate, version = %version, "located drush");
        return Ok(Executable {
            command: candidate.to_string(),
            version_string: Some(version_string),
            version: Some(version),
        });
    }

    Err(DrushError::NotFound {
        candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
    })
}

fn probe<R: Runner + ?Sized>(runner: &R, candidate: &str) -> Option<(String, Version)> {
    let argv = vec![candidate.to_string(), "--version".to_string()];
    let output = match runner.run(&argv) {
        Ok(out) => out,
        Err(e) => {
            debug!(candidate, error = %e, "candidate could not be run");
            return None;
        }
    };
    if !output.success() {
        debug!(candidate, code = ?output.code, "candidate exited non-zero");
        return None;
    }
    let text = output.combined();
    if text.trim().is_empty() {
        debug!(candidate, "candidate printed nothing");
        return None;
    }
    let parsed = parse_version(&text);
    if parsed.is_none() {
        debug!(candidate, "candidate output has no drush version");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drush::testing::ScriptedRunner;

    #[test]
    fn parses_drush_6_banner() {
        let (raw, v) = parse_version(" Drush Version   :  6.2.0 \n").unwrap();
        assert_eq!(raw, "6.2.0");
        assert_eq!(v.components(), &[6, 2, 0]);
        assert_eq!(v.major(), 6);
    }

    #[test]
    fn parses_older_banner_without_colon() {
        let (raw, v) = parse_version("drush version 5.9").unwrap();
        assert_eq!(raw, "5.9");
        assert_eq!(v, Version::new(vec![5, 9]));
    }

    #[test]
    fn trailing_dot_is_ignored() {
        let (_, v) = parse_version("Drush Version : 8.1.").unwrap();
        assert_eq!(v.to_string(), "8.1");
    }

    #[test]
    fn unrelated_output_is_unknown() {
        assert!(parse_version("Drush Commandline Tool 9.7.1").is_none());
        assert!(parse_version("").is_none());
        assert!(parse_version("Drush Version : .").is_none());
    }

    #[test]
    fn skips_unrunnable_candidate() {
        let runner = ScriptedRunner::new()
            .unspawnable(&["drush6"])
            .on(&["drush", "--version"], 0, "Drush Version : 8.1.15\n", "");
        let exe = locate(&runner, &["drush6", "drush"]).unwrap();
        assert_eq!(exe.command(), "drush");
        assert_eq!(exe.version_string(), Some("8.1.15"));
        assert!(exe.is_verified());
    }

    #[test]
    fn skips_failing_and_silent_candidates() {
        let runner = ScriptedRunner::new()
            .on(&["broken"], 1, "Drush Version : 8.0.0", "")
            .on(&["silent"], 0, "", "")
            .on(&["other"], 0, "some other tool 1.0", "")
            .on(&["drush"], 0, "", "Drush Version : 7.4.0");
        let exe = locate(&runner, &["broken", "silent", "other", "drush"]).unwrap();
        assert_eq!(exe.command(), "drush");
        assert_eq!(exe.version().map(Version::major), Some(7));
    }

    #[test]
    fn outdated_version_stops_the_search() {
        let runner = ScriptedRunner::new()
            .on(&["drush5"], 0, "drush version 5.9\n", "")
            .on(&["drush"], 0, "Drush Version : 8.1.15\n", "");
        let err = locate(&runner, &["drush5", "drush"]).unwrap_err();
        match err {
            DrushError::VersionTooOld {
                command,
                version,
                required,
            } => {
                assert_eq!(command, "drush5");
                assert_eq!(version, "5.9");
                assert_eq!(required, 6);
            }
            other => panic!("expected VersionTooOld, got {other:?}"),
        }
        assert!(
            runner.calls().iter().all(|argv| argv[0] != "drush"),
            "later candidates must not be probed"
        );
    }

    #[test]
    fn empty_candidate_list_is_not_found() {
        let runner = ScriptedRunner::new();
        let none: [&str; 0] = [];
        assert!(matches!(
            locate(&runner, &none),
            Err(DrushError::NotFound { .. })
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn all_failing_candidates_is_not_found() {
        let runner = ScriptedRunner::new().on(&["drush"], 127, "", "not found");
        let err = locate(&runner, &["drush6", "drush"]).unwrap_err();
        match err {
            DrushError::NotFound { candidates } => assert_eq!(candidates, ["drush6", "drush"]),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn unverified_executable_has_no_version() {
        let exe = Executable::unverified("/opt/drush/drush");
        assert_eq!(exe.command(), "/opt/drush/drush");
        assert!(exe.version().is_none());
        assert!(exe.version_string().is_none());
        assert!(!exe.is_verified());
    }
}
