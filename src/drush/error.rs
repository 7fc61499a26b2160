//! Error taxonomy for the Drush facade.
//!
//! Every failure surfaces synchronously as one of these variants; nothing is
//! retried and nothing is swallowed.

use std::borrow::Cow;

use thiserror::Error;

/// Result alias used throughout the library.
pub type DrushResult<T> = std::result::Result<T, DrushError>;

#[derive(Debug, Error)]
pub enum DrushError {
    /// No candidate executable could be run and report a parseable version.
    #[error("unable to find a drush executable (tried: {})", display_list(.candidates))]
    NotFound { candidates: Vec<String> },

    /// A candidate reported a version below the supported minimum.
    #[error("drush {required}.x or higher is required; '{command}' reports {version}")]
    VersionTooOld {
        command: String,
        version: String,
        required: u64,
    },

    /// The subprocess could not be spawned at all.
    #[error("failed to run `{}`: {source}", display_argv(.argv))]
    Spawn {
        argv: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess exited with a non-zero status.
    #[error("`{}` exited with {}: {}", display_argv(.argv), display_code(.code), display_stderr(.stderr))]
    CommandFailed {
        argv: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },

    /// The alias validity probe failed.
    #[error("invalid alias '@{alias}'")]
    InvalidAlias {
        alias: String,
        #[source]
        source: Box<DrushError>,
    },

    /// A keyword option is not declared by the command's descriptor.
    #[error("command '{command}' has no option '{option}'")]
    UnknownOption { command: String, option: String },

    /// Catalog synthesis would expose the same identifier twice.
    #[error("cannot define command '{identifier}': the name is already in use")]
    DefinitionCollision { identifier: String },

    /// Lookup of a name that is not part of the current proxy set.
    #[error("no command named '{name}'{}", display_alias(.alias))]
    UndefinedCommand { name: String, alias: Option<String> },

    /// Exit status was 0 but stdout was not valid JSON.
    #[error("could not decode JSON output of `{}`: {source}", display_argv(.argv))]
    Decode {
        argv: Vec<String>,
        #[source]
        source: serde_json::Error,
    },

    /// The `help` catalog did not have the expected shape.
    #[error("malformed command catalog: {message}")]
    Catalog { message: String },
}

impl DrushError {
    /// Argument vector of the failed invocation, when the error carries one.
    pub fn argv(&self) -> Option<&[String]> {
        match self {
            DrushError::Spawn { argv, .. }
            | DrushError::CommandFailed { argv, .. }
            | DrushError::Decode { argv, .. } => Some(argv),
            DrushError::InvalidAlias { source, .. } => source.argv(),
            _ => None,
        }
    }
}

/// Argument vector as built, quoting only tokens a shell would split or
/// lose (empty, whitespace, quotes).
pub(crate) fn display_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            let needs_quotes = arg.is_empty()
                || arg
                    .chars()
                    .any(|c| c.is_whitespace() || c == '\'' || c == '"');
            if needs_quotes {
                shell_words::quote(arg)
            } else {
                Cow::Borrowed(arg.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "<none>".to_string()
    } else {
        items.join(", ")
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn display_stderr(stderr: &str) -> &str {
    stderr.trim_end()
}

fn display_alias(alias: &Option<String>) -> String {
    match alias {
        Some(a) => format!(" for alias '@{a}'"),
        None => String::new(),
    }
}
