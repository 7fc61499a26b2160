//! Scripted runner shared by the unit tests.

use std::cell::RefCell;
use std::io;

use super::runner::{RunOutput, Runner};

#[derive(Debug)]
enum Reply {
    Output(RunOutput),
    SpawnError,
}

/// Answers invocations by argv prefix and records every call it sees.
#[derive(Debug)]
pub(crate) struct ScriptedRunner {
    rules: Vec<(Vec<String>, Reply)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Reply to any argv starting with `prefix`. Earlier rules win.
    pub(crate) fn on(mut self, prefix: &[&str], code: i32, stdout: &str, stderr: &str) -> Self {
        self.rules.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Reply::Output(RunOutput {
                code: Some(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            }),
        ));
        self
    }

    pub(crate) fn unspawnable(mut self, prefix: &[&str]) -> Self {
        self.rules.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            Reply::SpawnError,
        ));
        self
    }

    /// Standard `drush --version` + `help` replies for a verified facade.
    pub(crate) fn with_drush(self, catalog: &str) -> Self {
        self.on(&["drush", "--version"], 0, " Drush Version   :  8.1.15 \n", "")
            .on(&["drush", "help"], 0, catalog, "")
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub(crate) fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|argv| argv.iter().any(|a| a == subcommand))
            .collect()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> io::Result<RunOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        let reply = self
            .rules
            .iter()
            .find(|(prefix, _)| argv.len() >= prefix.len() && argv[..prefix.len()] == prefix[..])
            .map(|(_, reply)| reply);
        match reply {
            Some(Reply::Output(out)) => Ok(out.clone()),
            Some(Reply::SpawnError) | None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such program: {}", argv.first().map(String::as_str).unwrap_or("")),
            )),
        }
    }
}

/// A small catalog in the shape `drush help --format=json` produces.
pub(crate) const CATALOG: &str = r#"{
  "core": {
    "title": "Core drush commands",
    "commands": {
      "status": {
        "command": "status",
        "aliases": ["st", "core-status"],
        "hidden": false,
        "scope": "site",
        "options": {"show-passwords": "Show database password.", "full": "Show all values."},
        "description": "Provides a birds-eye view of the current Drupal installation."
      },
      "site-set": {
        "command": "site-set",
        "aliases": ["use"],
        "hidden": false,
        "scope": "system",
        "options": [],
        "description": "Set a site alias to work on that will persist for the current session."
      },
      "site-alias": {
        "command": "site-alias",
        "aliases": ["sa"],
        "hidden": false,
        "scope": "system",
        "options": {"local": "Only display sites that are available on the local system.", "fields": {"description": "Fields to output.", "example-value": "name,root"}},
        "description": "Print site alias records for all known site aliases and local sites."
      }
    }
  },
  "pm": {
    "title": "Project manager commands",
    "commands": {
      "pm-info": {
        "command": "pm-info",
        "aliases": ["pmi"],
        "hidden": false,
        "scope": "site",
        "options": {"no-cache": "Skip the cache."},
        "description": "Show detailed info for one or more extensions."
      },
      "pm-list": {
        "command": "pm-list",
        "aliases": ["pml"],
        "hidden": true,
        "scope": "site",
        "options": [],
        "description": "Show a list of available extensions."
      }
    }
  }
}"#;
