//! The command facade.
//!
//! A [`Drush`] value is one session: a resolved executable, an optional
//! target alias, and the command table discovered for it. Commands run either
//! through [`Drush::invoke`] or through a proxy obtained from
//! [`Drush::command`].

use serde_json::Value;
use tracing::{debug, info, trace};

use super::catalog::parse_catalog;
use super::error::{DrushError, DrushResult, display_argv};
use super::locate::{DEFAULT_CANDIDATES, DEFAULT_COMMAND, Executable, locate};
use super::options::{CommandOptions, FORMAT_OPTION};
use super::proxy::{BoundCommand, CommandProxy, CommandTable};
use super::runner::{Runner, SystemRunner};

/// Command that switches the alias inside Drush itself; never proxied.
pub const CONTEXT_COMMAND: &str = "site-set";

/// Command used to validate an alias.
pub const ALIAS_PROBE_COMMAND: &str = "site-alias";

/// Command that lists the catalog.
pub const CATALOG_COMMAND: &str = "help";

/// Identifiers taken by the facade's own operations.
pub const RESERVED_IDENTIFIERS: &[&str] = &[
    "invoke",
    "invoke_with",
    "build_argv",
    "set_context",
    "site_set",
    "command",
    "commands",
    "alias",
    "executable",
    "has_command_methods",
    "runner",
    "command_table",
];

/// Configures and builds a [`Drush`] facade.
#[derive(Debug, Clone)]
pub struct DrushBuilder<R = SystemRunner> {
    runner: R,
    candidates: Vec<String>,
    alias: Option<String>,
    verify: bool,
    load_commands: bool,
}

impl Default for DrushBuilder<SystemRunner> {
    fn default() -> Self {
        Self {
            runner: SystemRunner,
            candidates: Vec::new(),
            alias: None,
            verify: true,
            load_commands: true,
        }
    }
}

impl<R: Runner> DrushBuilder<R> {
    /// Use a different process runner.
    pub fn runner<T: Runner>(self, runner: T) -> DrushBuilder<T> {
        DrushBuilder {
            runner,
            candidates: self.candidates,
            alias: self.alias,
            verify: self.verify,
            load_commands: self.load_commands,
        }
    }

    /// Append one executable candidate.
    pub fn candidate(mut self, command: impl Into<String>) -> Self {
        self.candidates.push(command.into());
        self
    }

    /// Replace the candidate list.
    pub fn candidates<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn alias(mut self, alias: Option<impl Into<String>>) -> Self {
        self.alias = alias.map(Into::into);
        self
    }

    /// Probe candidates for a supported version (default: on). When off, the
    /// first candidate is used as-is.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Discover the command catalog and build proxies (default: on).
    pub fn load_commands(mut self, load: bool) -> Self {
        self.load_commands = load;
        self
    }

    pub fn build(self) -> DrushResult<Drush<R>> {
        let executable = if self.verify {
            if self.candidates.is_empty() {
                locate(&self.runner, DEFAULT_CANDIDATES)?
            } else {
                locate(&self.runner, &self.candidates[..])?
            }
        } else {
            let command = self
                .candidates
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_COMMAND);
            Executable::unverified(command)
        };

        let mut drush = Drush {
            runner: self.runner,
            executable,
            alias: None,
            load_commands: self.load_commands,
            commands: CommandTable::default(),
        };
        drush.set_context(self.alias.as_deref())?;
        Ok(drush)
    }
}

/// Facade over one Drush executable and one alias context.
#[derive(Debug)]
pub struct Drush<R: Runner = SystemRunner> {
    runner: R,
    executable: Executable,
    alias: Option<String>,
    load_commands: bool,
    commands: CommandTable,
}

impl Drush<SystemRunner> {
    /// Locate Drush with the default candidates, no alias.
    pub fn new() -> DrushResult<Self> {
        Self::builder().build()
    }

    pub fn builder() -> DrushBuilder<SystemRunner> {
        DrushBuilder::default()
    }
}

impl<R: Runner> Drush<R> {
    pub fn executable(&self) -> &Executable {
        &self.executable
    }

    /// Current alias, without the leading `@`.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn has_command_methods(&self) -> bool {
        self.load_commands
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Argument vector for one invocation.
    ///
    /// Layout: executable, `@alias` (when `use_alias` and an alias is bound),
    /// subcommand, positional args, option flags in caller order, and finally
    /// `--format=json`, which replaces any caller-supplied `format`.
    pub fn build_argv<S: AsRef<str>>(
        &self,
        subcommand: &str,
        args: &[S],
        options: &CommandOptions,
        use_alias: bool,
    ) -> Vec<String> {
        let mut argv = Vec::with_capacity(4 + args.len() + options.len());
        argv.push(self.executable.command().to_string());
        if use_alias && let Some(alias) = &self.alias {
            argv.push(format!("@{alias}"));
        }
        argv.push(subcommand.to_string());
        argv.extend(args.iter().map(|a| a.as_ref().to_string()));
        argv.extend(options.to_flags());
        argv.push(format!("--{FORMAT_OPTION}=json"));
        argv
    }

    /// Run `subcommand` against the bound alias and decode its JSON output.
    pub fn invoke<S: AsRef<str>>(
        &self,
        subcommand: &str,
        args: &[S],
        options: &CommandOptions,
    ) -> DrushResult<Value> {
        self.invoke_with(subcommand, args, options, true)
    }

    /// Like [`Self::invoke`], with explicit control over alias targeting.
    pub fn invoke_with<S: AsRef<str>>(
        &self,
        subcommand: &str,
        args: &[S],
        options: &CommandOptions,
        use_alias: bool,
    ) -> DrushResult<Value> {
        let argv = self.build_argv(subcommand, args, options, use_alias);
        debug!(argv = %display_argv(&argv), "running drush");

        let output = match self.runner.run(&argv) {
            Ok(out) => out,
            Err(source) => return Err(DrushError::Spawn { argv, source }),
        };
        trace!(code = ?output.code, stdout_bytes = output.stdout.len(), "drush exited");

        if !output.success() {
            return Err(DrushError::CommandFailed {
                stderr: output.stderr_lossy(),
                code: output.code,
                argv,
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| DrushError::Decode { argv, source })
    }

    /// Switch to `alias` (or to no alias) and rediscover commands.
    ///
    /// The alias is validated first, then the catalog is fetched and a new
    /// command table is built. Alias and table are replaced together only
    /// when all of that succeeded; on error the facade is left as it was.
    pub fn set_context(&mut self, alias: Option<&str>) -> DrushResult<()> {
        let alias = alias
            .map(|a| a.strip_prefix('@').unwrap_or(a))
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        if let Some(name) = &alias {
            self.probe_alias(name)?;
        }

        let commands = if self.load_commands {
            self.discover_commands()?
        } else {
            CommandTable::default()
        };

        self.alias = alias;
        self.commands = commands;
        Ok(())
    }

    /// Same as [`Self::set_context`].
    pub fn site_set(&mut self, alias: Option<&str>) -> DrushResult<()> {
        self.set_context(alias)
    }

    /// Look up a proxy by identifier; `pm-info`, `pm_info` and `pmi` all work.
    pub fn command(&self, name: &str) -> DrushResult<BoundCommand<'_, R>> {
        self.commands
            .get(name)
            .map(|proxy| BoundCommand::new(self, proxy))
            .ok_or_else(|| DrushError::UndefinedCommand {
                name: name.to_string(),
                alias: self.alias.clone(),
            })
    }

    /// Current proxies in canonical-name order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandProxy> {
        self.commands.iter()
    }

    pub fn command_table(&self) -> &CommandTable {
        &self.commands
    }

    fn probe_alias(&self, alias: &str) -> DrushResult<()> {
        let target = format!("@{alias}");
        match self.invoke_with(ALIAS_PROBE_COMMAND, &[target], &CommandOptions::new(), false) {
            Ok(_) => Ok(()),
            Err(e @ DrushError::CommandFailed { .. }) => Err(DrushError::InvalidAlias {
                alias: alias.to_string(),
                source: Box::new(e),
            }),
            Err(e) => Err(e),
        }
    }

    fn discover_commands(&self) -> DrushResult<CommandTable> {
        let none: [&str; 0] = [];
        let catalog = self.invoke_with(CATALOG_COMMAND, &none, &CommandOptions::new(), false)?;
        let descriptors = parse_catalog(&catalog)?
            .into_iter()
            .filter(|d| d.command != CONTEXT_COMMAND);
        let table = CommandTable::build(descriptors, RESERVED_IDENTIFIERS)?;
        info!(commands = table.len(), "loaded drush command catalog");
        Ok(table)
    }
}
