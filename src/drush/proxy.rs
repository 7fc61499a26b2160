//! Command proxies: the dispatch table built from the catalog.
//!
//! Each catalog entry becomes a [`CommandProxy`] exposed under its
//! normalized canonical name and every normalized alias. The whole table is
//! built up front and handed to the facade in one piece, so a context switch
//! either installs a complete new table or leaves the old one untouched.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::catalog::CommandDescriptor;
use super::error::{DrushError, DrushResult};
use super::facade::Drush;
use super::options::{CommandOptions, normalize_identifier};
use super::runner::Runner;

/// Native spelling and description of one option keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub flag: String,
    pub description: String,
}

/// Callable metadata for one Drush command.
#[derive(Debug, Clone)]
pub struct CommandProxy {
    identifier: String,
    aliases: Vec<String>,
    options: BTreeMap<String, OptionSpec>,
    descriptor: CommandDescriptor,
}

impl CommandProxy {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        // Flags are visited in sorted order, so on a keyword clash
        // (`no-cache` vs `no_cache`) the hyphenated spelling is kept.
        let mut options: BTreeMap<String, OptionSpec> = BTreeMap::new();
        for (flag, description) in &descriptor.options {
            let keyword = normalize_identifier(flag);
            if let Some(kept) = options.get(&keyword) {
                warn!(
                    command = %descriptor.command,
                    kept = %kept.flag,
                    dropped = %flag,
                    "option flags share keyword '{keyword}'"
                );
                continue;
            }
            options.insert(
                keyword,
                OptionSpec {
                    flag: flag.clone(),
                    description: description.clone(),
                },
            );
        }
        Self {
            identifier: normalize_identifier(&descriptor.command),
            aliases: descriptor
                .aliases
                .iter()
                .map(|a| normalize_identifier(a))
                .collect(),
            options,
            descriptor,
        }
    }

    /// Normalized canonical name, e.g. `pm_info`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Native command name passed to Drush, e.g. `pm-info`.
    pub fn name(&self) -> &str {
        &self.descriptor.command
    }

    /// Normalized alias identifiers.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Keyword -> native option table.
    pub fn options(&self) -> &BTreeMap<String, OptionSpec> {
        &self.options
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Every identifier this proxy is exposed under, canonical first.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identifier.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Translate keyword options to native flag names.
    ///
    /// Values and order are kept; an undeclared keyword is an
    /// [`DrushError::UnknownOption`].
    pub fn translate(&self, options: &CommandOptions) -> DrushResult<CommandOptions> {
        let mut native = CommandOptions::new();
        for (keyword, value) in options.iter() {
            let spec = self
                .options
                .get(keyword)
                .ok_or_else(|| DrushError::UnknownOption {
                    command: self.descriptor.command.clone(),
                    option: keyword.to_string(),
                })?;
            native.set(spec.flag.clone(), value.clone());
        }
        Ok(native)
    }
}

/// Identifier -> proxy dispatch table for one catalog refresh.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    proxies: BTreeMap<String, CommandProxy>,
    exposed: BTreeMap<String, String>,
}

impl CommandTable {
    /// Build a table, refusing any identifier that is already taken, either
    /// by `reserved` or by an earlier proxy.
    pub fn build<I>(descriptors: I, reserved: &[&str]) -> DrushResult<Self>
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let mut table = CommandTable::default();
        for descriptor in descriptors {
            let proxy = CommandProxy::new(descriptor);
            let canonical = proxy.name().to_string();

            let mut ids: Vec<&str> = Vec::new();
            for id in proxy.identifiers() {
                if ids.contains(&id) {
                    continue;
                }
                if reserved.contains(&id) || table.exposed.contains_key(id) {
                    return Err(DrushError::DefinitionCollision {
                        identifier: id.to_string(),
                    });
                }
                ids.push(id);
            }

            for id in ids {
                table.exposed.insert(id.to_string(), canonical.clone());
            }
            table.proxies.insert(canonical, proxy);
        }
        Ok(table)
    }

    /// Look up by exposed identifier (hyphenated names are normalized first).
    pub fn get(&self, name: &str) -> Option<&CommandProxy> {
        let canonical = self.exposed.get(&normalize_identifier(name))?;
        self.proxies.get(canonical)
    }

    /// Proxies in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandProxy> {
        self.proxies.values()
    }

    /// All exposed identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.exposed.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}

/// A proxy borrowed together with the facade that owns it.
pub struct BoundCommand<'a, R: Runner> {
    drush: &'a Drush<R>,
    proxy: &'a CommandProxy,
}

impl<'a, R: Runner> BoundCommand<'a, R> {
    pub(crate) fn new(drush: &'a Drush<R>, proxy: &'a CommandProxy) -> Self {
        Self { drush, proxy }
    }

    pub fn proxy(&self) -> &'a CommandProxy {
        self.proxy
    }

    /// Run the command with positional `args` and keyword `options`.
    pub fn call<S: AsRef<str>>(&self, args: &[S], options: &CommandOptions) -> DrushResult<Value> {
        let native = self.proxy.translate(options)?;
        self.drush.invoke(self.proxy.name(), args, &native)
    }

    /// Run the command without options.
    pub fn call_args<S: AsRef<str>>(&self, args: &[S]) -> DrushResult<Value> {
        self.call(args, &CommandOptions::new())
    }
}
