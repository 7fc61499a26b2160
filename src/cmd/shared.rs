/*!
shared.rs - helpers shared by the subcommands.

  Connection         executable candidates / alias / verify, resolved from
                     CLI flags with DRUSH_BIN / DRUSH_ALIAS env fallback
  parse_option_pairs KEY[=VALUE] strings -> CommandOptions
  load_option_file   JSON or YAML object merged under CLI options
  render_value       pretty JSON or YAML for results
  descriptor_json    machine-readable view of one proxy
*/

use anyhow::{Context, Result, bail};
use drush_wrap::drush::{CommandOptions, CommandProxy, Drush, OptionSpec, OptionValue};
use serde::Serialize;
use serde_json::Value;

/// Env var holding the executable candidate list (shell-split).
pub const ENV_DRUSH_BIN: &str = "DRUSH_BIN";
/// Env var holding the default alias.
pub const ENV_DRUSH_ALIAS: &str = "DRUSH_ALIAS";

/// How to reach Drush, as configured on the command line.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub candidates: Vec<String>,
    pub alias: Option<String>,
    pub verify: bool,
}

impl Connection {
    /// Resolve flags against the environment (flag > env > library default).
    pub fn resolve(drush: Vec<String>, alias: Option<String>, no_verify: bool) -> Result<Self> {
        let candidates = if drush.is_empty() {
            match non_empty_env(ENV_DRUSH_BIN) {
                Some(raw) => shell_words::split(&raw)
                    .with_context(|| format!("failed to parse {ENV_DRUSH_BIN}: '{raw}'"))?,
                None => Vec::new(),
            }
        } else {
            drush
        };
        let alias = alias.or_else(|| non_empty_env(ENV_DRUSH_ALIAS));
        Ok(Connection {
            candidates,
            alias,
            verify: !no_verify,
        })
    }

    /// Build a facade with command discovery.
    pub fn connect(&self) -> Result<Drush> {
        self.open(true)
    }

    /// Build a facade without the catalog query (generic invoke only).
    pub fn connect_bare(&self) -> Result<Drush> {
        self.open(false)
    }

    fn open(&self, load_commands: bool) -> Result<Drush> {
        Drush::builder()
            .candidates(self.candidates.iter().cloned())
            .alias(self.alias.as_deref())
            .verify(self.verify)
            .load_commands(load_commands)
            .build()
            .context("failed to start drush session")
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Parse `KEY=VALUE` (valued option) and `KEY` (bare flag) strings.
pub fn parse_option_pairs(pairs: &[String]) -> Result<CommandOptions> {
    let mut opts = CommandOptions::new();
    for raw in pairs {
        let raw = raw.trim().trim_start_matches("--");
        let (key, value) = match raw.split_once('=') {
            Some((k, v)) => (k.trim(), OptionValue::from(v.trim())),
            None => (raw, OptionValue::Bool(true)),
        };
        if key.is_empty() {
            bail!("invalid option (empty name): '{raw}'");
        }
        opts.set(key, value);
    }
    Ok(opts)
}

/// Merge options from a JSON or YAML object file; entries already present in
/// `opts` win.
pub fn load_option_file(path: &str, opts: &mut CommandOptions) -> Result<()> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("failed to read option file: {path}"))?;
    let lower = path.to_ascii_lowercase();
    let value: Value = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&raw).context("failed to parse YAML option file")?;
        serde_json::to_value(yaml).context("failed to convert YAML options to JSON")?
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON option file")?
    };

    let obj = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("option file root must be an object"))?;

    for (key, v) in obj {
        if opts.get(key).is_some() {
            continue;
        }
        let value = match v {
            Value::Null => continue,
            Value::Bool(b) => OptionValue::Bool(*b),
            Value::String(s) => OptionValue::Value(s.clone()),
            Value::Number(n) => OptionValue::Value(n.to_string()),
            Value::Array(items) => OptionValue::List(items.iter().map(scalar_text).collect()),
            Value::Object(_) => bail!("option '{key}' in {path} must not be an object"),
        };
        opts.set(key.clone(), value);
    }
    Ok(())
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serialize a decoded result for printing.
pub fn render_value(value: &Value, yaml: bool) -> Result<String> {
    if yaml {
        serde_yaml::to_string(value).context("failed to render result as YAML")
    } else {
        serde_json::to_string_pretty(value).context("failed to render result as JSON")
    }
}

#[derive(Serialize)]
struct OptionView<'a> {
    keyword: &'a str,
    #[serde(flatten)]
    spec: &'a OptionSpec,
}

/// Machine-readable summary of one proxy: the catalog descriptor plus
/// `name`, `identifier` and the keyword option table.
pub fn descriptor_json(proxy: &CommandProxy) -> Result<Value> {
    let mut value =
        serde_json::to_value(proxy.descriptor()).context("failed to serialize command")?;
    let options: Vec<OptionView<'_>> = proxy
        .options()
        .iter()
        .map(|(keyword, spec)| OptionView { keyword, spec })
        .collect();
    if let Value::Object(map) = &mut value {
        map.insert("name".into(), Value::from(proxy.name()));
        map.insert("identifier".into(), Value::from(proxy.identifier()));
        map.insert(
            "options".into(),
            serde_json::to_value(options).context("failed to serialize options")?,
        );
    }
    Ok(value)
}
