//! Command catalog as reported by `drush help --format=json`.
//!
//! The payload is a JSON object keyed by module name; each module carries a
//! `commands` object keyed by native command name. Drush serializes PHP
//! arrays, so an empty mapping may arrive as `[]` and option descriptions
//! may be plain strings or objects with a `description` field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::error::{DrushError, DrushResult};

/// One catalog entry, kept as Drush reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub command: String,
    pub aliases: Vec<String>,
    pub hidden: bool,
    /// `site`, `system`, ... as reported; `None` when absent.
    pub scope: Option<String>,
    /// Native option flag -> human-readable description.
    pub options: BTreeMap<String, String>,
    pub description: String,
    /// Module (command file) the entry was listed under.
    pub module: String,
}

impl CommandDescriptor {
    /// Build a descriptor from one `commands` entry.
    ///
    /// `key` is the entry's key in the `commands` object and is used when the
    /// entry has no `command` field of its own.
    pub fn from_json(module: &str, key: &str, value: &Value) -> DrushResult<Self> {
        let obj = value.as_object().ok_or_else(|| DrushError::Catalog {
            message: format!("command '{key}' in module '{module}' is not an object"),
        })?;

        let command = obj
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string();

        Ok(CommandDescriptor {
            aliases: string_list(obj.get("aliases")),
            hidden: obj.get("hidden").is_some_and(truthy),
            scope: obj
                .get("scope")
                .and_then(Value::as_str)
                .map(str::to_string),
            options: option_map(obj.get("options")),
            description: obj
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            module: module.to_string(),
            command,
        })
    }

    pub fn is_site_scoped(&self) -> bool {
        self.scope.as_deref() == Some("site")
    }
}

/// Flatten the help payload into descriptors, in catalog order.
pub fn parse_catalog(value: &Value) -> DrushResult<Vec<CommandDescriptor>> {
    let modules = match value {
        Value::Object(m) => m,
        // An installation without commands files still answers with `[]`.
        Value::Array(a) if a.is_empty() => return Ok(Vec::new()),
        other => {
            return Err(DrushError::Catalog {
                message: format!("expected an object of modules, got {}", kind(other)),
            });
        }
    };

    let mut out = Vec::new();
    for (module, entry) in modules {
        let Some(commands) = entry.get("commands") else {
            continue;
        };
        for (key, desc) in object_entries(commands).map_err(|found| DrushError::Catalog {
            message: format!("'commands' of module '{module}' is {found}"),
        })? {
            out.push(CommandDescriptor::from_json(module, key, desc)?);
        }
    }
    Ok(out)
}

fn object_entries(value: &Value) -> Result<Vec<(&String, &Value)>, &'static str> {
    match value {
        Value::Object(m) => Ok(m.iter().collect()),
        Value::Array(a) if a.is_empty() => Ok(Vec::new()),
        Value::Null => Ok(Vec::new()),
        other => Err(kind(other)),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        // PHP arrays with non-sequential keys serialize as objects.
        Some(Value::Object(m)) => m
            .values()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn option_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(m)) = value else {
        return BTreeMap::new();
    };
    m.iter()
        .map(|(flag, desc)| {
            let text = match desc {
                Value::String(s) => s.clone(),
                Value::Object(o) => o
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                _ => String::new(),
            };
            (flag.clone(), text)
        })
        .collect()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => !s.is_empty() && s != "0",
        _ => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drush::testing::CATALOG;
    use serde_json::json;

    #[test]
    fn parses_sample_catalog() {
        let value: Value = serde_json::from_str(CATALOG).unwrap();
        let cmds = parse_catalog(&value).unwrap();
        let mut names: Vec<&str> = cmds.iter().map(|c| c.command.as_str()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            ["pm-info", "pm-list", "site-alias", "site-set", "status"]
        );

        let sa = cmds.iter().find(|c| c.command == "site-alias").unwrap();
        assert_eq!(sa.aliases, ["sa"]);
        assert_eq!(sa.module, "core");
        assert_eq!(sa.options.get("fields").map(String::as_str), Some("Fields to output."));
        assert!(!sa.is_site_scoped());

        let pml = cmds.iter().find(|c| c.command == "pm-list").unwrap();
        assert!(pml.hidden);
        assert!(pml.options.is_empty());
        assert!(pml.is_site_scoped());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let value = json!({"m": {"commands": {"cc": {}}}});
        let cmds = parse_catalog(&value).unwrap();
        assert_eq!(cmds.len(), 1);
        let cc = &cmds[0];
        assert_eq!(cc.command, "cc");
        assert!(cc.aliases.is_empty());
        assert!(!cc.hidden);
        assert_eq!(cc.scope, None);
        assert_eq!(cc.description, "");
    }

    #[test]
    fn empty_php_arrays_are_accepted() {
        assert!(parse_catalog(&json!([])).unwrap().is_empty());
        let value = json!({"empty": {"commands": []}, "untitled": {"title": "x"}});
        assert!(parse_catalog(&value).unwrap().is_empty());
    }

    #[test]
    fn wrong_shapes_are_catalog_errors() {
        assert!(matches!(
            parse_catalog(&json!("nope")),
            Err(DrushError::Catalog { .. })
        ));
        assert!(matches!(
            parse_catalog(&json!({"m": {"commands": 3}})),
            Err(DrushError::Catalog { .. })
        ));
        assert!(matches!(
            parse_catalog(&json!({"m": {"commands": {"x": "y"}}})),
            Err(DrushError::Catalog { .. })
        ));
    }

    #[test]
    fn object_aliases_and_numeric_hidden() {
        let value = json!({"m": {"commands": {"x": {
            "command": "x-ray",
            "aliases": {"0": "xr", "2": "xx"},
            "hidden": 1
        }}}});
        let cmds = parse_catalog(&value).unwrap();
        assert_eq!(cmds[0].command, "x-ray");
        assert_eq!(cmds[0].aliases, ["xr", "xx"]);
        assert!(cmds[0].hidden);
    }
}
