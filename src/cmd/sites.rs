/*!
`sites.rs`

Implements `sites-with-module`: print the alias of every local site that has
MODULE enabled, one per line.

Steps:
  1. `sa` proxy with local and fields=name,root,context_type
  2. with `--root`, keep entries whose root equals PATH (a trailing `/` on
     PATH is ignored) and whose context_type is `site`
  3. for each alias: switch context, run `pm-info MODULE`, print the alias
     when the result reports `status == "enabled"` for MODULE

Any Drush failure ends the run with an error.
*/

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tracing::{debug, info};

use crate::cmd::shared::Connection;
use drush_wrap::drush::{CommandOptions, Drush, DrushResult, Runner};

const SITE_ALIAS_COMMAND: &str = "sa";
const MODULE_INFO_COMMAND: &str = "pm-info";

#[derive(Args, Debug)]
pub struct SitesArgs {
    /// Module (extension) machine name to look for
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Only consider sites installed in this Drupal root
    #[arg(short = 'r', long = "root", value_name = "PATH")]
    pub root: Option<String>,
}

pub fn execute_sites(args: SitesArgs, conn: &Connection) -> Result<()> {
    let mut drush = conn.connect()?;

    let records = local_aliases(&drush).context("failed to list local site aliases")?;

    let aliases = filter_aliases(&records, args.root.as_deref());
    info!(count = aliases.len(), module = %args.module, "checking sites");

    for alias in aliases {
        drush
            .set_context(Some(&alias))
            .with_context(|| format!("failed to switch to @{alias}"))?;
        let module_info = drush
            .command(MODULE_INFO_COMMAND)?
            .call_args(&[args.module.as_str()])
            .with_context(|| format!("pm-info failed for @{alias}"))?;
        let enabled = module_enabled(&module_info, &args.module);
        debug!(alias = %alias, enabled, "module status");
        if enabled {
            println!("{alias}");
        }
    }
    Ok(())
}

/// `sa --local --fields=name,root,context_type` through the synthesized proxy.
fn local_aliases<R: Runner>(drush: &Drush<R>) -> DrushResult<Value> {
    let options = CommandOptions::new()
        .flag("local")
        .with("fields", ["name", "root", "context_type"].as_slice());
    let none: [&str; 0] = [];
    drush.command(SITE_ALIAS_COMMAND)?.call(&none, &options)
}

/// Alias names from a `site-alias` listing, optionally restricted to one
/// Drupal root. Drush reports an empty listing as `[]`.
fn filter_aliases(records: &Value, root: Option<&str>) -> Vec<String> {
    let Some(map) = records.as_object() else {
        return Vec::new();
    };
    let Some(root) = root else {
        return map.keys().cloned().collect();
    };
    let root = root.strip_suffix('/').unwrap_or(root);
    map.iter()
        .filter(|(_, record)| {
            record.get("root").and_then(Value::as_str) == Some(root)
                && record.get("context_type").and_then(Value::as_str) == Some("site")
        })
        .map(|(name, _)| name.clone())
        .collect()
}

fn module_enabled(module_info: &Value, module: &str) -> bool {
    module_info
        .get(module)
        .and_then(|m| m.get("status"))
        .and_then(Value::as_str)
        == Some("enabled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Value {
        json!({
            "dev": {"name": "dev", "root": "/var/www/d7", "context_type": "site"},
            "stage": {"name": "stage", "root": "/var/www/d7", "context_type": "site"},
            "other": {"name": "other", "root": "/srv/other", "context_type": "site"},
            "group": {"name": "group", "root": "/var/www/d7", "context_type": "group"}
        })
    }

    #[test]
    fn all_aliases_without_root() {
        let mut names = filter_aliases(&listing(), None);
        names.sort();
        assert_eq!(names, ["dev", "group", "other", "stage"]);
    }

    #[test]
    fn root_filter_ignores_trailing_slash_and_non_sites() {
        let mut names = filter_aliases(&listing(), Some("/var/www/d7/"));
        names.sort();
        assert_eq!(names, ["dev", "stage"]);
    }

    #[test]
    fn empty_listing_is_an_array() {
        assert!(filter_aliases(&json!([]), None).is_empty());
    }

    #[test]
    fn enabled_status() {
        let info = json!({"views": {"status": "enabled"}, "panels": {"status": "disabled"}});
        assert!(module_enabled(&info, "views"));
        assert!(!module_enabled(&info, "panels"));
        assert!(!module_enabled(&info, "ctools"));
        assert!(!module_enabled(&json!([]), "views"));
    }
}
