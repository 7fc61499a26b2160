/*!
`list.rs`

Implements the `list` subcommand: enumerate the command proxies the facade
built from `drush help --format=json` for the current alias.

Behavior:
  - Hidden commands are skipped unless `--all` is given.
  - Human output is a table: # | NAME | ALIASES | OPTIONS | DESCRIPTION
  - `--json` prints a single object (below) and nothing else on stdout.

JSON Output Shape:
{
  "status": "ok",
  "drush": "drush",
  "version": "8.1.15",
  "alias": "prod",
  "elapsed_ms": 31,
  "count": 2,
  "commands": [
    { "name": "pm-info", "identifier": "pm_info", "aliases": ["pmi"], ... }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use crate::cmd::format::{Icon, Role, StyleOptions, box_header, color, icon, table};
use crate::cmd::shared::{Connection, descriptor_json};
use drush_wrap::drush::CommandProxy;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include commands Drush marks as hidden
    #[arg(long)]
    pub all: bool,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs, conn: &Connection) -> Result<()> {
    let started = Instant::now();
    let drush = conn.connect()?;
    let elapsed_ms = started.elapsed().as_millis();

    let proxies = visible(drush.commands(), args.all);

    if args.json {
        let commands = proxies
            .iter()
            .map(|p| descriptor_json(p))
            .collect::<Result<Vec<_>>>()?;
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "drush": drush.executable().command(),
                "version": drush.executable().version_string(),
                "alias": drush.alias(),
                "elapsed_ms": elapsed_ms,
                "count": commands.len(),
                "commands": commands,
            })
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    let subtitle = match drush.alias() {
        Some(alias) => format!("@{alias}  {elapsed_ms}ms"),
        None => format!("{elapsed_ms}ms"),
    };
    println!(
        "{}",
        box_header(
            format!("{} Commands ({})", icon(Icon::List, &style), proxies.len()),
            Some(subtitle),
            &style,
        )
    );
    if proxies.is_empty() {
        println!("{}", color(Role::Dim, "(no commands)", &style));
        return Ok(());
    }
    println!(
        "{}",
        table(
            &["#", "NAME", "ALIASES", "OPTIONS", "DESCRIPTION"],
            &rows(&proxies),
            &style,
        )
    );
    Ok(())
}

fn visible<'a>(proxies: impl Iterator<Item = &'a CommandProxy>, all: bool) -> Vec<&'a CommandProxy> {
    proxies
        .filter(|p| all || !p.descriptor().hidden)
        .collect()
}

fn rows(proxies: &[&CommandProxy]) -> Vec<Vec<String>> {
    proxies
        .iter()
        .enumerate()
        .map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.name().to_string(),
                p.descriptor().aliases.join(", "),
                p.options().len().to_string(),
                p.descriptor().description.clone(),
            ]
        })
        .collect()
}
