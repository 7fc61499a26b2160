/*!
`get.rs`

Implements the `get` subcommand: show one command proxy in detail.

The name is looked up the same way the library does it, so `pm-info`,
`pm_info` and the alias `pmi` all resolve to the same entry.

Human output:
  - Boxed header with the native name and module
  - Aliases / scope / hidden / description lines
  - Options table: KEYWORD | FLAG | DESCRIPTION

JSON Output Shape:
{
  "status": "ok",
  "alias": "prod",
  "command": {
    "name": "pm-info",
    "identifier": "pm_info",
    "aliases": ["pmi"],
    "module": "pm",
    "scope": "site",
    "hidden": false,
    "description": "...",
    "options": [ {"keyword": "no_cache", "flag": "no-cache", "description": "..."} ]
  }
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Icon, Role, StyleOptions, box_header, color, icon, table};
use crate::cmd::shared::{Connection, descriptor_json};
use drush_wrap::drush::CommandProxy;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Command name, identifier or alias (e.g. pm-info, pm_info, pmi)
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_get(args: GetArgs, conn: &Connection) -> Result<()> {
    let drush = conn.connect()?;
    let bound = drush.command(&args.command)?;
    let proxy = bound.proxy();

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "alias": drush.alias(),
                "command": descriptor_json(proxy)?,
            })
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    print!("{}", render_detail(proxy, &style));
    Ok(())
}

fn render_detail(proxy: &CommandProxy, style: &StyleOptions) -> String {
    let d = proxy.descriptor();
    let mut out = String::new();
    let title = format!("{} {}", icon(Icon::Command, style), proxy.name());
    let subtitle = if d.module.is_empty() {
        None
    } else {
        Some(format!("module {}", d.module))
    };
    out.push_str(&box_header(title.trim(), subtitle, style));
    out.push('\n');

    let aliases = if d.aliases.is_empty() {
        "-".to_string()
    } else {
        d.aliases.join(", ")
    };
    let lines = [
        ("identifier", proxy.identifier().to_string()),
        ("aliases", aliases),
        ("scope", d.scope.clone().unwrap_or_else(|| "-".into())),
        ("hidden", d.hidden.to_string()),
    ];
    for (label, value) in lines {
        out.push_str(&format!("{} {value}\n", color(Role::Secondary, format!("{label:<11}"), style)));
    }
    if !d.description.is_empty() {
        out.push('\n');
        out.push_str(&d.description);
        out.push('\n');
    }

    out.push('\n');
    if proxy.options().is_empty() {
        out.push_str(&color(Role::Dim, "(no options)", style));
        out.push('\n');
        return out;
    }
    let rows: Vec<Vec<String>> = proxy
        .options()
        .iter()
        .map(|(keyword, spec)| {
            vec![
                keyword.clone(),
                format!("--{}", spec.flag),
                spec.description.clone(),
            ]
        })
        .collect();
    out.push_str(&table(&["KEYWORD", "FLAG", "DESCRIPTION"], &rows, style));
    out.push('\n');
    out
}
