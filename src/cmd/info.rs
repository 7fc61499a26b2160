/*!
`info.rs` - which Drush the session resolved to.

Prints the executable, its version line, the bound alias and the number of
discovered commands. `--json` emits:

{ "status": "ok", "drush": "drush", "version": "8.1.15", "verified": true,
  "alias": null, "commands": 42 }
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Icon, Role, StyleOptions, box_header, color, icon};
use crate::cmd::shared::Connection;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_info(args: InfoArgs, conn: &Connection) -> Result<()> {
    let drush = conn.connect()?;
    let exe = drush.executable();
    let count = drush.command_table().len();

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "drush": exe.command(),
                "version": exe.version_string(),
                "verified": exe.is_verified(),
                "alias": drush.alias(),
                "commands": count,
            })
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(format!("{} drush-wrap", icon(Icon::Info, &style)), None::<&str>, &style)
    );
    let version = match exe.version_string() {
        Some(v) => color(Role::Success, v, &style),
        None => color(Role::Dim, "unverified", &style),
    };
    println!("executable  {}", exe.command());
    println!("version     {version}");
    println!("alias       {}", drush.alias().map(|a| format!("@{a}")).unwrap_or_else(|| "-".into()));
    println!("commands    {count}");
    Ok(())
}
