use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod utils;

use cmd::format::{Icon, Role, StyleOptions, color, icon};
use cmd::{Connection, ExecArgs, GetArgs, InfoArgs, ListArgs, SitesArgs};

/// drush-wrap - call Drush commands and get JSON back
///
/// Command layout:
///   drush-wrap list [--all] [--json]
///   drush-wrap get  <COMMAND> [--json]
///   drush-wrap exec <COMMAND> [ARGS]... [-o KEY[=VALUE]]... [--opt-file PATH] [--direct] [--yaml]
///   drush-wrap info [--json]
///   drush-wrap sites-with-module <MODULE> [-r PATH]
///
/// Global flags / env:
///   -v / -vv          Increase verbosity (RUST_LOG overrides)
///   -q / --quiet      Errors only
///   -d / --drush CMD  Executable candidate (repeatable; or DRUSH_BIN, shell-split)
///   -a / --alias NAME Site alias (or DRUSH_ALIAS); a leading '@' is optional
///   --no-verify       Use the first candidate without a version check
///
/// Examples:
///   drush-wrap -a prod list
///   drush-wrap exec pmi views --yaml
///   drush-wrap exec sa -o local -o fields=name,root
///   drush-wrap sites-with-module views -r /var/www/drupal
#[derive(Parser, Debug)]
#[command(
    name = "drush-wrap",
    version,
    author,
    about = "drush-wrap - Drush commands as typed calls with decoded JSON results",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Drush executable candidate, probed in order (repeatable)
    #[arg(short = 'd', long = "drush", global = true, value_name = "CMD")]
    drush: Vec<String>,

    /// Site alias to bind (with or without '@')
    #[arg(short = 'a', long = "alias", global = true, value_name = "ALIAS")]
    alias: Option<String>,

    /// Skip the `--version` probe and use the first candidate as-is
    #[arg(long = "no-verify", global = true)]
    no_verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the commands Drush reports for the current alias
    List(ListArgs),

    /// Show one command with its options
    Get(GetArgs),

    /// Run a command and print its JSON result
    Exec(ExecArgs),

    /// Show the resolved executable and alias
    Info(InfoArgs),

    /// Print local site aliases that have a module enabled
    SitesWithModule(SitesArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    if let Err(e) = run(cli) {
        let style = StyleOptions::detect();
        eprintln!(
            "{} {}",
            icon(Icon::Error, &style),
            color(Role::Error, format!("error: {e:#}"), &style)
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let conn = Connection::resolve(cli.drush, cli.alias, cli.no_verify)?;

    match cli.command {
        Commands::List(args) => cmd::execute_list(args, &conn),
        Commands::Get(args) => cmd::execute_get(args, &conn),
        Commands::Exec(args) => cmd::execute_exec(args, &conn),
        Commands::Info(args) => cmd::execute_info(args, &conn),
        Commands::SitesWithModule(args) => cmd::execute_sites(args, &conn),
    }
}
