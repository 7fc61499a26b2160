/*!
`exec.rs`

Implements the `exec` subcommand: run one Drush command and print its
decoded JSON result.

Two paths:
  - default   : resolve COMMAND through the proxy table (name, identifier
                or alias), translate option keywords to native flags and
                reject options the command does not declare.
  - --direct  : skip catalog discovery and pass COMMAND and options to
                Drush verbatim (`invoke`), for commands that are hidden or
                when the catalog is slow.

Options:
  -o / --option KEY[=VALUE]   repeatable; a bare KEY is a boolean flag
  --opt-file PATH             JSON or YAML object; -o entries win
  --yaml                      print YAML instead of pretty JSON

`--format` is always forced to json, so a caller-supplied `format` option
is dropped.
*/

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::cmd::shared::{Connection, load_option_file, parse_option_pairs, render_value};
use drush_wrap::drush::options::FORMAT_OPTION;
use drush_wrap::drush::{CommandOptions, normalize_identifier};

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Command to run (native name, identifier or alias)
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Positional arguments passed to the command
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Option KEY=VALUE, or bare KEY for a flag (repeatable)
    #[arg(short = 'o', long = "option", value_name = "KEY[=VALUE]")]
    pub options: Vec<String>,

    /// Load options from a JSON or YAML object file
    #[arg(long = "opt-file", value_name = "PATH")]
    pub opt_file: Option<String>,

    /// Bypass the command catalog and invoke Drush directly
    #[arg(long)]
    pub direct: bool,

    /// Print the result as YAML
    #[arg(long)]
    pub yaml: bool,
}

pub fn execute_exec(args: ExecArgs, conn: &Connection) -> Result<()> {
    let mut options = parse_option_pairs(&args.options)?;
    if let Some(path) = &args.opt_file {
        load_option_file(path, &mut options)?;
    }

    let value = if args.direct {
        let drush = conn.connect_bare()?;
        debug!(command = %args.command, "direct invocation");
        drush.invoke(&args.command, &args.args, &options)?
    } else {
        let drush = conn.connect()?;
        let bound = drush.command(&args.command)?;
        bound.call(&args.args, &keyword_options(&options))?
    };

    println!("{}", render_value(&value, args.yaml)?.trim_end());
    Ok(())
}

/// Re-key options by normalized keyword so `-o no-cache` and `-o no_cache`
/// both match a declared option. `format` is dropped.
fn keyword_options(options: &CommandOptions) -> CommandOptions {
    options
        .iter()
        .filter(|(name, _)| *name != FORMAT_OPTION)
        .map(|(name, value)| (normalize_identifier(name), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drush_wrap::drush::OptionValue;

    #[test]
    fn option_keys_are_normalized() {
        let opts = CommandOptions::new()
            .flag("no-cache")
            .with("show_passwords", "1")
            .with("format", "yaml");
        let keyed = keyword_options(&opts);
        let names: Vec<_> = keyed.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, ["no_cache", "show_passwords"]);
        assert_eq!(keyed.get("no_cache"), Some(&OptionValue::Bool(true)));
    }
}
