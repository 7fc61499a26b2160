/*!
Command dispatcher module: declarations and re-exports only.

Layout:
  src/cmd/
    mod.rs      (this file)
    list.rs     (ListArgs  + execute_list)
    get.rs      (GetArgs   + execute_get)
    exec.rs     (ExecArgs  + execute_exec)
    info.rs     (InfoArgs  + execute_info)
    sites.rs    (SitesArgs + execute_sites)
    shared.rs   (Connection, option parsing, result rendering)
    format.rs   (tables, headers, color)

Conventions:
  - Each subcommand module exposes one public `execute_*` function taking
    its args and the resolved `Connection`, returning `anyhow::Result<()>`.
  - `--json` output goes to stdout as a single object; logs go to stderr.
*/

pub mod exec;
pub mod format;
pub mod get;
pub mod info;
pub mod list;
pub mod shared;
pub mod sites;

pub use exec::{ExecArgs, execute_exec};
pub use get::{GetArgs, execute_get};
pub use info::{InfoArgs, execute_info};
pub use list::{ListArgs, execute_list};
pub use shared::Connection;
pub use sites::{SitesArgs, execute_sites};
