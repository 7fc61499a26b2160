//! Drush facade: locate the executable, run subcommands, decode JSON, and
//! expose one proxy per catalog command.
//!
//! Layout:
//!   runner   - process seam (`Runner`, `SystemRunner`)
//!   locate   - executable probe and version gate
//!   options  - option values and flag rendering
//!   catalog  - `help --format=json` parsing
//!   proxy    - per-command proxies and the dispatch table
//!   facade   - `Drush` / `DrushBuilder`
//!   error    - `DrushError`
//!
//! ```no_run
//! use drush_wrap::drush::{CommandOptions, Drush};
//!
//! let drush = Drush::builder().alias(Some("prod")).build()?;
//! let info = drush
//!     .command("pm-info")?
//!     .call(&["views"], &CommandOptions::new())?;
//! println!("{}", info["views"]["status"]);
//! # Ok::<(), drush_wrap::drush::DrushError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod facade;
pub mod locate;
pub mod options;
pub mod proxy;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CommandDescriptor, parse_catalog};
pub use error::{DrushError, DrushResult};
pub use facade::{Drush, DrushBuilder, RESERVED_IDENTIFIERS};
pub use locate::{Executable, MIN_MAJOR_VERSION, Version, locate, parse_version};
pub use options::{CommandOptions, OptionValue, normalize_identifier};
pub use proxy::{BoundCommand, CommandProxy, CommandTable, OptionSpec};
pub use runner::{RunOutput, Runner, SystemRunner};
