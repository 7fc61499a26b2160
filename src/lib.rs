//! drush-wrap: call Drush subcommands as methods and get decoded JSON back.
//!
//! The library lives in [`drush`]; the `drush-wrap` binary is a thin clap
//! front end over it.

pub mod drush;

pub use drush::{CommandOptions, Drush, DrushError, DrushResult};
