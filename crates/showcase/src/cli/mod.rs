//! # CLI Behavior
//!
//! This is **one possible UI client** for showcase, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Storefront
//!
//! Running `showcase` with no arguments is `showcase store`: the published catalog,
//! filtered by `--category` (default `all`) and `--search`. `showcase featured`
//! shows the featured entries with the live services each one recommends.
//!
//! ## Admin
//!
//! `showcase admin ...` is the admin console. Bulk commands (`delete`, `publish`,
//! `unpublish`, `retire`, `restore`) take one or more ids. `add`/`edit` take one flag per
//! field; `edit` only changes the fields that are given. Featured entries toggle their
//! recommendations with repeated `--recommend <id>`.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch, one handler per command
//! - `render`: Output formatting (tables, cards, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
