//! # Showcase CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/showcaseapp/`: Core library, UI-agnostic catalog logic
//! - `crates/showcase/`: This CLI, depends on `showcaseapp`
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/showcase/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch + context wiring (commands.rs)                  │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/showcaseapp/src/api.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging goes to stderr through `tracing-subscriber`. Set `SHOWCASE_LOG` to an
//! env-filter directive (e.g. `showcaseapp=debug`) or pass `-v`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
