//! `docdrift_core` audits a documentation tree against the Lua source tree it
//! describes. It extracts the declared interface (functions and events) of
//! every module, collects what the documentation currently covers, and
//! reports drift in both directions.
//!
//! ## Pipeline
//!
//! ```text
//! source root                          documentation root
//!   → scanner (modules, categories)      → catalog (file markers, consolidated pages)
//!   → extractor (functions, events)      │
//!            ╰──────────→ reconcile ←────╯
//!                            → report (text, JSON, GitHub annotations)
//!                            → prune / scaffold (explicit repairs)
//! ```
//!
//! ## Modules
//!
//! - [`config`] loads `docdrift.toml`: roots, extensions, exclusions,
//!   category overrides and the scaffold template.
//!
//! ## Key Types
//!
//! - [`InterfaceMap`] maps module names to their per-category functions and
//!   events, with the files each name was seen in.
//! - [`Discrepancy`] is a name held by exactly one side, with its
//!   [`Direction`].
//! - [`AuditReport`] is the full result of a run, including recoverable
//!   [`ScanWarning`]s.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docdrift_core::AuditOptions;
//! use docdrift_core::render_text;
//! use docdrift_core::run_audit;
//!
//! let options = AuditOptions::new("modules", "docs/modules");
//! let audit = run_audit(&options)?;
//! print!("{}", render_text(&audit.report));
//! # Ok::<(), docdrift_core::DocDriftError>(())
//! ```

pub use audit::*;
pub use catalog::*;
pub use config::*;
pub use diagnostic::*;
pub use error::*;
pub use extractor::*;
pub use model::*;
pub use prune::*;
pub use reconcile::*;
pub use report::*;
pub use scaffold::*;
pub use scanner::*;

mod audit;
mod catalog;
pub mod config;
mod diagnostic;
#[allow(unused_assignments)]
mod error;
mod extractor;
mod model;
mod prune;
mod reconcile;
mod report;
mod scaffold;
mod scanner;
pub(crate) mod walk;

#[cfg(test)]
mod __fixtures;
