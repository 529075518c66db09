//! Pillar CLI library: rendering and one-shot run logic shared by the `pillar` binary and its
//! interactive REPL.
//!
//! - [`display`]: text report (pillar card, hierarchy, execution table, sources).
//! - [`run`]: backend selection (Gemini or replay), [`run_topic`], CSV export.

pub mod display;
pub mod run;

pub use run::{build_backend, print_strategy, run_topic, write_csv, CsvTarget, RunError, RunOptions};
