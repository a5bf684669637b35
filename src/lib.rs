//! Library crate root re-exporting the profile store, launcher, and CLI modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod launcher;
pub mod runtime;
pub mod store;
