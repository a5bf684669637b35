//! Launch-mode orchestration and exit-code reporting.
mod startup;

pub use startup::{child_exit_byte, launch_with, run_launch, RuntimeExit};
