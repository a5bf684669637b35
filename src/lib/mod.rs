//! Shared library modules providing error types, file helpers, path resolution, and telemetry.

pub mod errors;
pub mod fs;
pub mod paths;
pub mod telemetry;
