// Root app shell and re-exports for workspace crates used by bins.
pub use ability_core as ability;
pub use data_runtime as data;
