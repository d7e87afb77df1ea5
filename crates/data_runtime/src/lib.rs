//! data_runtime: data schemas and loaders.
//!
//! Ability tuning lives in TOML under the workspace `data/` root so server
//! and tooling crates can depend on a stable data API without hardcoding
//! numbers.

pub mod specs {
    pub mod abilities;
}
