//! `factrack-recon` — facility reporting reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded facility rosters, returns a
//! classified report. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod roster;
pub mod summary;
pub mod variation;

pub use config::ReconConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use matcher::{match_names, names_match, MatchStrategy};
pub use model::{ReconInput, ReconReport, ReconResult};
pub use normalize::{extract_core, normalize};
pub use roster::{deduplicate, parse_list};
pub use variation::match_with_variation;
