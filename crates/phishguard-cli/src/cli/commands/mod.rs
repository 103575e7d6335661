//! CLI command handlers, one file per command.

mod batch;
mod completions;
mod features;
mod health;
mod predict;

pub use batch::run_batch;
pub use completions::{run_completions, run_man};
pub use features::run_features;
pub use health::run_health;
pub use predict::run_predict;
