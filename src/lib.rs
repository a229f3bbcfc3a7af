pub mod config;
pub mod plan;
pub mod trainer;
pub mod util;

pub use config::LaunchConfig;
pub use plan::{run_name, ModelSource, Provenance, ResolveError, TrainPlan};
pub use util::{run_train, TrainArgs};
