pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod plugin;
pub mod progression;
pub mod session;

pub use catalog::{CatalogError, DifficultyTier, LevelCatalog, LevelSpec};
pub use config::SessionConfig;
pub use evaluator::{Evaluation, evaluate, sequences_match};
pub use plugin::{LevelPlugin, NodeInput, NodeInputType, ResetRequested};
pub use progression::{Progression, RunStats};
pub use session::{LevelSession, Phase, SessionEvent, SessionSnapshot};
