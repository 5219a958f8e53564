//! Sequence-validation and level-progression engine for a node-connection
//! puzzle: the player links process steps (cut, carve, polish, assemble) with
//! directed connections and must draw each level's sequence before the
//! countdown runs out.

pub mod game;
pub mod graph;
pub mod hud;
pub mod input;
