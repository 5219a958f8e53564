// game/progression.rs

use crate::game::catalog::{LevelCatalog, LevelSpec};
use serde::Serialize;

/// Where the player goes after clearing a level
#[derive(Debug, Clone, PartialEq)]
pub enum Progression<'a> {
    /// Another level follows
    Next(&'a LevelSpec),
    /// The cleared level was the last one
    Completed,
}

/// Find the level that follows `current`
pub fn next_level(catalog: &LevelCatalog, current: usize) -> Progression<'_> {
    match catalog.get(current + 1) {
        Ok(spec) => Progression::Next(spec),
        Err(_) => Progression::Completed,
    }
}

/// Check if this is the final level
pub fn is_final_level(catalog: &LevelCatalog, level: usize) -> bool {
    level == catalog.max_level()
}

/// Get progress as a percentage (0.0 to 100.0) of levels cleared
pub fn progress_percentage(catalog: &LevelCatalog, levels_cleared: usize) -> f32 {
    if catalog.is_empty() {
        return 0.0;
    }
    (levels_cleared.min(catalog.len()) as f32 / catalog.len() as f32) * 100.0
}

/// Counters for the current run (never persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Levels won so far
    pub levels_cleared: usize,
    /// Attempts that ran out of time
    pub failures: usize,
    /// Attempts the player abandoned with reset
    pub resets: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_level() {
        let catalog = LevelCatalog::load().unwrap();

        match next_level(&catalog, 1) {
            Progression::Next(spec) => assert_eq!(spec.index, 2),
            Progression::Completed => panic!("level 2 exists"),
        }
        assert_eq!(next_level(&catalog, 15), Progression::Completed);
    }

    #[test]
    fn test_is_final_level() {
        let catalog = LevelCatalog::load().unwrap();

        assert!(!is_final_level(&catalog, 14));
        assert!(is_final_level(&catalog, 15));
    }

    #[test]
    fn test_progress_percentage() {
        let catalog = LevelCatalog::load().unwrap();

        assert_eq!(progress_percentage(&catalog, 0), 0.0);
        assert!((progress_percentage(&catalog, 5) - 33.33).abs() < 0.1);
        assert_eq!(progress_percentage(&catalog, 15), 100.0);
        assert_eq!(progress_percentage(&catalog, 99), 100.0);
    }

    #[test]
    fn test_run_stats_default() {
        let stats = RunStats::default();
        assert_eq!(stats.levels_cleared, 0);
        assert_eq!(stats.failures, 0);
        assert_eq!(stats.resets, 0);
    }
}
