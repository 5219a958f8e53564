use crate::graph::{NodeLabel, format_sequence};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const LEVELS_JSON: &str = include_str!("../../assets/levels.json");

/// Errors raised while loading or querying the level catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level data contains no levels")]
    Empty,
    #[error("level indices must run 1..N without gaps: expected {expected}, found {found}")]
    NonContiguous { expected: usize, found: usize },
    #[error("level {level} has an empty sequence")]
    EmptySequence { level: usize },
    #[error("level {level} has an invalid time budget of {secs}s")]
    InvalidTimeBudget { level: usize, secs: f32 },
    /// Past the last level: every level has been completed
    #[error("level {0} does not exist")]
    LevelNotFound(usize),
}

/// Difficulty tiers, from first tutorial to final master levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DifficultyTier {
    Tutorial,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyTier::Tutorial => "TUTORIAL",
            DifficultyTier::Intermediate => "INTERMEDIATE",
            DifficultyTier::Advanced => "ADVANCED",
            DifficultyTier::Expert => "EXPERT",
            DifficultyTier::Master => "MASTER",
        };
        f.write_str(name)
    }
}

/// One level: the sequence to draw and how long the player has
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub index: usize,
    pub sequence: Vec<NodeLabel>,
    pub time_budget_secs: f32,
    pub difficulty: DifficultyTier,
    pub description: String,
}

impl LevelSpec {
    /// Whether the sequence visits some node more than once
    pub fn has_repeated_nodes(&self) -> bool {
        self.sequence
            .iter()
            .enumerate()
            .any(|(i, label)| self.sequence[..i].contains(label))
    }

    /// One-line description shown when the level opens
    pub fn banner(&self) -> String {
        let mut banner = format!(
            "Level {} ({}): {} | sequence: {}",
            self.index,
            self.difficulty,
            self.description,
            format_sequence(&self.sequence)
        );
        if self.has_repeated_nodes() {
            banner.push_str(" | nodes repeat");
        }
        banner
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    levels: Vec<LevelSpec>,
}

/// Resource holding every level, indexed densely from 1
#[derive(Resource, Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelSpec>,
}

impl LevelCatalog {
    /// Load the catalog from the embedded level data
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(LEVELS_JSON)
    }

    /// Parse and validate level data
    ///
    /// Format: `{ "levels": [ { "index": 1, "sequence": ["cut", ...],
    /// "time_budget_secs": 300, "difficulty": "TUTORIAL", "description": "..." } ] }`
    /// Levels may appear in any order but must cover 1..N exactly.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_levels(file.levels)
    }

    pub fn from_levels(mut levels: Vec<LevelSpec>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        levels.sort_by_key(|level| level.index);

        for (i, level) in levels.iter().enumerate() {
            let expected = i + 1;
            if level.index != expected {
                return Err(CatalogError::NonContiguous {
                    expected,
                    found: level.index,
                });
            }
            if level.sequence.is_empty() {
                return Err(CatalogError::EmptySequence { level: level.index });
            }
            if !level.time_budget_secs.is_finite() || level.time_budget_secs <= 0.0 {
                return Err(CatalogError::InvalidTimeBudget {
                    level: level.index,
                    secs: level.time_budget_secs,
                });
            }
        }

        log::debug!("Level catalog validated: {} levels", levels.len());
        Ok(LevelCatalog { levels })
    }

    /// Look up a level by its 1-based index
    pub fn get(&self, index: usize) -> Result<&LevelSpec, CatalogError> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or(CatalogError::LevelNotFound(index))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_ok()
    }

    /// Number of levels (also the highest index)
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn max_level(&self) -> usize {
        self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.levels.iter()
    }
}

/// System to load the level catalog
/// Runs first in Startup; the session is created from it right after
pub fn setup_level_catalog(mut commands: Commands, mut exit: MessageWriter<AppExit>) {
    match LevelCatalog::load() {
        Ok(catalog) => {
            info!("✓ Level catalog loaded: {} levels", catalog.len());
            for tier in [
                DifficultyTier::Tutorial,
                DifficultyTier::Intermediate,
                DifficultyTier::Advanced,
                DifficultyTier::Expert,
                DifficultyTier::Master,
            ] {
                let count = catalog.iter().filter(|level| level.difficulty == tier).count();
                info!("  - {}: {} levels", tier, count);
            }

            commands.insert_resource(catalog);
        }
        Err(e) => {
            error!("Failed to load level catalog: {}", e);
            exit.write(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeLabel::*;

    const TEST_JSON: &str = r#"{
        "levels": [
            { "index": 2, "sequence": ["carve", "cut"], "time_budget_secs": 20,
              "difficulty": "INTERMEDIATE", "description": "Second" },
            { "index": 1, "sequence": ["cut", "carve"], "time_budget_secs": 30.5,
              "difficulty": "TUTORIAL", "description": "First" }
        ]
    }"#;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = LevelCatalog::load().unwrap();

        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.max_level(), 15);

        let first = catalog.get(1).unwrap();
        assert_eq!(first.sequence, vec![Cut, Carve, Polish, Assemble]);
        assert_eq!(first.time_budget_secs, 300.0);
        assert_eq!(first.difficulty, DifficultyTier::Tutorial);
        assert_eq!(first.description, "Basic Assembly");

        let last = catalog.get(15).unwrap();
        assert_eq!(last.difficulty, DifficultyTier::Master);
        assert_eq!(last.time_budget_secs, 70.0);
    }

    #[test]
    fn test_embedded_catalog_gets_harder() {
        let catalog = LevelCatalog::load().unwrap();
        let levels: Vec<_> = catalog.iter().collect();

        for pair in levels.windows(2) {
            assert!(pair[1].difficulty >= pair[0].difficulty);
            assert!(pair[1].time_budget_secs < pair[0].time_budget_secs);
        }

        // Repeated nodes only appear from level 10 on
        assert!(levels.iter().take(9).all(|level| !level.has_repeated_nodes()));
        assert!(levels.iter().skip(9).all(|level| level.has_repeated_nodes()));
    }

    #[test]
    fn test_banner_flags_repeated_nodes() {
        let catalog = LevelCatalog::load().unwrap();

        let first = catalog.get(1).unwrap().banner();
        assert!(first.starts_with("Level 1 (TUTORIAL): Basic Assembly"));
        assert!(first.contains("cut → carve → polish → assemble"));
        assert!(!first.contains("nodes repeat"));

        assert!(catalog.get(10).unwrap().banner().ends_with("| nodes repeat"));
    }

    #[test]
    fn test_level_ten_repeats_cut() {
        let catalog = LevelCatalog::load().unwrap();
        assert_eq!(
            catalog.get(10).unwrap().sequence,
            vec![Cut, Carve, Cut, Polish, Assemble]
        );
    }

    #[test]
    fn test_from_json_sorts_by_index() {
        let catalog = LevelCatalog::from_json(TEST_JSON).unwrap();

        assert_eq!(catalog.get(1).unwrap().description, "First");
        assert_eq!(catalog.get(2).unwrap().description, "Second");
        assert_eq!(catalog.get(1).unwrap().time_budget_secs, 30.5);
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = LevelCatalog::from_json(TEST_JSON).unwrap();

        assert!(matches!(catalog.get(0), Err(CatalogError::LevelNotFound(0))));
        assert!(matches!(catalog.get(3), Err(CatalogError::LevelNotFound(3))));
        assert!(!catalog.contains(3));
        assert!(catalog.contains(2));
    }

    #[test]
    fn test_gap_is_rejected() {
        let json = r#"{ "levels": [
            { "index": 1, "sequence": ["cut"], "time_budget_secs": 10, "difficulty": "TUTORIAL", "description": "" },
            { "index": 3, "sequence": ["cut"], "time_budget_secs": 10, "difficulty": "TUTORIAL", "description": "" }
        ] }"#;

        assert!(matches!(
            LevelCatalog::from_json(json),
            Err(CatalogError::NonContiguous { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_invalid_levels_are_rejected() {
        let empty_sequence = r#"{ "levels": [
            { "index": 1, "sequence": [], "time_budget_secs": 10, "difficulty": "TUTORIAL", "description": "" }
        ] }"#;
        assert!(matches!(
            LevelCatalog::from_json(empty_sequence),
            Err(CatalogError::EmptySequence { level: 1 })
        ));

        let zero_time = r#"{ "levels": [
            { "index": 1, "sequence": ["cut"], "time_budget_secs": 0, "difficulty": "TUTORIAL", "description": "" }
        ] }"#;
        assert!(matches!(
            LevelCatalog::from_json(zero_time),
            Err(CatalogError::InvalidTimeBudget { level: 1, .. })
        ));

        let unknown_label = r#"{ "levels": [
            { "index": 1, "sequence": ["sand"], "time_budget_secs": 10, "difficulty": "TUTORIAL", "description": "" }
        ] }"#;
        assert!(matches!(
            LevelCatalog::from_json(unknown_label),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            LevelCatalog::from_json(r#"{ "levels": [] }"#),
            Err(CatalogError::Empty)
        ));
        assert!(LevelCatalog::from_json("").is_err());
    }
}
