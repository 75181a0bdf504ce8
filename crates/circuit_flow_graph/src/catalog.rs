// SPDX-License-Identifier: MIT OR Apache-2.0
//! Level catalog: authored node lists by level number.
//!
//! Levels are numbered from 1 in catalog order. The built-in catalog is
//! embedded from `levels/catalog.ron`; an external file with the same shape
//! (RON, or JSON when the file ends in `.json`) can replace it.

use crate::graph::{check_layout, LevelError};
use crate::node::NodeDef;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current catalog format version
pub const CATALOG_FORMAT_VERSION: u32 = 1;

const BUILTIN_CATALOG: &str = include_str!("../levels/catalog.ron");

/// One authored level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Pieces in id order
    pub nodes: Vec<NodeDef>,
}

impl LevelDef {
    /// Create a level from its pieces
    pub fn new(name: impl Into<String>, nodes: Vec<NodeDef>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            nodes,
        }
    }

    /// Check the one-source, one-target, one-node-per-cell rules
    pub fn validate(&self) -> Result<(), LevelError> {
        check_layout(self.nodes.iter().map(|n| (n.grid, n.role)))
    }
}

/// Ordered collection of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    /// Format version
    pub version: u32,
    /// Levels; level `n` is `levels[n - 1]`
    pub levels: Vec<LevelDef>,
}

impl LevelCatalog {
    /// Create a catalog from levels, validating each one
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, CatalogError> {
        let catalog = Self {
            version: CATALOG_FORMAT_VERSION,
            levels,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the game
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron(BUILTIN_CATALOG)
    }

    /// Parse and validate a RON catalog
    pub fn from_ron(s: &str) -> Result<Self, CatalogError> {
        let catalog: LevelCatalog = ron::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog
    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let catalog: LevelCatalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_ron(&content)?
        };

        tracing::info!("Loaded {} levels from {:?}", catalog.level_count(), path);
        Ok(catalog)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, CatalogError> {
        let config = ron::ser::PrettyConfig::default().enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Check the version and every level
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.version > CATALOG_FORMAT_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: self.version,
                supported: CATALOG_FORMAT_VERSION,
            });
        }
        if self.levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (number, level) in self.numbered() {
            level
                .validate()
                .map_err(|source| CatalogError::InvalidLevel { level: number, source })?;
        }
        Ok(())
    }

    /// Number of levels
    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Whether `number` names a level in this catalog
    pub fn contains(&self, number: u32) -> bool {
        (1..=self.level_count()).contains(&number)
    }

    /// Get a level by number (1-based)
    pub fn level(&self, number: u32) -> Option<&LevelDef> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.levels.get(index)
    }

    /// Levels with their numbers
    pub fn numbered(&self) -> impl Iterator<Item = (u32, &LevelDef)> {
        (1..).zip(self.levels.iter())
    }
}

/// Error loading a level catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RON syntax or shape error
    #[error("Catalog parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// JSON syntax or shape error
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON serialization error
    #[error("Catalog serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Catalog written by a newer version
    #[error("Catalog version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version understood
        supported: u32,
    },

    /// Catalog has no levels
    #[error("Catalog contains no levels")]
    Empty,

    /// A level breaks a structural rule
    #[error("Level {level} is invalid: {source}")]
    InvalidLevel {
        /// Level number
        level: u32,
        /// What is wrong with it
        source: LevelError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction::*;
    use crate::node::{GridPos, NodeRole};
    use crate::port::Rotation;

    #[test]
    fn test_builtin_catalog() {
        let catalog = LevelCatalog::builtin().unwrap();
        assert_eq!(catalog.level_count(), 10);
        assert_eq!(catalog.version, CATALOG_FORMAT_VERSION);
        assert!(catalog.contains(1));
        assert!(catalog.contains(10));
        assert!(!catalog.contains(0));
        assert!(!catalog.contains(11));
        assert!(catalog.level(0).is_none());
        assert!(catalog.level(11).is_none());
    }

    #[test]
    fn test_builtin_first_level() {
        let catalog = LevelCatalog::builtin().unwrap();
        let level = catalog.level(1).unwrap();
        assert_eq!(level.name, "Straight Line");
        assert_eq!(
            level.nodes,
            vec![
                NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, [PosX], 0),
                NodeDef::new(GridPos(1, 0, 0), NodeRole::Wire, [NegX, PosX], 1),
                NodeDef::new(GridPos(2, 0, 0), NodeRole::Target, [NegX], 0),
            ]
        );
    }

    #[test]
    fn test_builtin_node_counts() {
        let catalog = LevelCatalog::builtin().unwrap();
        let counts: Vec<usize> = catalog.levels.iter().map(|l| l.nodes.len()).collect();
        assert_eq!(counts, vec![3, 4, 5, 8, 10, 8, 8, 9, 11, 12]);
        for level in &catalog.levels {
            assert!(level
                .nodes
                .iter()
                .filter(|n| n.role != NodeRole::Wire)
                .all(|n| n.rotation == Rotation::ZERO));
        }
    }

    #[test]
    fn test_ron_round_trip_keeps_levels() {
        let catalog = LevelCatalog::builtin().unwrap();
        let text = catalog.to_ron().unwrap();
        assert_eq!(LevelCatalog::from_ron(&text).unwrap(), catalog);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "version": 1,
            "levels": [{
                "name": "Tiny",
                "nodes": [
                    {"grid": [0, 0, 0], "role": "source", "ports": ["+x"], "rotation": 0},
                    {"grid": [1, 0, 0], "role": "target", "ports": ["-x"]}
                ]
            }]
        }"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        assert_eq!(catalog.level_count(), 1);
        assert_eq!(catalog.level(1).unwrap().nodes[1].grid, GridPos(1, 0, 0));
        assert!(catalog.level(1).unwrap().description.is_empty());
    }

    #[test]
    fn test_rejects_malformed_levels() {
        let err = LevelCatalog::new(vec![LevelDef::new(
            "no target",
            vec![NodeDef::new(GridPos(0, 0, 0), NodeRole::Source, [PosX], 0)],
        )])
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidLevel { level: 1, source: LevelError::MissingTarget }
        ));

        assert!(matches!(LevelCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = LevelCatalog::from_ron("(version: 99, levels: [])").unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_rejects_bad_ports() {
        let text = r#"(version: 1, levels: [(name: "x", nodes: [
            (grid: (0, 0, 0), role: source, ports: ["+q"]),
        ])])"#;
        assert!(matches!(LevelCatalog::from_ron(text), Err(CatalogError::Parse(_))));
    }
}
