//! Tile catalog: the fixed set of tile symbols and their generation weights
//!
//! Tiles are addressed by their position in the catalog (`TileId`). The
//! catalog is built once, validated, and never mutated afterwards.

use crate::algorithm::bitset::TileSet;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use std::collections::HashMap;

/// Index of a tile type within its catalog
pub type TileId = usize;

/// A named tile type with its relative generation weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileKind {
    /// Symbol used in example patterns and sample files
    pub name: String,
    /// Relative weight used during random collapse (always positive)
    pub weight: u32,
}

/// Immutable set of tile types shared by every cell of a generation run
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    kinds: Vec<TileKind>,
    index: HashMap<String, TileId>,
}

impl TileCatalog {
    /// Build a catalog from `(name, weight)` pairs, in declaration order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles are given
    /// - A weight is zero
    /// - A name is empty or declared twice
    pub fn new<I, S>(tiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, weight) in tiles {
            catalog.push(name.into(), weight)?;
        }

        if catalog.is_empty() {
            return Err(invalid_parameter(
                "catalog",
                &"[]",
                &"at least one tile type is required",
            ));
        }

        Ok(catalog)
    }

    fn push(&mut self, name: String, weight: u32) -> Result<()> {
        if name.is_empty() {
            return Err(invalid_parameter(
                "tile",
                &name,
                &"tile names must not be empty",
            ));
        }
        if weight == 0 {
            return Err(invalid_parameter(
                "weight",
                &format!("{name}={weight}"),
                &"weights must be positive",
            ));
        }
        if self.index.contains_key(&name) {
            return Err(invalid_parameter(
                "tile",
                &name,
                &"tile declared more than once",
            ));
        }

        self.index.insert(name.clone(), self.kinds.len());
        self.kinds.push(TileKind { name, weight });
        Ok(())
    }

    /// Number of tile types
    pub const fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the catalog holds no tile types
    pub const fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Look up the id of a symbol
    pub fn id_of(&self, name: &str) -> Option<TileId> {
        self.index.get(name).copied()
    }

    /// Look up the id of a symbol, failing for symbols without a weight
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if the symbol is not in the catalog
    pub fn require(&self, name: &str) -> Result<TileId> {
        self.id_of(name).ok_or_else(|| AlgorithmError::UnknownTile {
            symbol: name.to_string(),
        })
    }

    /// Symbol of a tile id
    pub fn name(&self, tile: TileId) -> Option<&str> {
        self.kinds.get(tile).map(|kind| kind.name.as_str())
    }

    /// Generation weight of a tile id (zero for ids outside the catalog)
    pub fn weight(&self, tile: TileId) -> u32 {
        self.kinds.get(tile).map_or(0, |kind| kind.weight)
    }

    /// All tile kinds in id order
    pub fn kinds(&self) -> &[TileKind] {
        &self.kinds
    }

    /// Set containing every tile id, the initial domain of every cell
    pub fn full_set(&self) -> TileSet {
        TileSet::all(self.len())
    }
}
