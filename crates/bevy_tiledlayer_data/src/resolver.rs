//! Mapping bare GIDs to the tileset that owns them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::gid::GlobalId;
use crate::tileset::TileSet;

/// How strictly a bare ID must fall inside its tileset.
///
/// Tiled itself only looks for the closest lower `firstgid`, which happily accepts
/// an ID past the end of a tileset that is followed by a gap in the ID space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Owner is the tileset with the greatest `firstgid <= id`.
    #[default]
    Permissive,
    /// Additionally require `id < firstgid + tilecount` when the tileset declares a count.
    Strict,
}

/// A sorted, shared snapshot of a map's tilesets.
///
/// Owns its own ordering: building an index never reorders the caller's
/// collection. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct TileSetIndex {
    tilesets: Vec<Arc<TileSet>>,
    policy: RangePolicy,
}

impl TileSetIndex {
    /// Index a copy of `tilesets`, sorted by `first_gid`.
    pub fn new(tilesets: &[TileSet]) -> Self {
        tilesets.iter().cloned().collect()
    }

    pub fn with_policy(mut self, policy: RangePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Tilesets in ascending `first_gid` order.
    pub fn tilesets(&self) -> &[Arc<TileSet>] {
        &self.tilesets
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }

    /// Find the tileset owning `bare_id`.
    ///
    /// `bare_id` must already have its flip bits cleared; `0` (the empty cell) is
    /// expected to be filtered out by the caller.
    ///
    /// # Errors
    ///
    /// [`DecodeError::NoSuitableTileSet`] when every tileset starts above `bare_id`
    /// (or, under [`RangePolicy::Strict`], when `bare_id` is past the end of its
    /// closest tileset).
    pub fn resolve(&self, bare_id: u32) -> Result<&Arc<TileSet>> {
        let mut owner = None;
        for tileset in &self.tilesets {
            if bare_id < tileset.first_gid.0 {
                break;
            }
            owner = Some(tileset);
        }

        let Some(owner) = owner else {
            return Err(DecodeError::NoSuitableTileSet {
                gid: GlobalId(bare_id),
            });
        };

        if self.policy == RangePolicy::Strict
            && let Some(end) = owner.end_gid()
            && bare_id >= end
        {
            trace!(
                "GID {} is past the end of tileset `{}` ({}..{})",
                bare_id, owner.name, owner.first_gid, end
            );
            return Err(DecodeError::NoSuitableTileSet {
                gid: GlobalId(bare_id),
            });
        }

        Ok(owner)
    }
}

impl FromIterator<TileSet> for TileSetIndex {
    fn from_iter<I: IntoIterator<Item = TileSet>>(iter: I) -> Self {
        let mut tilesets: Vec<Arc<TileSet>> = iter.into_iter().map(Arc::new).collect();
        tilesets.sort_by_key(|tileset| tileset.first_gid);
        Self {
            tilesets,
            policy: RangePolicy::default(),
        }
    }
}

impl From<Vec<TileSet>> for TileSetIndex {
    fn from(tilesets: Vec<TileSet>) -> Self {
        tilesets.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TileSetIndex {
        // Deliberately out of order.
        TileSetIndex::new(&[
            TileSet::new("C", 250),
            TileSet::new("A", 1),
            TileSet::new("B", 100),
        ])
    }

    #[test]
    fn test_resolves_owning_ranges() {
        let index = index();
        let cases = [
            (1, "A"),
            (99, "A"),
            (100, "B"),
            (249, "B"),
            (250, "C"),
            (100_000, "C"),
        ];
        for (bare_id, expected) in cases {
            assert_eq!(index.resolve(bare_id).unwrap().name, expected, "bare id {bare_id}");
        }
    }

    #[test]
    fn test_index_is_sorted_copy() {
        let tilesets = vec![TileSet::new("late", 50), TileSet::new("early", 1)];
        let index = TileSetIndex::new(&tilesets);
        assert_eq!(tilesets[0].name, "late");
        assert_eq!(index.tilesets()[0].name, "early");
        assert_eq!(index.tilesets()[1].name, "late");
    }

    #[test]
    fn test_below_every_tileset() {
        let index = TileSetIndex::new(&[TileSet::new("B", 100)]);
        let err = index.resolve(50).unwrap_err();
        assert!(matches!(err, DecodeError::NoSuitableTileSet { gid } if gid == GlobalId(50)));
    }

    #[test]
    fn test_empty_index() {
        let index = TileSetIndex::default();
        assert!(matches!(
            index.resolve(1),
            Err(DecodeError::NoSuitableTileSet { .. })
        ));
    }

    #[test]
    fn test_permissive_accepts_gap() {
        let index = TileSetIndex::new(&[
            TileSet::new("A", 1).with_tile_count(10),
            TileSet::new("B", 100).with_tile_count(10),
        ]);
        assert_eq!(index.resolve(50).unwrap().name, "A");
    }

    #[test]
    fn test_strict_rejects_gap() {
        let index = TileSetIndex::new(&[
            TileSet::new("A", 1).with_tile_count(10),
            TileSet::new("B", 100).with_tile_count(10),
            TileSet::new("unsized", 500),
        ])
        .with_policy(RangePolicy::Strict);

        assert_eq!(index.resolve(10).unwrap().name, "A");
        assert!(index.resolve(11).is_err());
        assert_eq!(index.resolve(109).unwrap().name, "B");
        assert!(index.resolve(110).is_err());
        // No declared count: anything above firstgid is accepted.
        assert_eq!(index.resolve(9_000).unwrap().name, "unsized");
    }
}
