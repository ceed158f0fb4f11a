//! Packed global tile IDs.
//!
//! Tiled stores every cell as a 32-bit value whose top three bits are orientation
//! flags and whose remaining 29 bits are the "bare" ID: a tileset's `firstgid`
//! plus the local tile index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bit 31: tile is mirrored along the vertical axis.
pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
/// Bit 30: tile is mirrored along the horizontal axis.
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
/// Bit 29: tile is mirrored along the top-left/bottom-right diagonal.
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;
/// All orientation bits.
pub const FLIP_MASK: u32 = FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY;

/// A per-map global tile ID, including orientation flags.
///
/// Every bit pattern is valid. A bare ID of `0` means "no tile" no matter which
/// flags are set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GlobalId(pub u32);

/// A tile ID local to its tileset (Tiled's "local tile ID").
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TileId(pub u32);

/// Decoded orientation flags of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlipFlags {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

impl FlipFlags {
    /// Flags packed into their GID bit positions.
    pub fn bits(self) -> u32 {
        let mut bits = 0;
        if self.horizontal {
            bits |= FLIPPED_HORIZONTALLY;
        }
        if self.vertical {
            bits |= FLIPPED_VERTICALLY;
        }
        if self.diagonal {
            bits |= FLIPPED_DIAGONALLY;
        }
        bits
    }
}

impl GlobalId {
    /// The empty cell.
    pub const EMPTY: GlobalId = GlobalId(0);

    /// Pack orientation flags and a bare ID. Bits of `bare_id` above bit 28 are dropped.
    pub fn from_parts(flags: FlipFlags, bare_id: u32) -> Self {
        GlobalId(flags.bits() | (bare_id & !FLIP_MASK))
    }

    /// Split into orientation flags and bare ID.
    pub fn decode(self) -> (FlipFlags, u32) {
        (self.flags(), self.bare_id())
    }

    /// The ID with all orientation bits cleared.
    #[inline]
    pub fn bare_id(self) -> u32 {
        self.0 & !FLIP_MASK
    }

    #[inline]
    pub fn flags(self) -> FlipFlags {
        FlipFlags {
            horizontal: self.is_flipped_horizontally(),
            vertical: self.is_flipped_vertically(),
            diagonal: self.is_flipped_diagonally(),
        }
    }

    #[inline]
    pub fn is_flipped_horizontally(self) -> bool {
        self.0 & FLIPPED_HORIZONTALLY != 0
    }

    #[inline]
    pub fn is_flipped_vertically(self) -> bool {
        self.0 & FLIPPED_VERTICALLY != 0
    }

    #[inline]
    pub fn is_flipped_diagonally(self) -> bool {
        self.0 & FLIPPED_DIAGONALLY != 0
    }

    /// True when the cell holds no tile.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bare_id() == 0
    }

    /// Tileset-relative tile ID for a tileset starting at `first_gid`.
    ///
    /// The caller must have picked a tileset whose `first_gid` is not above this
    /// ID's bare ID; see [`TileSetIndex::resolve`](crate::resolver::TileSetIndex::resolve).
    #[inline]
    pub fn local_tile_id(self, first_gid: GlobalId) -> TileId {
        debug_assert!(
            self.bare_id() >= first_gid.0,
            "GID {} is below tileset firstgid {}",
            self.bare_id(),
            first_gid.0
        );
        TileId(self.bare_id().wrapping_sub(first_gid.0))
    }
}

impl From<u32> for GlobalId {
    fn from(raw: u32) -> Self {
        GlobalId(raw)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_clears_flag_bits() {
        let samples = [
            0u32,
            1,
            0x1FFF_FFFF,
            0x2000_0000,
            0x8000_0001,
            0xC000_0010,
            0xE000_007F,
            u32::MAX,
        ];
        for raw in samples {
            let gid = GlobalId(raw);
            assert_eq!(gid.bare_id(), raw & !(0x8000_0000 | 0x4000_0000 | 0x2000_0000));
            assert_eq!(gid.is_flipped_horizontally(), raw & 0x8000_0000 != 0);
            assert_eq!(gid.is_flipped_vertically(), raw & 0x4000_0000 != 0);
            assert_eq!(gid.is_flipped_diagonally(), raw & 0x2000_0000 != 0);
        }
    }

    #[test]
    fn test_pack_and_decode_preserve_flags() {
        for bits in 0..8u32 {
            let flags = FlipFlags {
                horizontal: bits & 1 != 0,
                vertical: bits & 2 != 0,
                diagonal: bits & 4 != 0,
            };
            for bare in [0, 1, 127, 4096, (1 << 29) - 1] {
                let (decoded_flags, decoded_bare) = GlobalId::from_parts(flags, bare).decode();
                assert_eq!(decoded_flags, flags);
                assert_eq!(decoded_bare, bare);
            }
        }
    }

    #[test]
    fn test_flagged_zero_is_empty() {
        assert!(GlobalId(0).is_empty());
        assert!(GlobalId(FLIP_MASK).is_empty());
        assert!(!GlobalId(FLIPPED_HORIZONTALLY | 3).is_empty());
    }

    #[test]
    fn test_local_tile_id() {
        let gid = GlobalId(FLIPPED_VERTICALLY | 143);
        assert_eq!(gid.local_tile_id(GlobalId(1)), TileId(142));
        assert_eq!(gid.local_tile_id(GlobalId(143)), TileId(0));
    }
}
