//! Dictionary metadata, packed rotation tables, and exact-match search.

use crate::codec;

/// A fixed marker dictionary backed by a packed rotation table.
///
/// The table stores, for each of `N` entries, the four 90°-rotated packings
/// of the marker (rotation 0 first), each `⌈marker_bits²/8⌉` bytes long,
/// row-major MSB-first with light = 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dictionary {
    /// Human-readable name (for debugging/logging).
    pub name: &'static str,
    /// Marker side length (number of inner bits per side).
    pub marker_bits: usize,
    /// Packed rotations: `N × 4 × code_bytes` bytes, entry-major.
    pub rotations: &'static [u8],
}

/// A successful dictionary lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeMatch {
    /// Marker id in the dictionary.
    pub id: u32,
    /// Rotation slot `0..=3` the observed code matched at.
    pub rotation: u8,
}

/// Errors raised when validating a custom rotation table.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("marker side must be at least 2 bits (got {0})")]
    MarkerTooSmall(usize),
    #[error("rotation table holds {len} bytes, expected a nonzero multiple of {stride} (4 rotations of {code_bytes} bytes)")]
    TableShape {
        len: usize,
        stride: usize,
        code_bytes: usize,
    },
}

impl Dictionary {
    /// Build a dictionary from a raw rotation table, validating its shape.
    pub fn from_table(
        name: &'static str,
        marker_bits: usize,
        rotations: &'static [u8],
    ) -> Result<Self, DictionaryError> {
        if marker_bits < 2 {
            return Err(DictionaryError::MarkerTooSmall(marker_bits));
        }
        let code_bytes = codec::code_bytes(marker_bits);
        let stride = 4 * code_bytes;
        if rotations.is_empty() || rotations.len() % stride != 0 {
            return Err(DictionaryError::TableShape {
                len: rotations.len(),
                stride,
                code_bytes,
            });
        }
        Ok(Self {
            name,
            marker_bits,
            rotations,
        })
    }

    /// Bytes per packed code.
    #[inline]
    pub const fn code_bytes(&self) -> usize {
        codec::code_bytes(self.marker_bits)
    }

    /// Number of marker entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.rotations.len() / (4 * self.code_bytes())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Packed code of entry `id` at rotation slot `rot` (`0..4`).
    #[inline]
    pub fn rotation(&self, id: usize, rot: usize) -> &[u8] {
        let cb = self.code_bytes();
        let base = (id * 4 + rot) * cb;
        &self.rotations[base..base + cb]
    }

    /// Packed base code (rotation 0) of entry `id`.
    #[inline]
    pub fn code(&self, id: usize) -> &[u8] {
        self.rotation(id, 0)
    }

    /// Find the entry and rotation whose packing equals `code` exactly.
    ///
    /// Scan order is id-major, then rotation; the first match wins.
    pub fn find_exact(&self, code: &[u8]) -> Option<CodeMatch> {
        debug_assert_eq!(code.len(), self.code_bytes());
        for id in 0..self.len() {
            for rot in 0..4 {
                if self.rotation(id, rot) == code {
                    return Some(CodeMatch {
                        id: id as u32,
                        rotation: rot as u8,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;

    #[test]
    fn from_table_rejects_bad_shapes() {
        assert_eq!(
            Dictionary::from_table("tiny", 1, &[0u8; 8]),
            Err(DictionaryError::MarkerTooSmall(1))
        );
        static ODD: [u8; 7] = [0; 7];
        assert!(matches!(
            Dictionary::from_table("odd", 4, &ODD),
            Err(DictionaryError::TableShape { len: 7, stride: 8, .. })
        ));
        static EMPTY: [u8; 0] = [];
        assert!(Dictionary::from_table("empty", 4, &EMPTY).is_err());
    }

    #[test]
    fn find_exact_reports_id_and_rotation() {
        let dict = builtins::builtin_dictionary("DICT_4X4_50H4").expect("builtin dict");
        for id in [0usize, 7, 15, 49] {
            for rot in 0..4 {
                let m = dict.find_exact(dict.rotation(id, rot)).expect("match");
                assert_eq!(m.id, id as u32);
                assert_eq!(m.rotation, rot as u8);
            }
        }
    }

    #[test]
    fn find_exact_misses_unknown_codes() {
        let dict = builtins::builtin_dictionary("DICT_4X4_50H4").expect("builtin dict");
        assert_eq!(dict.find_exact(&[0x00, 0x00]), None);
        assert_eq!(dict.find_exact(&[0xFF, 0xFF]), None);
    }
}
