//! Embedded built-in dictionaries.
//!
//! Tables are generated offline by a greedy search over 16-bit codes seeded
//! from a fixed xorshift32 stream: a candidate is kept when it has 4..=12
//! light bits and all four of its 90° rotations stay at Hamming distance
//! >= 4 from every rotation already in the table (including the candidate's
//! own other rotations). No stored rotation is all-dark or all-light, so a
//! featureless square can never match.

use crate::Dictionary;

/// 50-entry 4×4 family, minimum pairwise rotation distance 4.
///
/// Layout: entry-major, four rotation packings of 2 bytes each, rotation 0
/// first; slot `r` is the base pattern rotated `r` steps by
/// `out[i][j] = in[j][3 - i]` (see [`crate::rotate_code`]).
pub static DICT_4X4_50H4: Dictionary = Dictionary {
    name: "DICT_4X4_50H4",
    marker_bits: 4,
    rotations: &DICT_4X4_50H4_ROTATIONS,
};

#[rustfmt::skip]
static DICT_4X4_50H4_ROTATIONS: [u8; 400] = [
    0xB6, 0x3A, 0xAF, 0x49, 0x5C, 0x6D, 0x92, 0xF5, // id 0
    0x74, 0xAB, 0x9B, 0xC3, 0xD5, 0x2E, 0xC3, 0xD9, // id 1
    0xB3, 0xAC, 0xCE, 0x1B, 0x35, 0xCD, 0xD8, 0x73, // id 2
    0x46, 0x26, 0x07, 0xD0, 0x64, 0x62, 0x0B, 0xE0, // id 3
    0x51, 0x23, 0xD3, 0x80, 0xC4, 0x8A, 0x01, 0xCB, // id 4
    0x1A, 0x71, 0xB6, 0x24, 0x8E, 0x58, 0x24, 0x6D, // id 5
    0x3F, 0x6C, 0xCE, 0x75, 0x36, 0xFC, 0xAE, 0x73, // id 6
    0x71, 0x91, 0xF8, 0x82, 0x89, 0x8E, 0x41, 0x1F, // id 7
    0xEA, 0x5D, 0x3C, 0xBD, 0xBA, 0x57, 0xBD, 0x3C, // id 8
    0xC2, 0x3E, 0x27, 0x99, 0x7C, 0x43, 0x99, 0xE4, // id 9
    0xF2, 0xD2, 0xAD, 0xAA, 0x4B, 0x4F, 0x55, 0xB5, // id 10
    0x1F, 0xEF, 0xD7, 0x77, 0xF7, 0xF8, 0xEE, 0xEB, // id 11
    0xF4, 0x9D, 0xB8, 0xDB, 0xB9, 0x2F, 0xDB, 0x1D, // id 12
    0xB9, 0x72, 0xEB, 0x2C, 0x4E, 0x9D, 0x34, 0xD7, // id 13
    0x02, 0x39, 0x36, 0x01, 0x9C, 0x40, 0x80, 0x6C, // id 14
    0x9E, 0xAE, 0x87, 0x5F, 0x75, 0x79, 0xFA, 0xE1, // id 15
    0x0B, 0x2B, 0x57, 0x05, 0xD4, 0xD0, 0xA0, 0xEA, // id 16
    0x22, 0xC8, 0x0C, 0x23, 0x13, 0x44, 0xC4, 0x30, // id 17
    0x74, 0x0C, 0x88, 0xD1, 0x30, 0x2E, 0x8B, 0x11, // id 18
    0x4D, 0xE3, 0x53, 0xE6, 0xC7, 0xB2, 0x67, 0xCA, // id 19
    0x7B, 0xA2, 0xCF, 0x86, 0x45, 0xDE, 0x61, 0xF3, // id 20
    0x27, 0xA7, 0x5F, 0x52, 0xE5, 0xE4, 0x4A, 0xFA, // id 21
    0x48, 0x55, 0x30, 0xB4, 0xAA, 0x12, 0x2D, 0x0C, // id 22
    0xD4, 0xFE, 0xA3, 0xFB, 0x7F, 0x2B, 0xDF, 0xC5, // id 23
    0x39, 0xB8, 0xEA, 0x07, 0x1D, 0x9C, 0xE0, 0x57, // id 24
    0x25, 0x20, 0x4A, 0x40, 0x04, 0xA4, 0x02, 0x52, // id 25
    0x91, 0xAA, 0xC3, 0x0B, 0x55, 0x89, 0xD0, 0xC3, // id 26
    0x9F, 0x7A, 0xE7, 0x6D, 0x5E, 0xF9, 0xB6, 0xE7, // id 27
    0x7D, 0xC0, 0xC8, 0xE6, 0x03, 0xBE, 0x67, 0x13, // id 28
    0x98, 0xDC, 0xA0, 0x3F, 0x3B, 0x19, 0xFC, 0x05, // id 29
    0x2A, 0x8E, 0x0D, 0x17, 0x71, 0x54, 0xE8, 0xB0, // id 30
    0xE2, 0xB9, 0x3E, 0x8B, 0x9D, 0x47, 0xD1, 0x7C, // id 31
    0xAF, 0x30, 0x6E, 0x4C, 0x0C, 0xF5, 0x32, 0x76, // id 32
    0x36, 0x4A, 0x8D, 0x61, 0x52, 0x6C, 0x86, 0xB1, // id 33
    0x72, 0xDF, 0xBD, 0xB3, 0xFB, 0x4E, 0xCD, 0xBD, // id 34
    0x87, 0x62, 0x47, 0x68, 0x46, 0xE1, 0x16, 0xE2, // id 35
    0xC9, 0x42, 0x41, 0xAC, 0x42, 0x93, 0x35, 0x82, // id 36
    0xB5, 0x4B, 0xD9, 0x69, 0xD2, 0xAD, 0x96, 0x9B, // id 37
    0xA3, 0x7C, 0x6E, 0x39, 0x3E, 0xC5, 0x9C, 0x76, // id 38
    0x73, 0x48, 0xCC, 0xA1, 0x12, 0xCE, 0x85, 0x33, // id 39
    0xAD, 0xD8, 0x68, 0x6F, 0x1B, 0xB5, 0xF6, 0x16, // id 40
    0x1E, 0x16, 0xA5, 0x54, 0x68, 0x78, 0x2A, 0xA5, // id 41
    0x5F, 0x38, 0xE6, 0xC5, 0x1C, 0xFA, 0xA3, 0x67, // id 42
    0xA0, 0x49, 0x18, 0x29, 0x92, 0x05, 0x94, 0x18, // id 43
    0xFD, 0x66, 0xCB, 0xFC, 0x66, 0xBF, 0x3F, 0xD3, // id 44
    0xEB, 0xBA, 0x6F, 0x8F, 0x5D, 0xD7, 0xF1, 0xF6, // id 45
    0x3D, 0x5F, 0xF9, 0x75, 0xFA, 0xBC, 0xAE, 0x9F, // id 46
    0x18, 0xA7, 0x93, 0x16, 0xE5, 0x18, 0x68, 0xC9, // id 47
    0x7B, 0xCB, 0xDD, 0xA7, 0xD3, 0xDE, 0xE5, 0xBB, // id 48
    0xF5, 0xA1, 0xDA, 0xCA, 0x85, 0xAF, 0x53, 0x5B, // id 49
];

/// Look up a built-in dictionary by name.
pub fn builtin_dictionary(name: &str) -> Option<Dictionary> {
    match name {
        "DICT_4X4_50H4" => Some(DICT_4X4_50H4),
        _ => None,
    }
}
