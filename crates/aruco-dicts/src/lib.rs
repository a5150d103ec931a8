//! ArUco-style marker dictionaries and bit-level code handling.
//!
//! This crate focuses on:
//! - embedded built-in dictionaries (compiled into the binary),
//! - the packed rotation-table format consumed by the detector
//!   (`N` entries × 4 stored 90° rotations × `⌈B²/8⌉` bytes),
//! - bit codec helpers for packing, reading, and rotating marker codes.
//!
//! It does **not** perform marker detection. A detector samples a candidate
//! quad into a packed code and asks [`Dictionary::find_exact`] which entry
//! (and at which rotation) it saw.
//!
//! Codes are packed row-major, MSB-first, with **light = 1**; when `B²` is
//! not a multiple of 8 the final byte is right-aligned.

pub mod builtins;
mod codec;
mod dictionary;

pub use codec::{code_bit, code_bytes, rotate_code, rotation_table, set_code_bit};
pub use dictionary::{CodeMatch, Dictionary, DictionaryError};
