//! Fixed-budget ArUco marker detection in grayscale frames.
//!
//! The pipeline: adaptive local thresholds over 8×8 cells, row-wise dark-run
//! segmentation unioned into blobs, per-blob boundary tracing and quad
//! fitting by angular binning, then cell sampling with an exact dictionary
//! match. Frame size and every working buffer are fixed when the detector
//! is built; [`Detector::process`] allocates nothing, never fails, and drops
//! doubtful candidates silently.
//!
//! ## Quickstart
//!
//! ```
//! use aruco_detect::{Detector, DetectorConfig};
//! use aruco_dicts::builtins;
//!
//! let dict = builtins::builtin_dictionary("DICT_4X4_50H4").unwrap();
//! let mut detector = Detector::new(DetectorConfig::default(), dict)?;
//!
//! // the caller fills the W×H luminance buffer before each call
//! detector.frame_mut().fill(128);
//! detector.process();
//! assert!(detector.markers().is_empty());
//! # Ok::<(), aruco_detect::DetectorError>(())
//! ```

mod arena;
mod contrast;
mod debug;
mod decode;
mod detector;
mod extents;
mod frame;
mod geometry;
mod outline;
mod quad;
mod segment;

pub use aruco_dicts::{CodeMatch, Dictionary, DictionaryError};
pub use debug::{DebugColor, DEBUG_PALETTE};
pub use detector::{Detector, DetectorConfig, DetectorError, Marker};
