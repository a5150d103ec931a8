//! Detector construction, buffer ownership, and the per-frame pipeline.

use aruco_dicts::Dictionary;
use log::{debug, trace};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::arena::{BlobArena, SegmentArena};
use crate::contrast;
use crate::debug::{DebugCanvas, DebugColor};
use crate::decode;
use crate::extents::{self, RowExtents};
use crate::frame::FrameGeom;
use crate::outline::{self, EdgeList};
use crate::quad::{self, AngleScratch};
use crate::segment::{self, LineBuffers};

/// Frame-level configuration, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Most markers reported per frame.
    pub max_markers: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 160,
            max_markers: 16,
        }
    }
}

/// Errors raised while validating a detector configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DetectorError {
    #[error("frame {width}x{height} has no usable 8x8 cells")]
    FrameTooSmall { width: usize, height: usize },
    #[error("max_markers must be nonzero")]
    ZeroMarkerCapacity,
    #[error("dictionary `{0}` has no usable entries")]
    BadDictionary(&'static str),
}

/// One detected marker.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Marker {
    /// Subpixel corners in frame coordinates (top-left origin, y down).
    /// Corner 0 is the marker's top-left as defined by the dictionary, the
    /// rest follow clockwise.
    pub corners: [Point2<f32>; 4],
    /// Dictionary entry index.
    pub id: u32,
}

/// Marker detector with a fixed frame size and fixed working memory.
///
/// All buffers are sized in [`Detector::new`]; a [`Detector::process`] call
/// allocates nothing and always runs to completion. Candidates that fail any
/// check are silently dropped — a returned marker has passed every filter
/// including an exact dictionary match.
#[derive(Debug)]
pub struct Detector {
    config: DetectorConfig,
    dict: Dictionary,
    geom: FrameGeom,

    frame: Vec<u8>,
    lc_sum: Vec<u32>,
    lc_grid: Vec<u8>,

    segs: SegmentArena,
    blobs: BlobArena,
    lines: LineBuffers,

    extents: RowExtents,
    edges: EdgeList,
    angles: AngleScratch,
    code: Vec<u8>,

    markers: Vec<Marker>,
    dbg: DebugCanvas,
}

impl Detector {
    /// Validate the configuration and allocate every working buffer.
    pub fn new(config: DetectorConfig, dictionary: Dictionary) -> Result<Self, DetectorError> {
        let geom = FrameGeom::new(config.width, config.height);
        if geom.grid_w == 0 || geom.grid_h == 0 {
            return Err(DetectorError::FrameTooSmall {
                width: config.width,
                height: config.height,
            });
        }
        if config.max_markers == 0 {
            return Err(DetectorError::ZeroMarkerCapacity);
        }
        if dictionary.marker_bits < 2 || dictionary.is_empty() {
            return Err(DetectorError::BadDictionary(dictionary.name));
        }

        let edge_cap = outline::edge_capacity(&geom);
        Ok(Self {
            frame: vec![0; config.width * config.height],
            lc_sum: vec![0; geom.grid_len()],
            lc_grid: vec![0; geom.grid_len()],
            segs: SegmentArena::with_capacity(segment::segment_capacity(&geom)),
            blobs: BlobArena::with_capacity(segment::blob_capacity(&geom)),
            lines: LineBuffers::with_capacity(segment::line_capacity(&geom)),
            extents: RowExtents::with_height(config.height),
            edges: EdgeList::with_capacity(edge_cap),
            angles: AngleScratch::with_capacity(edge_cap),
            code: vec![0; dictionary.code_bytes()],
            markers: Vec::with_capacity(config.max_markers),
            dbg: DebugCanvas::new(config.width, config.height),
            config,
            dict: dictionary,
            geom,
        })
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    /// The frame buffer the caller fills before each [`Detector::process`].
    #[inline]
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    #[inline]
    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame
    }

    /// Markers found by the most recent [`Detector::process`] call.
    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Annotation frame painted by the last [`Detector::process`] call, one
    /// palette index per pixel (see [`crate::DebugColor`]).
    #[cfg(feature = "debug-overlay")]
    pub fn debug_frame(&self) -> &[u8] {
        self.dbg.frame()
    }

    /// Process the current frame. Runs every stage to completion; results
    /// land in [`Detector::markers`]. No state survives into the next call.
    pub fn process(&mut self) {
        self.markers.clear();
        self.dbg.clear();

        contrast::compute_threshold_grid(&self.frame, &self.geom, &mut self.lc_sum, &mut self.lc_grid);

        segment::scan_rows(
            &self.frame,
            &self.lc_grid,
            &self.geom,
            &mut self.segs,
            &mut self.blobs,
            &mut self.lines,
            &mut self.dbg,
        );
        debug!("segmentation produced {} blob slots", self.blobs.len());

        for blob in 0..self.blobs.len() as i32 {
            if !self.blobs.is_live(blob) {
                continue;
            }
            if self.markers.len() >= self.config.max_markers {
                break;
            }
            self.fit_blob(blob);
        }
        debug!("{} markers found", self.markers.len());
    }

    /// Run triage, tracing, quad fitting, and decoding for one blob.
    fn fit_blob(&mut self, blob: i32) {
        self.extents.collect(blob, &self.segs, &self.blobs);
        if !extents::triage(&self.extents, &self.geom) {
            trace!("blob {blob} rejected by shape triage");
            return;
        }

        outline::trace(&self.extents, &mut self.edges);

        let Some(mut corners) = quad::fit_quad(&self.edges, &mut self.angles, &mut self.dbg) else {
            trace!("blob {blob} rejected by quad fit");
            return;
        };

        let Some(id) = decode::identify(
            &self.frame,
            &self.lc_grid,
            &self.geom,
            &self.dict,
            &mut corners,
            &mut self.code,
            &mut self.dbg,
        ) else {
            trace!("blob {blob} rejected by decode");
            return;
        };

        for (e, c) in corners.iter().enumerate() {
            self.dbg.draw_cross(c.x, c.y, cross_color(e));
        }
        self.markers.push(Marker { corners, id });
    }
}

fn cross_color(corner: usize) -> DebugColor {
    match corner {
        0 => DebugColor::Green,
        1 => DebugColor::Red,
        2 => DebugColor::Blue,
        _ => DebugColor::Yellow,
    }
}
