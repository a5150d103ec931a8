//! Per-blob row extents and cheap shape rejection ahead of the tracer.

use crate::arena::{BlobArena, SegmentArena, NONE};
use crate::frame::FrameGeom;

/// Minimum vertical extent (`y_end - y_start`) of a usable blob.
const MIN_ROWS: i32 = 15;
/// Minimum of `max(last - first)` over the blob's rows.
const MIN_WIDTH: i32 = 15;
/// Largest allowed row-to-row change of either side of the outline.
const MAX_EDGE_JUMP: i32 = 50;

const FIRST_UNSET: i32 = i32::MAX;
const LAST_UNSET: i32 = -1;

/// Min/max columns per frame row for one blob, plus its row range.
///
/// Rebuilt from the blob's segment list for every candidate; rows outside
/// `[y_start, y_end]` keep their reset sentinels and are never read.
#[derive(Debug)]
pub(crate) struct RowExtents {
    pub first: Vec<i32>,
    pub last: Vec<i32>,
    pub y_start: i32,
    pub y_end: i32,
}

impl RowExtents {
    pub fn with_height(height: usize) -> Self {
        Self {
            first: vec![FIRST_UNSET; height],
            last: vec![LAST_UNSET; height],
            y_start: height as i32,
            y_end: -1,
        }
    }

    /// Rebuild the tables from `blob`'s segment list.
    pub fn collect(&mut self, blob: i32, segs: &SegmentArena, blobs: &BlobArena) {
        self.first.fill(FIRST_UNSET);
        self.last.fill(LAST_UNSET);
        self.y_start = self.first.len() as i32;
        self.y_end = -1;

        let mut idx = blobs.head(blob);
        while idx != NONE {
            let seg = segs.get(idx);
            idx = seg.next;

            let y = seg.y as i32;
            let f = seg.start as i32;
            let l = seg.last() as i32;

            if y < self.y_start {
                self.y_start = y;
            }
            if y > self.y_end {
                self.y_end = y;
            }
            if f < self.first[y as usize] {
                self.first[y as usize] = f;
            }
            if l > self.last[y as usize] {
                self.last[y as usize] = l;
            }
        }
    }

    #[inline]
    pub fn first(&self, y: i32) -> i32 {
        self.first[y as usize]
    }

    #[inline]
    pub fn last(&self, y: i32) -> i32 {
        self.last[y as usize]
    }
}

/// Cheap shape filters; `false` rejects the blob before any tracing.
pub(crate) fn triage(ext: &RowExtents, geom: &FrameGeom) -> bool {
    // touching the top or bottom margin risks one side being clipped by the
    // frame border
    if ext.y_start <= geom.margin_y as i32 {
        return false;
    }
    if ext.y_end >= geom.height as i32 - geom.margin_y as i32 - 1 {
        return false;
    }

    if ext.y_end - ext.y_start < MIN_ROWS {
        return false;
    }

    // sudden jumps on either outline side mean this is not a quad
    for y in (ext.y_start + 5)..(ext.y_end - 5) {
        if (ext.first(y) - ext.first(y + 1)).abs() > MAX_EDGE_JUMP {
            return false;
        }
        if (ext.last(y) - ext.last(y + 1)).abs() > MAX_EDGE_JUMP {
            return false;
        }
    }

    let mut widest = 0;
    for y in ext.y_start..=ext.y_end {
        let w = ext.last(y) - ext.first(y);
        if w > widest {
            widest = w;
        }
    }
    widest >= MIN_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_extents(y0: i32, y1: i32, x0: i32, x1: i32) -> RowExtents {
        let mut ext = RowExtents::with_height(160);
        ext.y_start = y0;
        ext.y_end = y1;
        for y in y0..=y1 {
            ext.first[y as usize] = x0;
            ext.last[y as usize] = x1;
        }
        ext
    }

    fn geom() -> FrameGeom {
        FrameGeom::new(160, 160)
    }

    #[test]
    fn collect_builds_row_tables() {
        let mut segs = SegmentArena::with_capacity(8);
        let mut blobs = BlobArena::with_capacity(1);
        let blob = blobs.alloc().unwrap();
        for (y, start, len) in [(30u16, 40u16, 20u8), (31, 38, 10), (31, 55, 8)] {
            let s = segs.alloc().unwrap();
            let seg = segs.get_mut(s);
            seg.y = y;
            seg.start = start;
            seg.len = len;
            blobs.add_segment(blob, s, &mut segs);
        }

        let mut ext = RowExtents::with_height(160);
        ext.collect(blob, &segs, &blobs);
        assert_eq!((ext.y_start, ext.y_end), (30, 31));
        assert_eq!((ext.first(30), ext.last(30)), (40, 59));
        // two runs on row 31: extents span both
        assert_eq!((ext.first(31), ext.last(31)), (38, 62));
    }

    #[test]
    fn square_blob_passes() {
        assert!(triage(&rect_extents(50, 110, 50, 110), &geom()));
    }

    #[test]
    fn vertical_extent_boundary_is_fifteen_rows() {
        // 15 rows -> extent 14: too small; 16 rows -> extent 15: kept
        assert!(!triage(&rect_extents(50, 64, 50, 110), &geom()));
        assert!(triage(&rect_extents(50, 65, 50, 110), &geom()));
    }

    #[test]
    fn width_boundary() {
        assert!(!triage(&rect_extents(50, 110, 50, 64), &geom()));
        assert!(triage(&rect_extents(50, 110, 50, 65), &geom()));
    }

    #[test]
    fn border_contact_rejects() {
        assert!(!triage(&rect_extents(0, 60, 50, 110), &geom()));
        assert!(!triage(&rect_extents(100, 159, 50, 110), &geom()));
        // one row clear of the border is fine
        assert!(triage(&rect_extents(1, 60, 50, 110), &geom()));
        assert!(triage(&rect_extents(100, 158, 50, 110), &geom()));
    }

    #[test]
    fn margin_contact_rejects_on_unaligned_frames() {
        let geom = FrameGeom::new(160, 166); // margin_y = 3
        assert!(!triage(&rect_extents(3, 60, 50, 110), &geom));
        assert!(triage(&rect_extents(4, 60, 50, 110), &geom));
        assert!(!triage(&rect_extents(100, 162, 50, 110), &geom));
        assert!(triage(&rect_extents(100, 161, 50, 110), &geom));
    }

    #[test]
    fn edge_jump_boundary_is_fifty() {
        let mut ext = rect_extents(50, 110, 50, 110);
        ext.first[80] = 50 + 51; // 51-column step between rows 79 and 80
        assert!(!triage(&ext, &geom()));

        let mut ext = rect_extents(50, 110, 50, 110);
        ext.first[80] = 50 + 50;
        // a 50-column step on one row pair is still (barely) allowed
        assert!(triage(&ext, &geom()));
    }
}
