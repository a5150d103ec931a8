//! Row scanner: thresholds pixels against the cell grid, extracts horizontal
//! dark runs, and unions them across rows into labeled blobs.

use log::trace;

use crate::arena::{BlobArena, SegmentArena, NONE};
use crate::debug::DebugCanvas;
use crate::frame::{FrameGeom, CELL};

/// Longest representable run, in pixels. A longer run would have to fill
/// most of the frame and is discarded as not-a-marker.
pub(crate) const MAX_RUN_LEN: usize = 255;

/// Segment arena capacity, capped so indices always fit in 16 bits.
pub(crate) fn segment_capacity(geom: &FrameGeom) -> usize {
    (geom.usable_w * geom.usable_h / 50).min(65535)
}

pub(crate) fn blob_capacity(geom: &FrameGeom) -> usize {
    geom.usable_w * geom.usable_h / 850
}

pub(crate) fn line_capacity(geom: &FrameGeom) -> usize {
    geom.usable_w / 6
}

// Maps the rolling 8-bit threshold window (LSB = newest pixel, 1 = light)
// to an edge class: 1 = light→dark transition, 2 = dark→light, 0 = none.
// Populated for exactly the 28 window patterns of three-or-more pixels of
// one polarity followed by four of the other, which centers the reported
// edge on the 3–4 bit boundary under a 4-tap smoothing assumption. The
// table is precomputed so the scanner's inner loop is a single load.
#[rustfmt::skip]
static EDGE_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 2,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 2,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const EDGE_FALLING: u8 = 1;
const EDGE_RISING: u8 = 2;

/// Fixed-capacity per-row segment index buffers.
#[derive(Debug)]
pub(crate) struct LineBuffers {
    prev: Vec<i32>,
    cur: Vec<i32>,
    cap: usize,
}

impl LineBuffers {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            prev: Vec::with_capacity(cap),
            cur: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn reset(&mut self) {
        self.prev.clear();
        self.cur.clear();
    }

    #[inline]
    fn push_cur(&mut self, idx: i32) {
        // overflow drops row tracking only; the segment stays blob-linked
        if self.cur.len() < self.cap {
            self.cur.push(idx);
        }
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.prev, &mut self.cur);
        self.cur.clear();
    }
}

/// Scan every usable row, building the segment and blob arenas.
pub(crate) fn scan_rows(
    frame: &[u8],
    lc_grid: &[u8],
    geom: &FrameGeom,
    segs: &mut SegmentArena,
    blobs: &mut BlobArena,
    lines: &mut LineBuffers,
    dbg: &mut DebugCanvas,
) {
    segs.reset();
    blobs.reset();
    lines.reset();

    for y in 0..geom.usable_h {
        let py = y + geom.margin_y;
        let row = &frame[py * geom.width..][..geom.width];
        let thr_row = &lc_grid[(y / CELL) * geom.grid_w..][..geom.grid_w];

        let mut run_start: i32 = -1;
        let mut shift: u8 = 0xAA;
        let mut px = geom.margin_x;

        for gx in 0..geom.grid_w {
            let thr = thr_row[gx];

            let mut cell_bits: u8 = 0;
            for (i, &p) in row[px..px + CELL].iter().enumerate() {
                if p > thr {
                    cell_bits |= 1 << i;
                }
            }

            // uniform block matching the window tail: nothing can fire here
            if (cell_bits == 0 || cell_bits == 0xFF) && (cell_bits & 15) == (shift & 15) {
                px += CELL;
                continue;
            }

            let mut bits = cell_bits;
            for _ in 0..CELL {
                shift = (shift << 1) | (bits & 1);
                bits >>= 1;

                match EDGE_TABLE[shift as usize] {
                    EDGE_FALLING => run_start = px as i32 - 3,
                    EDGE_RISING => {
                        if run_start != -1 {
                            emit_run(py, run_start as usize, px - 3, segs, blobs, lines, dbg);
                            run_start = -1;
                        }
                    }
                    _ => {}
                }
                px += 1;
            }
        }
        advance_line(lines, segs, blobs);
    }
    // close out blobs that end on the bottom row
    advance_line(lines, segs, blobs);
}

/// Record one dark run and attach it to a blob.
fn emit_run(
    py: usize,
    x1: usize,
    x2: usize,
    segs: &mut SegmentArena,
    blobs: &mut BlobArena,
    lines: &mut LineBuffers,
    dbg: &mut DebugCanvas,
) {
    if x2 - x1 > MAX_RUN_LEN {
        return;
    }

    dbg.draw_run(py, x1, x2);

    let Some(seg_idx) = segs.alloc() else {
        trace!("segment arena exhausted, dropping run at ({x1},{py})");
        return;
    };
    {
        let seg = segs.get_mut(seg_idx);
        seg.y = py as u16;
        seg.start = x1 as u16;
        seg.len = (x2 - x1) as u8;
        seg.blob = NONE;
        seg.next = NONE;
    }

    // adopt the blob of any overlapping run on the previous row, merging
    // when the run bridges several
    let new_seg = segs.get(seg_idx);
    let mut blob = NONE;
    for i in 0..lines.prev.len() {
        let prev = segs.get(lines.prev[i]);
        if prev.overlaps(&new_seg) {
            if blob == NONE {
                blob = prev.blob;
            } else if blob != prev.blob {
                blob = blobs.merge(blob, prev.blob, segs);
            }
        }
    }

    if blob == NONE {
        match blobs.alloc() {
            Some(b) => blob = b,
            None => {
                trace!("blob arena exhausted, dropping run at ({x1},{py})");
                segs.dealloc(seg_idx);
                return;
            }
        }
    }
    blobs.add_segment(blob, seg_idx, segs);
    lines.push_cur(seg_idx);
}

/// End-of-row housekeeping: drop blobs that just stopped growing and are
/// too small to be a marker, then rotate the row buffers.
fn advance_line(lines: &mut LineBuffers, segs: &mut SegmentArena, blobs: &mut BlobArena) {
    for i in 0..lines.prev.len() {
        let blob = segs.get(lines.prev[i]).blob;
        let still_active = lines
            .cur
            .iter()
            .any(|&idx| segs.get(idx).blob == blob);
        if !still_active {
            blobs.drop_if_small(blob, segs);
        }
    }
    lines.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scratch {
        segs: SegmentArena,
        blobs: BlobArena,
        lines: LineBuffers,
        lc_grid: Vec<u8>,
        geom: FrameGeom,
    }

    fn scratch(width: usize, height: usize) -> Scratch {
        let geom = FrameGeom::new(width, height);
        // the tiny test frames under-size the production formulas
        Scratch {
            segs: SegmentArena::with_capacity(segment_capacity(&geom).max(256)),
            blobs: BlobArena::with_capacity(blob_capacity(&geom).max(4)),
            lines: LineBuffers::with_capacity(line_capacity(&geom)),
            lc_grid: vec![100; geom.grid_len()],
            geom,
        }
    }

    fn scan(s: &mut Scratch, frame: &[u8]) {
        let mut dbg = DebugCanvas::new(s.geom.width, s.geom.height);
        scan_rows(
            frame,
            &s.lc_grid,
            &s.geom,
            &mut s.segs,
            &mut s.blobs,
            &mut s.lines,
            &mut dbg,
        );
    }

    fn live_blobs(s: &Scratch) -> usize {
        (0..s.blobs.len() as i32)
            .filter(|&i| s.blobs.is_live(i))
            .count()
    }

    fn draw_bar(frame: &mut [u8], width: usize, x0: usize, x1: usize, y0: usize, y1: usize) {
        for y in y0..y1 {
            frame[y * width + x0..y * width + x1].fill(0);
        }
    }

    #[test]
    fn light_frame_produces_no_blobs() {
        let mut s = scratch(64, 32);
        let frame = vec![255u8; 64 * 32];
        scan(&mut s, &frame);
        assert_eq!(s.blobs.len(), 0);
    }

    #[test]
    fn separate_bars_become_separate_blobs() {
        let mut s = scratch(64, 32);
        let mut frame = vec![255u8; 64 * 32];
        draw_bar(&mut frame, 64, 10, 20, 3, 28);
        draw_bar(&mut frame, 64, 40, 50, 3, 28);
        scan(&mut s, &frame);
        assert_eq!(live_blobs(&s), 2);
    }

    #[test]
    fn bridged_bars_merge_into_one_blob() {
        let mut s = scratch(64, 32);
        let mut frame = vec![255u8; 64 * 32];
        draw_bar(&mut frame, 64, 10, 20, 3, 28);
        draw_bar(&mut frame, 64, 40, 50, 3, 28);
        draw_bar(&mut frame, 64, 10, 50, 24, 28);
        scan(&mut s, &frame);
        assert_eq!(live_blobs(&s), 1);
        let blob = (0..s.blobs.len() as i32)
            .find(|&i| s.blobs.is_live(i))
            .unwrap();
        // both bars plus the bridge rows, each bridge row a single run
        assert_eq!(s.blobs.seg_count(blob), 21 + 21 + 4);
    }

    #[test]
    fn short_lived_blobs_are_dropped() {
        let mut s = scratch(64, 32);
        let mut frame = vec![255u8; 64 * 32];
        // 20 rows = 20 segments: not enough to survive
        draw_bar(&mut frame, 64, 10, 20, 3, 23);
        scan(&mut s, &frame);
        assert_eq!(s.blobs.len(), 1);
        assert_eq!(live_blobs(&s), 0);
    }

    #[test]
    fn run_of_255_is_kept_and_256_is_dropped() {
        let mut s = scratch(280, 32);
        let mut frame = vec![255u8; 280 * 32];
        // single row: the blob is dropped either way, but the segment and
        // blob slots record whether the run was accepted
        draw_bar(&mut frame, 280, 10, 10 + 255, 8, 9);
        scan(&mut s, &frame);
        assert_eq!(s.blobs.len(), 1);

        let mut s = scratch(280, 32);
        let mut frame = vec![255u8; 280 * 32];
        draw_bar(&mut frame, 280, 10, 10 + 256, 8, 9);
        scan(&mut s, &frame);
        assert_eq!(s.blobs.len(), 0);
    }

    #[test]
    fn run_coordinates_match_the_painted_bar() {
        let mut s = scratch(64, 32);
        let mut frame = vec![255u8; 64 * 32];
        draw_bar(&mut frame, 64, 12, 30, 8, 9);
        scan(&mut s, &frame);
        assert_eq!(s.blobs.len(), 1);
        // the blob was dropped as too small, but the run it held was exact:
        // re-scan into a fresh arena and inspect before the drop by keeping
        // the bar tall enough to survive
        let mut s = scratch(64, 32);
        let mut frame = vec![255u8; 64 * 32];
        draw_bar(&mut frame, 64, 12, 30, 3, 28);
        scan(&mut s, &frame);
        let blob = (0..s.blobs.len() as i32)
            .find(|&i| s.blobs.is_live(i))
            .unwrap();
        let mut idx = s.blobs.head(blob);
        while idx != NONE {
            let seg = s.segs.get(idx);
            assert_eq!(seg.start, 12);
            assert_eq!(seg.len, 18);
            assert_eq!(seg.last(), 29);
            assert!((3..28).contains(&(seg.y as usize)));
            idx = seg.next;
        }
    }
}
