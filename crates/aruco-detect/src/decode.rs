//! Bit sampling along a fitted quad and dictionary identification.

use aruco_dicts::Dictionary;
use log::trace;
use nalgebra::Point2;

use crate::debug::{DebugCanvas, DebugColor};
use crate::frame::{FrameGeom, CELL};

/// Border ring width, in cells.
const BORDER: usize = 1;

/// Classify the raw pixel at the truncated coordinates against its owning
/// cell's threshold. Inside the frame but outside the usable area there is
/// no threshold, and everything reads as dark.
#[inline]
fn is_light(frame: &[u8], lc_grid: &[u8], geom: &FrameGeom, x: i32, y: i32) -> bool {
    let ux = x - geom.margin_x as i32;
    if ux < 0 || ux >= geom.usable_w as i32 {
        return false;
    }
    let uy = y - geom.margin_y as i32;
    if uy < 0 || uy >= geom.usable_h as i32 {
        return false;
    }
    let thr = lc_grid[(uy as usize / CELL) * geom.grid_w + ux as usize / CELL];
    frame[y as usize * geom.width + x as usize] > thr
}

/// Sample the candidate quad as a `(B+2)×(B+2)` cell grid, require a solid
/// dark border ring, pack the interior bits, and search the dictionary.
///
/// On a match the corners are reordered in place so that `corners[0]` is the
/// marker's top-left and the rest follow clockwise; returns the entry id.
pub(crate) fn identify(
    frame: &[u8],
    lc_grid: &[u8],
    geom: &FrameGeom,
    dict: &Dictionary,
    corners: &mut [Point2<f32>; 4],
    code: &mut [u8],
    dbg: &mut DebugCanvas,
) -> Option<u32> {
    let total = dict.marker_bits + 2 * BORDER;
    let inv = 1.0 / (total * 2) as f32;

    let vec0 = (corners[3] - corners[0]) * inv;
    let vec1 = (corners[2] - corners[1]) * inv;

    code.fill(0);
    let mut acc: u8 = 0;
    let mut nbits = 0u32;
    let mut out_idx = 0usize;

    for i in 0..total {
        let e0 = corners[0] + vec0 * (i * 2 + 1) as f32;
        let e1 = corners[1] + vec1 * (i * 2 + 1) as f32;
        let step = (e1 - e0) * inv;

        for j in 0..total {
            let p = e0 + step * (j * 2 + 1) as f32;

            let ix = p.x as i32;
            if ix < 0 || ix >= geom.width as i32 {
                return None;
            }
            let iy = p.y as i32;
            if iy < 0 || iy >= geom.height as i32 {
                return None;
            }

            let light = is_light(frame, lc_grid, geom, ix, iy);
            let on_border =
                i < BORDER || i >= total - BORDER || j < BORDER || j >= total - BORDER;

            if on_border {
                if light {
                    dbg.plot(ix, iy, DebugColor::Red);
                    trace!("light border cell ({i},{j}), not a marker");
                    return None;
                }
                dbg.plot(ix, iy, DebugColor::Marker);
            } else {
                dbg.plot(ix, iy, DebugColor::Marker);
                acc = (acc << 1) | light as u8;
                nbits += 1;
                if nbits == 8 {
                    code[out_idx] = acc;
                    out_idx += 1;
                    nbits = 0;
                    acc = 0;
                }
            }
        }
    }
    if nbits > 0 {
        // trailing bits land right-aligned in the final byte
        code[out_idx] = acc;
    }

    let m = dict.find_exact(code)?;
    if m.rotation != 0 {
        let tmp = *corners;
        for (e, c) in corners.iter_mut().enumerate() {
            *c = tmp[(e + 4 - m.rotation as usize) & 3];
        }
    }
    Some(m.id)
}
