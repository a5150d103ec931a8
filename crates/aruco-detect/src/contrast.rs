//! Local-contrast estimation: per-cell integral sums reduced to a per-cell
//! threshold byte.

use crate::frame::{FrameGeom, CELL};

/// Half-width of the averaging window, in cells.
const DELTA: i32 = 5;

/// Compute the threshold grid for the current frame.
///
/// Phase 1 fills `sums` with the standard two-pass summed-area recurrence
/// over 8×8 cell sums. Phase 2 reduces a `(2Δ+1)²` window around each cell
/// (clamped at the grid borders) to a per-pixel average and stores
/// `avg · 240/256` — slightly below the true mean, so a uniform surface
/// reads as light instead of as threshold noise. `sums` is dead storage
/// once this returns.
pub(crate) fn compute_threshold_grid(
    frame: &[u8],
    geom: &FrameGeom,
    sums: &mut [u32],
    grid: &mut [u8],
) {
    debug_assert_eq!(sums.len(), geom.grid_len());
    debug_assert_eq!(grid.len(), geom.grid_len());

    let gw = geom.grid_w;

    for gy in 0..geom.grid_h {
        for gx in 0..gw {
            let y0 = gy * CELL + geom.margin_y;
            let x0 = gx * CELL + geom.margin_x;
            let mut total: u32 = 0;
            for iy in 0..CELL {
                let row = &frame[(y0 + iy) * geom.width + x0..][..CELL];
                for &p in row {
                    total += p as u32;
                }
            }
            if gy != 0 {
                total = total.wrapping_add(sums[(gy - 1) * gw + gx]);
            }
            if gx != 0 {
                total = total.wrapping_add(sums[gy * gw + gx - 1]);
            }
            if gy != 0 && gx != 0 {
                total = total.wrapping_sub(sums[(gy - 1) * gw + gx - 1]);
            }
            sums[gy * gw + gx] = total;
        }
    }

    let get = |y: i32, x: i32| -> i64 {
        if y < 0 || x < 0 {
            0
        } else {
            sums[y as usize * gw + x as usize] as i64
        }
    };
    let window_px = ((DELTA * 2 + 1) * (DELTA * 2 + 1)) as i64 * (CELL * CELL) as i64;

    for y in 0..geom.grid_h as i32 {
        let mut gy = y;
        if gy < DELTA {
            gy = DELTA;
        }
        if gy > geom.grid_h as i32 - DELTA - 1 {
            gy = geom.grid_h as i32 - DELTA - 1;
        }

        for x in 0..gw as i32 {
            let mut gx = x;
            if gx < DELTA {
                gx = DELTA;
            }
            if gx > gw as i32 - DELTA - 1 {
                gx = gw as i32 - DELTA - 1;
            }

            let win = get(gy - DELTA, gx - DELTA) + get(gy + DELTA, gx + DELTA)
                - get(gy - DELTA, gx + DELTA)
                - get(gy + DELTA, gx - DELTA);
            let avg = (win / window_px * 240) >> 8;
            grid[y as usize * gw + x as usize] = avg as u8;
        }
    }
}
