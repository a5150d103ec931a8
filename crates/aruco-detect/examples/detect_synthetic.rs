//! Rasterize a couple of synthetic markers, run the detector, and print the
//! detections as JSON.
//!
//! Run with `RUST_LOG=trace` to watch the pipeline reject and accept
//! candidates:
//!
//! ```sh
//! RUST_LOG=trace cargo run --example detect_synthetic
//! ```

use aruco_detect::{Detector, DetectorConfig};
use aruco_dicts::{builtins, code_bit, Dictionary};

fn draw_marker(frame: &mut [u8], width: usize, d: &Dictionary, id: usize, x0: usize, y0: usize, size: usize) {
    let bits = d.marker_bits;
    let total = bits + 2;
    let ring = size / total;
    for py in (y0 - ring)..(y0 + size + ring) {
        for px in (x0 - ring)..(x0 + size + ring) {
            frame[py * width + px] = 255;
        }
    }
    let code = d.code(id);
    for py in y0..y0 + size {
        for px in x0..x0 + size {
            let cy = (py - y0) * total / size;
            let cx = (px - x0) * total / size;
            let light = if cy == 0 || cy == total - 1 || cx == 0 || cx == total - 1 {
                false
            } else {
                code_bit(code, bits, cy - 1, cx - 1)
            };
            frame[py * width + px] = if light { 255 } else { 0 };
        }
    }
}

fn main() {
    env_logger::init();

    let dict = builtins::builtin_dictionary("DICT_4X4_50H4").expect("builtin dict");
    let config = DetectorConfig {
        width: 320,
        height: 240,
        max_markers: 16,
    };
    let mut detector = Detector::new(config, dict).expect("detector");

    detector.frame_mut().fill(128);
    draw_marker(detector.frame_mut(), config.width, &dict, 0, 40, 40, 60);
    draw_marker(detector.frame_mut(), config.width, &dict, 23, 180, 120, 72);

    detector.process();
    log::info!("found {} markers", detector.markers().len());

    println!(
        "{}",
        serde_json::to_string_pretty(detector.markers()).expect("serialize detections")
    );
}
