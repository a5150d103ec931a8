use aruco_detect::{Detector, DetectorConfig};
use aruco_dicts::{builtins, code_bit, Dictionary};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

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

fn bench_process(c: &mut Criterion) {
    let dict = builtins::builtin_dictionary("DICT_4X4_50H4").expect("builtin dict");

    let mut det = Detector::new(DetectorConfig::default(), dict).expect("detector");
    det.frame_mut().fill(128);
    draw_marker(det.frame_mut(), 160, 160, &dict, 0, 50, 50, 60);
    c.bench_function("process 160x160, one marker", move |b| {
        b.iter(|| {
            det.process();
            black_box(det.markers().len())
        })
    });

    let mut det = Detector::new(
        DetectorConfig {
            width: 640,
            height: 480,
            max_markers: 16,
        },
        dict,
    )
    .expect("detector");
    det.frame_mut().fill(128);
    for (i, (x, y)) in [(60usize, 60usize), (300, 80), (480, 260), (120, 300)]
        .into_iter()
        .enumerate()
    {
        draw_marker(det.frame_mut(), 640, &dict, i, x, y, 90);
    }
    c.bench_function("process 640x480, four markers", move |b| {
        b.iter(|| {
            det.process();
            black_box(det.markers().len())
        })
    });
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
