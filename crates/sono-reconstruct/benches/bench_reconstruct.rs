use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sono_image::{FrameMask, Image, ImageSize};
use sono_reconstruct::{fill_holes, splat_frames, CancelToken};
use sono_track::{Pose, TimedFrame, TimedPosition};
use sono_volume::{BoundingBox3, VolumeParams};

fn bench_pnn(c: &mut Criterion) {
    let mut group = c.benchmark_group("pnn");

    for num_frames in [16, 64].iter() {
        let size = ImageSize {
            width: 128,
            height: 128,
        };
        let frames: Vec<TimedFrame> = (0..*num_frames)
            .map(|i| {
                TimedFrame::new(
                    i as f64 * 33.0,
                    Image::from_size_val(size, 128u8).unwrap(),
                )
            })
            .collect();
        let poses: Vec<TimedPosition> = (0..*num_frames)
            .map(|i| {
                TimedPosition::new(
                    i as f64 * 33.0,
                    Pose::new(*Pose::identity().rotation(), [0.0, 0.0, i as f64 * 0.4]),
                )
            })
            .collect();
        let mask = FrameMask::full(size).unwrap();
        let extent = BoundingBox3::new([0.0; 3], [63.5, 63.5, (*num_frames as f64 * 0.4).max(1.0)]);
        let params = VolumeParams::new(extent, 0.5, [128, 128, *num_frames]).unwrap();
        let token = CancelToken::new();

        group.bench_with_input(
            BenchmarkId::new("splat", num_frames),
            &frames,
            |b, frames| {
                b.iter(|| {
                    splat_frames(
                        black_box(frames),
                        &poses,
                        &mask,
                        &params,
                        [0.5, 0.5],
                        &token,
                    )
                })
            },
        );

        let binned = splat_frames(&frames, &poses, &mask, &params, [0.5, 0.5], &token).unwrap();
        group.bench_with_input(
            BenchmarkId::new("fill_holes", num_frames),
            &binned,
            |b, binned| b.iter(|| fill_holes(black_box(binned), 3, &token)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pnn);
criterion_main!(benches);
