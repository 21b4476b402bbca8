use std::hint::black_box;
use std::time::Instant;

use isleworld_ocean::{OceanGrid, WaveConfig, WaveSurface};

fn bench_displace(segments: u32, iterations: usize) {
    let grid = OceanGrid {
        width_segments: segments,
        height_segments: segments,
        ..OceanGrid::default()
    };
    let mut surface = match WaveSurface::new(WaveConfig::default(), grid) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("  skipped {segments}x{segments}: {e}");
            return;
        }
    };

    let start = Instant::now();
    for i in 0..iterations {
        surface.displace(black_box(i as f32 * 0.033));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  displace ({} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        surface.vertex_count()
    );
}

fn main() {
    println!("=== Ocean Surface Benchmarks ===\n");

    println!("--- Wave displacement ---");
    bench_displace(32, 1000);
    bench_displace(100, 200);
    bench_displace(256, 50);
}
