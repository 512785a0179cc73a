use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xychart_core::{HitRect, Quadtree};

fn scattered(n: usize) -> Vec<HitRect> {
    // deterministic LCG so runs are comparable
    let mut s: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((s >> 33) as f32) / (u32::MAX >> 1) as f32
    };
    (0..n)
        .map(|i| {
            let d = 4.0 + next() * 20.0;
            HitRect { x: next() * 1600.0, y: next() * 1000.0, w: d, h: d, series_index: 1, data_index: i }
        })
        .collect()
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    for &n in &[1_000usize, 10_000usize] {
        let rects = scattered(n);
        group.bench_function(format!("insert_{n}"), |b| {
            b.iter(|| {
                let mut q = Quadtree::new(0.0, 0.0, 1600.0, 1000.0);
                for r in &rects {
                    q.insert(*r);
                }
                black_box(q.len())
            });
        });

        let mut q = Quadtree::new(0.0, 0.0, 1600.0, 1000.0);
        for r in &rects {
            q.insert(*r);
        }
        group.bench_function(format!("point_query_{n}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for i in 0..100 {
                    let (x, y) = (i as f32 * 16.0, i as f32 * 10.0);
                    q.query(x, y, 1.0, 1.0, |r| hits += r.contains_point(x, y) as usize);
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quadtree);
criterion_main!(benches);
