use std::sync::Arc;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use reel_core::{Executor, Scene};

fn make_script(lines: usize) -> String {
    let mut buf = String::with_capacity(lines * 32);
    buf.push_str("ANIMATION 0 title\n");
    buf.push_str("reset counter\n");
    buf.push_str("id 1\n");
    for i in 0..lines {
        match i % 8 {
            0 => buf.push_str(&format!("add local rick r{i} {i} 200\n")),
            1 => buf.push_str(&format!("set character r{} left\n", i - 1)),
            2 => buf.push_str(&format!("set size r{} 1.5 relative\n", i - 2)),
            3 => buf.push_str(&format!("print line {i}\n")),
            4 => buf.push_str("set opacity 40\n"),
            5 => buf.push_str(&format!("remove r{}\n", i - 5)),
            6 => buf.push_str("set background city2\n"),
            7 => buf.push_str("clear-text\n"),
            _ => unreachable!(),
        }
    }
    buf.push_str("increment counter\ngoto 1 if counter < 3\nreturn -1\n");
    buf
}

fn bench_executor(c: &mut Criterion) {
    const LINES: usize = 10_000;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bench.txt");
    std::fs::write(&path, make_script(LINES)).expect("write script");

    let mut group = c.benchmark_group("executor");
    group.sample_size(10);
    group.bench_function("animate 3x10k stmts", |b| {
        b.iter_batched(
            || {
                let scene = Arc::new(Scene::new(0, &path, None));
                scene.install(255);
                scene
            },
            |scene| Executor::new().animate(&scene),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_executor);
criterion_main!(benches);
