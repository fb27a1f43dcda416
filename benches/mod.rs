use criterion::{criterion_group, criterion_main};

mod shell;

criterion_group!(
    benches,
    shell::bench_dispatch_mem,
    shell::bench_unknown_command
);
criterion_main!(benches);
