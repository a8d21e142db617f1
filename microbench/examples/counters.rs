//! Explicit measurement sections and counters:
//! `cargo run --release --example counters -- --columns name,time,bytes`

use microbench::{run, Suite};

fn main() -> anyhow::Result<()> {
    let mut suite = Suite::new("buffers");

    suite.benchmark_measured("fill reused buffer", |state| {
        let mut buffer: Vec<u8> = Vec::with_capacity(4096);
        loop {
            buffer.clear();
            state.measure(|| buffer.extend(std::iter::repeat(7u8).take(4096)))?;
            state.increment_by("bytes", 4096.0);
        }
    });

    suite.benchmark_measured("fill fresh buffer", |state| {
        state.measure(|| {
            let buffer: Vec<u8> = std::iter::repeat(7u8).take(4096).collect();
            std::hint::black_box(&buffer);
        })?;
        state.increment_by("bytes", 4096.0);
        Ok(())
    });

    run(vec![suite])
}
