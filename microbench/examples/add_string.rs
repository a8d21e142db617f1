//! Suite-based benchmark binary: `cargo run --release --example add_string`.

use microbench::{run, Setting, Suite};

fn main() -> anyhow::Result<()> {
    let suite = Suite::build(
        "add string",
        vec![Setting::Iterations(10_000)],
        |suite| {
            suite.benchmark("no capacity", || {
                let mut x = String::new();
                for _ in 0..1000 {
                    x += "hi";
                }
                std::hint::black_box(&x);
            });

            suite.benchmark_with_settings(
                "reserved capacity",
                vec![Setting::Iterations(10_001)],
                || {
                    let mut x = String::with_capacity(2000);
                    for _ in 0..1000 {
                        x += "hi";
                    }
                    std::hint::black_box(&x);
                },
            );
        },
    );

    run(vec![suite])
}
