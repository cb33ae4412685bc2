//! Equidistant points on `x + sin x` over `[0, 6.5]`.
//!
//! Prints each point, the chord to its predecessor and the spread of chord lengths, so the
//! effect of the precision knobs can be eyeballed from the command line:
//!   cargo run -p arcspace --example ramp_points

use std::time::Instant;

use arcspace::{arc_length, resample_with, PrecisionCfg, SolveCfg};

fn main() {
    let f = |x: f64| x + x.sin();
    let (a, b, n) = (0.0, 6.5, 11);

    for (label, cfg) in [
        ("default", PrecisionCfg::default()),
        ("degree3", PrecisionCfg::from_degree(3)),
    ] {
        let start = Instant::now();
        let seq = resample_with(f, a, b, n, &cfg, &SolveCfg::default())
            .expect("resample succeeds on a smooth ramp");
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        let total = arc_length(f, a, b, &cfg);

        println!("config={label} total_length={total:.6} time_ms={elapsed_ms:.3}");
        let chords = seq.chord_lengths();
        for (i, p) in seq.iter().enumerate() {
            match i.checked_sub(1).map(|j| chords[j]) {
                Some(d) => println!("  i={i:2}  x={:.6}  y={:.6}  chord={d:.6}", p.x, p.y),
                None => println!("  i={i:2}  x={:.6}  y={:.6}", p.x, p.y),
            }
        }
        let lo = chords.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = chords.iter().copied().fold(0.0, f64::max);
        println!("  chord_spread={:.3e}", hi - lo);
    }
}
