//! Fuzz target for the IQRM engine.
//!
//! Arbitrary signals (NaN and infinities included), radii, thresholds and
//! ignore lists must produce either a mask of the input's length or an
//! error, never a panic.

#![no_main]

use arbitrary::Arbitrary;
use iqrm_core::{compute_mask, IgnorePolicy, IqrmEngine, IqrmParams};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    x: Vec<f64>,
    radius: u16,
    threshold: f64,
    geometric_factor: f64,
    ignore: Vec<u16>,
    lenient: bool,
}

fuzz_target!(|input: Input| {
    let ignore: Vec<usize> = input.ignore.iter().map(|&i| i as usize).collect();
    let radius = input.radius as usize;

    if let Ok((mask, _)) = compute_mask(&input.x, radius, input.threshold, &ignore) {
        assert_eq!(mask.len(), input.x.len());
        for &c in &ignore {
            assert!(mask[c]);
        }
    }

    let policy = if input.lenient {
        IgnorePolicy::Drop
    } else {
        IgnorePolicy::Reject
    };
    let engine = IqrmParams::new(radius, input.threshold)
        .and_then(|p| p.with_geometric_factor(input.geometric_factor))
        .and_then(IqrmEngine::new);
    if let Ok(engine) = engine {
        if let Ok(result) = engine.with_ignore_policy(policy).run(&input.x, &ignore) {
            assert_eq!(result.mask.len(), input.x.len());
        }
    }
});
