use std::env;

use lineweld_core::RawSegment;

pub fn bench_seed() -> u64 {
    env::var("LINEWELD_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE)
}

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }
}

/// Dashed table rules with jitter, roughly what a line detector reports for a
/// scanned form. Produces `count` segments split across horizontal and
/// vertical rules, in shuffled detector order.
pub fn dashed_rules(count: usize, seed: u64) -> Vec<RawSegment> {
    let mut rng = XorShift64::new(seed);
    let mut segments = Vec::with_capacity(count);
    let rules = (count / 20).max(2);
    while segments.len() < count {
        let rule = (rng.next_u64() as usize) % rules;
        let offset = rule as f64 * 25.0 + rng.gen_f64(-0.5, 0.5);
        let start = rng.gen_f64(0.0, 1000.0);
        let len = rng.gen_f64(4.0, 30.0);
        if rng.next_u64() % 2 == 0 {
            segments.push(RawSegment::new(start, offset, start + len, offset));
        } else {
            segments.push(RawSegment::new(offset, start, offset, start + len));
        }
    }
    segments
}
