use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

pub fn bench_tier() -> BenchTier {
    match env::var("LINEWELD_BENCH_TIER").as_deref() {
        Ok("full") => BenchTier::Full,
        _ => BenchTier::Quick,
    }
}

/// Input sizes (segment counts) measured at each tier.
pub fn bench_sizes(tier: BenchTier) -> &'static [usize] {
    match tier {
        BenchTier::Quick => &[200, 1_000],
        BenchTier::Full => &[200, 1_000, 4_000],
    }
}
