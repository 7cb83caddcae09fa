/// Multiplier applied by golden-optimized aggregation.
pub const GOLDEN_RATIO: f64 = 1.618033988749895;
pub const GOLDEN_RATIO_INV: f64 = 1.0 / GOLDEN_RATIO;
