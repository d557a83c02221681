//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Map a unit draw in `[0, 1)` onto an offset in `0..span`, clamping stray
/// values so the result never reaches `span`.
#[must_use]
pub fn unit_to_offset(unit: f64, span: u64) -> u64 {
    if span == 0 || !unit.is_finite() {
        return 0;
    }
    let scaled = (unit.clamp(0.0, 1.0) * u64_to_f64(span)).floor();
    let offset = cast::<f64, u64>(scaled).unwrap_or(0);
    offset.min(span - 1)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert u32 to f64; lossless, kept next to its wider sibling for symmetry.
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Narrow a usize count to u32, saturating on overflow.
#[must_use]
pub fn count_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
