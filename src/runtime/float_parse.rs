//! Strict decimal parsing for a single field. Unlike AWK-style conversions, which stop at the
//! first bad byte and fall back to 0, a field must be a number in its entirety (after trimming)
//! or the conversion fails.
use super::splitter::trim;

pub(crate) fn strtod(field: &[u8]) -> Option<f64> {
    let bs = trim(field);
    if bs.is_empty() {
        return None;
    }
    // fast_float::parse rejects trailing garbage, so "1.5x" and "1.5 2" are both errors.
    fast_float::parse::<f64, _>(bs).ok()
}
