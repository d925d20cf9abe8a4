// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value arithmetic: clamping, step snapping, pointer fractions, and percentages.
//!
//! Everything here is pure and total. Degenerate inputs (`min > max`, `step <= 0`,
//! zero-sized elements) produce degenerate but finite results.

/// Clamp `v` into `[min, max]`. If `min > max`, the upper bound wins.
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    let v = if v < min { min } else { v };
    if v > max { max } else { v }
}

/// Snap an offset from `min` to a whole number of steps, rounding half steps up.
///
/// Non-positive steps leave the offset unchanged.
pub fn snap(offset: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return offset;
    }
    let rem = offset % step;
    let snapped = offset - rem;
    if rem >= step / 2.0 {
        snapped + step
    } else {
        snapped
    }
}

/// Position of `coord` along `[origin, origin + extent]` as a fraction in `[0, 1]`.
///
/// Zero or negative extents give `0`.
pub fn fraction(coord: f64, origin: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    clamp((coord - origin) / extent, 0.0, 1.0)
}

/// The snapped value at `fraction` of the way from `min` to `max`.
pub fn value_at_fraction(fraction: f64, min: f64, max: f64, step: f64) -> f64 {
    min + snap(fraction * (max - min), step)
}

/// Where `v` sits between `min` and `max`, in percent. Equal bounds give `0`.
pub fn percent(v: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }
    (v - min) / span * 100.0
}

/// Index of the entry of `values` nearest to `target`. The first wins ties.
pub fn nearest(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let d = (target - v).abs();
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}
