/// Decimal adjustment of `value` to `10^exp` (so `exp = -2` keeps two decimals).
///
/// The shift is done on the decimal text of the number rather than by
/// multiplying, so `1.005` rounds to `1.01` even though its binary value is
/// slightly below 1.005. Ties round half away from zero (`-1.005` -> `-1.01`).
/// Non-finite values pass straight through.
pub fn round10(value: f64, exp: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let shifted: f64 = match format!("{}e{}", value, -exp).parse() {
        Ok(v) => v,
        Err(_) => return value,
    };
    let rounded = shifted.round();
    let result: f64 = format!("{}e{}", rounded, exp).parse().unwrap_or(value);
    // -0.004 rounds to -0.0, which would serialize with its sign
    if result == 0.0 { 0.0 } else { result }
}

/// Piecewise-linear lookup of `x` over the knots `(xs[i], ys[i])`.
/// `xs` must be non-decreasing; `x` outside the knots clamps to the end values.
/// Repeated knots resolve to the later `ys` entry.
pub fn piecewise_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let (Some(&first_x), Some(&last_x)) = (xs.first(), xs.last()) else {
        return f64::NAN;
    };
    if x <= first_x {
        return ys[0];
    }
    if x >= last_x {
        return ys[ys.len() - 1];
    }
    let hi = xs.iter().position(|&k| k > x).unwrap_or(xs.len() - 1);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span <= 0.0 {
        return ys[hi];
    }
    ys[lo] + (ys[hi] - ys[lo]) * (x - xs[lo]) / span
}

/// Number of digits before the decimal point once `value` is rounded to an
/// integer, e.g. 0.3 -> 1, 9.6 -> 2, 4321.0 -> 4.
pub fn integer_digits(value: f64) -> usize {
    format!("{:.0}", value.abs()).len()
}
