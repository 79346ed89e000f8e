//! Numerically stable arithmetic over log-probabilities.
//!
//! Every probability combination in `poissbin`, `snpcaller` and `sourcequal` passes
//! through these three functions. Keeping them in one place removes a whole class of
//! silent precision loss that would otherwise creep back in wherever someone reaches
//! for `(1.0 + x.exp()).ln()` instead of `x.exp().ln_1p()`.

/// Sentinel standing in for `log(0) = -inf`. Chosen to be far enough from any real
/// log-probability that comparisons against it behave like comparisons against `-inf`,
/// while still being a finite `f64` that debug assertions can format and print.
pub const LOGZERO: f64 = -1e100;

/// `log(exp(a) + exp(b))`, computed so the argument of `ln_1p` stays in `[0, 1]`.
///
/// Commutative to within one ulp. Either argument may be `LOGZERO`/`-inf`; the result
/// is then simply the other argument.
pub fn log_sum(a: f64, b: f64) -> f64 {
    if a.is_infinite() && a < 0.0 {
        return b;
    }
    if b.is_infinite() && b < 0.0 {
        return a;
    }
    if a > b {
        a + (b - a).exp().ln_1p()
    } else {
        b + (a - b).exp().ln_1p()
    }
}

/// `log(exp(a) - exp(b))`, valid when `a >= b`.
///
/// Mirrors `log_sum` but subtracts inside `ln_1p`, so it stays accurate down to
/// `a - b` on the order of `1e-15`. If `a < b` by more than rounding error the result
/// is unspecified (the subtraction goes negative) but the function will not panic.
pub fn log_diff(a: f64, b: f64) -> f64 {
    if b.is_infinite() && b < 0.0 {
        return a;
    }
    a + (-(b - a).exp()).ln_1p()
}

/// `log(sum(exp(v[i])) for i in [start, end))`, via a left fold over `log_sum`.
///
/// Panics in debug builds if `start >= end`: reading an empty tail is always a
/// caller bug here, never a valid "zero" result.
pub fn probvec_tailsum(v: &[f64], start: usize, end: usize) -> f64 {
    debug_assert!(start < end, "tail sum range must be non-empty");
    let mut tailsum = v[start];
    for &x in &v[start + 1..end] {
        tailsum = log_sum(tailsum, x);
    }
    tailsum
}
