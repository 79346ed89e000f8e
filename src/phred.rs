//! Phred quality <-> probability conversions, shared by `cigar`, `snpcaller` and
//! `sourcequal`.

/// `p = 10^(-q/10)`.
pub fn phred_to_prob(q: u8) -> f64 {
    10f64.powf(-(q as f64) / 10.0)
}

/// `q = round(-10 * log10(p))`, clamped to `[0, 255]`. `p <= 0.0` maps to the maximum
/// representable quality, 255, since `log10(0)` is undefined but a zero probability
/// of error is exactly what a saturated Phred score means.
pub fn prob_to_phred(p: f64) -> u8 {
    if p <= 0.0 {
        return 255;
    }
    let q = (-10.0 * p.log10()).round();
    if q.is_nan() || q < 0.0 {
        0
    } else if q > 255.0 {
        255
    } else {
        q as u8
    }
}
