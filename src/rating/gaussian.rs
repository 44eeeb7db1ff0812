use std::f64::consts::{PI, SQRT_2};

/// Complementary error function (Chebyshev fit, fractional error < 1.2e-7)
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + z / 2.0);
    let poly = -1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87 + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * (-z * z + poly).exp();
    if x < 0.0 { 2.0 - r } else { r }
}

/// Standard normal density
pub fn pdf(x: f64) -> f64 {
    (-x * x / 2.0).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Mean additive correction for a win truncated at zero draw margin
pub fn v_win(t: f64) -> f64 {
    let denom = cdf(t);
    if denom < f64::MIN_POSITIVE {
        -t
    } else {
        pdf(t) / denom
    }
}

/// Variance multiplicative correction for a win truncated at zero draw margin
pub fn w_win(t: f64) -> f64 {
    let denom = cdf(t);
    if denom < f64::MIN_POSITIVE {
        return if t < 0.0 { 1.0 } else { 0.0 };
    }
    let v = v_win(t);
    v * (v + t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_known_values() {
        assert!((cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((cdf(1.959_964) - 0.975).abs() < 1e-6);
        assert!((cdf(-1.0) - 0.158_655_25).abs() < 1e-6);
    }

    #[test]
    fn test_pdf_peak() {
        assert!((pdf(0.0) - 0.398_942_280_4).abs() < 1e-10);
    }

    #[test]
    fn test_win_corrections_at_even_odds() {
        // v(0) = pdf(0) / 0.5, w(0) = v(0)^2
        let v = v_win(0.0);
        assert!((v - 0.797_884_56).abs() < 1e-6);
        assert!((w_win(0.0) - v * v).abs() < 1e-12);
    }

    #[test]
    fn test_w_win_stays_in_unit_interval() {
        for t in [-10.0, -3.0, -1.0, 0.0, 1.0, 3.0, 10.0] {
            let w = w_win(t);
            assert!((0.0..=1.0).contains(&w), "w({t}) = {w}");
        }
    }
}
