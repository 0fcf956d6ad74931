//! Shared statistical utilities.
//!
//! Moments are population moments (divide by n), matching the conventions of
//! the source analytics system. The special functions at the bottom support
//! the slope significance test in `trend.rs`.

/// Arithmetic mean. 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance. 0.0 for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Two-sided p-value for a t statistic with `df` degrees of freedom.
///
/// Uses the identity p = I_x(df/2, 1/2) with x = df / (df + t²), where I is
/// the regularized incomplete beta function. Returns 1.0 for df < 1.
pub fn student_t_two_sided_p(t: f64, df: f64) -> f64 {
    if df < 1.0 || t.is_nan() {
        return 1.0;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Log-gamma function (Stirling's approximation for large values).
fn ln_gamma(x: f64) -> f64 {
    if x <= 0.0 {
        return f64::INFINITY;
    }

    if x < 0.5 {
        // Reflection formula
        std::f64::consts::PI.ln() - (std::f64::consts::PI * x).sin().ln() - ln_gamma(1.0 - x)
    } else if x < 7.0 {
        // Recurse up to the Stirling range
        let mut xx = x;
        let mut result = 0.0;
        while xx < 7.0 {
            result -= xx.ln();
            xx += 1.0;
        }
        result + ln_gamma(xx)
    } else {
        let x2 = x * x;
        (x - 0.5) * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI).ln() + 1.0 / (12.0 * x)
            - 1.0 / (360.0 * x2 * x)
            + 1.0 / (1260.0 * x2 * x2 * x)
    }
}

/// Regularized incomplete beta function I_x(a, b).
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b)
        + a * x.ln()
        + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // The continued fraction converges quickly for x < (a+1)/(a+b+2);
    // use the symmetry relation otherwise.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let max_iter = 200;
    let eps = 1e-12;
    let tiny = 1e-30;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < tiny {
        d = tiny;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=max_iter {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < tiny {
            d = tiny;
        }
        c = 1.0 + aa / c;
        if c.abs() < tiny {
            c = tiny;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < tiny {
            d = tiny;
        }
        c = 1.0 + aa / c;
        if c.abs() < tiny {
            c = tiny;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < eps {
            break;
        }
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_and_std_of_known_values() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx_eq(mean(&values), 5.0, 1e-12));
        assert!(approx_eq(std_dev(&values), 2.0, 1e-12));
    }

    #[test]
    fn moments_of_degenerate_inputs() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[3.0]), 0.0);
        assert_eq!(variance(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn ln_gamma_matches_known_values() {
        // Γ(1) = 1, Γ(5) = 24, Γ(0.5) = sqrt(π)
        assert!(approx_eq(ln_gamma(1.0), 0.0, 1e-8));
        assert!(approx_eq(ln_gamma(5.0), 24.0_f64.ln(), 1e-8));
        assert!(approx_eq(
            ln_gamma(0.5),
            std::f64::consts::PI.sqrt().ln(),
            1e-8
        ));
    }

    #[test]
    fn incomplete_beta_boundary_values() {
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 0.0), 0.0);
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 1.0), 1.0);
        // I_x(1, 1) is the uniform CDF
        assert!(approx_eq(regularized_incomplete_beta(1.0, 1.0, 0.42), 0.42, 1e-10));
    }

    #[test]
    fn t_distribution_p_values() {
        // t = 0 carries no evidence against the null
        assert!(approx_eq(student_t_two_sided_p(0.0, 10.0), 1.0, 1e-10));
        // Critical value of the t distribution: t = 2.228, df = 10 -> p ~ 0.05
        assert!(approx_eq(student_t_two_sided_p(2.228, 10.0), 0.05, 5e-4));
        // Large |t| is decisive
        assert!(student_t_two_sided_p(50.0, 20.0) < 1e-10);
        // Symmetric in t
        assert!(approx_eq(
            student_t_two_sided_p(-2.5, 8.0),
            student_t_two_sided_p(2.5, 8.0),
            1e-12
        ));
    }

    #[test]
    fn t_p_value_edge_inputs() {
        assert_eq!(student_t_two_sided_p(3.0, 0.0), 1.0);
        assert_eq!(student_t_two_sided_p(f64::NAN, 10.0), 1.0);
        assert_eq!(student_t_two_sided_p(f64::INFINITY, 10.0), 0.0);
    }
}
