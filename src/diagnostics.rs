use crate::{Error, Result};

/// Result of a one-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsTest {
    pub statistic: f64,
    pub p_value: f64,
}

/// The largest distance between the empirical CDF of `samples` and `cdf`.
pub fn ks_statistic<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::EmptySample);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let statistic = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0f64, f64::max);
    Ok(statistic)
}

/// Asymptotic p-value of the KS statistic `statistic` for `n` samples,
/// with Stephens' correction for small `n`.
pub fn kolmogorov_p_value(statistic: f64, n: usize) -> f64 {
    if n == 0 {
        return f64::NAN;
    }
    let sqrt_n = (n as f64).sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic;
    if lambda < 0.2 {
        // The series converges too slowly here, and the value is 1 up to
        // many digits anyway.
        return 1.;
    }

    let mut sum = 0f64;
    let mut sign = 1f64;
    for j in 1..=100 {
        let j = j as f64;
        let term = sign * 2. * (-2. * j * j * lambda * lambda).exp();
        sum += term;
        if term.abs() < 1e-12 * sum.abs() || term.abs() < 1e-300 {
            break;
        }
        sign = -sign;
    }
    sum.clamp(0., 1.)
}

/// One-sample Kolmogorov-Smirnov test of `samples` against `cdf`.
pub fn ks_test<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> Result<KsTest> {
    let statistic = ks_statistic(samples, cdf)?;
    Ok(KsTest {
        statistic,
        p_value: kolmogorov_p_value(statistic, samples.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn uniform_cdf(x: f64) -> f64 {
        x.clamp(0., 1.)
    }

    #[test]
    fn statistic_of_regular_grid() {
        let n = 50;
        let samples: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
        let d = ks_statistic(&samples, uniform_cdf).unwrap();
        assert_abs_diff_eq!(d, 0.5 / n as f64, epsilon = 1e-12);
    }

    #[test]
    fn statistic_of_shifted_sample() {
        let samples = [0.9, 0.95, 0.99];
        let d = ks_statistic(&samples, uniform_cdf).unwrap();
        assert_abs_diff_eq!(d, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn p_values() {
        assert_eq!(kolmogorov_p_value(0., 100), 1.);
        assert!(kolmogorov_p_value(0.5, 1000) < 1e-10);
        // lambda ~ 1.36 is the classical 5% critical value
        let d = 1.358 / (100f64.sqrt() + 0.12 + 0.11 / 100f64.sqrt());
        assert_abs_diff_eq!(kolmogorov_p_value(d, 100), 0.05, epsilon = 1e-3);
        assert!(kolmogorov_p_value(0.1, 0).is_nan());
    }

    #[test]
    fn uniform_draws_pass() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples: Vec<f64> = (0..2000).map(|_| rng.random::<f64>()).collect();
        let test = ks_test(&samples, uniform_cdf).unwrap();
        assert!(test.p_value > 0.01);

        let squared: Vec<f64> = samples.iter().map(|x| x * x).collect();
        let test = ks_test(&squared, uniform_cdf).unwrap();
        assert!(test.p_value < 1e-6);
    }

    #[test]
    fn empty() {
        assert_eq!(ks_test(&[], uniform_cdf), Err(Error::EmptySample));
    }
}
