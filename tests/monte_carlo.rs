use anyhow::Result;
use approx::assert_abs_diff_eq;
use mcstat_rs::{
    estimate, estimate_many, importance_weight, Density, MultiRunSettings, NormalProposal,
    RejectionSampler, Triangular, UniformProposal,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{StandardNormal, Uniform};

/// Gamma(4/3), the value of the integral of exp(-x^3) over (0, inf).
const CUBE_INTEGRAL: f64 = 0.892_979_511_569_249_2;

fn cube_weight() -> impl Fn(f64) -> f64 {
    let normal = NormalProposal::standard();
    // |X| for standard normal X has density 2 phi(x) on (0, inf)
    let weight = importance_weight(|x: f64| (-x.powi(3)).exp(), move |x: f64| {
        2. * normal.density(x)
    });
    move |x: f64| weight(x.abs())
}

#[test]
fn importance_sampling_cube_integral() {
    let mut rng = StdRng::seed_from_u64(42);
    let est = estimate(&mut rng, &StandardNormal, cube_weight(), 10_000);
    assert_eq!(est.len(), 10_000);
    assert_abs_diff_eq!(est.final_mean().unwrap(), CUBE_INTEGRAL, epsilon = 0.01);
}

#[test]
fn estimate_is_reproducible() {
    let first = estimate(
        &mut StdRng::seed_from_u64(8),
        &StandardNormal,
        cube_weight(),
        2000,
    );
    let second = estimate(
        &mut StdRng::seed_from_u64(8),
        &StandardNormal,
        cube_weight(),
        2000,
    );
    assert_eq!(first, second);
}

#[test]
fn two_sd_band_coverage() -> Result<()> {
    let base = Uniform::new(0., 1.)?;
    let settings = MultiRunSettings {
        num_runs: 200,
        num_draws: 1000,
        seed: 42,
        ..Default::default()
    };
    let result = estimate_many(&settings, &base, |x| x * x)?;
    let coverage = result.final_coverage(1. / 3., 2.);
    assert!(coverage > 0.88, "coverage {coverage}");

    // the variance of the running mean shrinks with the sample size
    let variances = result.mean_variances();
    assert!(variances[9] > variances[99]);
    assert!(variances[99] > variances[999]);
    assert_abs_diff_eq!(variances[999], 4. / 45. / 1000., epsilon = 2e-5);
    Ok(())
}

#[test]
fn multi_run_band_contains_truth() -> Result<()> {
    let settings = MultiRunSettings {
        num_runs: 100,
        num_draws: 2000,
        seed: 1,
        ..Default::default()
    };
    let result = estimate_many(&settings, &StandardNormal, cube_weight())?;
    let band = result.band();
    assert!(band.lower[1999] < CUBE_INTEGRAL && CUBE_INTEGRAL < band.upper[1999]);
    assert_abs_diff_eq!(band.median[1999], CUBE_INTEGRAL, epsilon = 0.01);
    Ok(())
}

#[test]
fn expectation_under_rejection_samples() -> Result<()> {
    // E[X^2] for the standard triangle is 7/24
    let sampler = RejectionSampler::new(
        Triangular::standard(),
        UniformProposal::new(0., 1.)?,
        2.,
    )?;
    let mut rng = StdRng::seed_from_u64(42);
    let est = estimate(&mut rng, &sampler, |x| x * x, 10_000);
    assert_abs_diff_eq!(est.final_mean().unwrap(), 7. / 24., epsilon = 0.01);
    assert!(est.final_band_contains(7. / 24., 4.));
    Ok(())
}
