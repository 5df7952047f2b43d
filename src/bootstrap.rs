//! Nonparametric bootstrap with percentile intervals.

use rand::Rng;
use rayon::prelude::*;

use crate::{
    multi_run::stream_rng,
    stats::{mean, quantile_sorted, sample_variance},
    Error, Result,
};

#[derive(Debug, Clone, Copy)]
pub struct BootstrapSettings {
    /// Number of resamples drawn with replacement.
    pub num_resamples: usize,
    /// Coverage of the percentile interval.
    pub confidence: f64,
    /// Resample `i` uses stream `i` of a generator seeded with this value.
    pub seed: u64,
    pub parallel: bool,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            num_resamples: 1000,
            confidence: 0.95,
            seed: 0,
            parallel: true,
        }
    }
}

/// The bootstrap distribution of a statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapEstimate {
    observed: f64,
    replicates: Vec<f64>,
    interval: (f64, f64),
}

impl BootstrapEstimate {
    /// The statistic evaluated on the original data.
    pub fn observed(&self) -> f64 {
        self.observed
    }

    /// The statistic evaluated on each resample, in resample order.
    pub fn replicates(&self) -> &[f64] {
        &self.replicates
    }

    /// Standard deviation of the replicates.
    pub fn std_error(&self) -> f64 {
        sample_variance(&self.replicates).sqrt()
    }

    /// Mean of the replicates minus the observed statistic.
    pub fn bias(&self) -> f64 {
        mean(&self.replicates) - self.observed
    }

    /// Percentile confidence interval.
    pub fn interval(&self) -> (f64, f64) {
        self.interval
    }
}

/// Bootstrap a statistic of `num_obs` observations.
///
/// The statistic receives the row indices of a resample, so paired or
/// multi-column data can be resampled jointly. It is evaluated once on
/// `0..num_obs` for the observed value and once per resample.
pub fn bootstrap<S>(
    settings: &BootstrapSettings,
    num_obs: usize,
    statistic: S,
) -> Result<BootstrapEstimate>
where
    S: Fn(&[usize]) -> f64 + Sync,
{
    if num_obs == 0 {
        return Err(Error::EmptySample);
    }
    if settings.num_resamples == 0 {
        return Err(Error::InvalidParameter(
            "bootstrap needs at least one resample".to_string(),
        ));
    }
    if !(settings.confidence > 0. && settings.confidence < 1.) {
        return Err(Error::InvalidParameter(format!(
            "confidence must be in (0, 1), got {}",
            settings.confidence
        )));
    }

    let all_rows: Vec<usize> = (0..num_obs).collect();
    let observed = statistic(&all_rows);

    let replicate = |idx: usize| {
        let mut rng = stream_rng(settings.seed, idx as u64);
        let rows: Vec<usize> = (0..num_obs).map(|_| rng.random_range(0..num_obs)).collect();
        statistic(&rows)
    };
    let replicates: Vec<f64> = if settings.parallel {
        (0..settings.num_resamples)
            .into_par_iter()
            .map(replicate)
            .collect()
    } else {
        (0..settings.num_resamples).map(replicate).collect()
    };

    let mut sorted = replicates.clone();
    sorted.sort_by(f64::total_cmp);
    let alpha = (1. - settings.confidence) / 2.;
    let interval = (
        quantile_sorted(&sorted, alpha),
        quantile_sorted(&sorted, 1. - alpha),
    );

    log::debug!(
        "bootstrap of {num_obs} observations: observed {observed}, interval {interval:?}"
    );

    Ok(BootstrapEstimate {
        observed,
        replicates,
        interval,
    })
}

/// `mean(numerator) / mean(denominator)`.
pub fn ratio_of_means(numerator: &[f64], denominator: &[f64]) -> f64 {
    mean(numerator) / mean(denominator)
}

/// Bootstrap the ratio of means of paired observations.
pub fn bootstrap_ratio_of_means(
    settings: &BootstrapSettings,
    numerator: &[f64],
    denominator: &[f64],
) -> Result<BootstrapEstimate> {
    if numerator.len() != denominator.len() {
        return Err(Error::LengthMismatch {
            left: numerator.len(),
            right: denominator.len(),
        });
    }
    bootstrap(settings, numerator.len(), |rows| {
        let (num, denom) = rows.iter().fold((0., 0.), |(num, denom), &row| {
            (num + numerator[row], denom + denominator[row])
        });
        num / denom
    })
}
