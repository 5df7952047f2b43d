use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;
use rayon::prelude::*;

use crate::{estimate, stats::quantile_sorted, Error, Result, RunningEstimate};

/// Settings for repeated independent running estimates.
#[derive(Debug, Clone, Copy)]
pub struct MultiRunSettings {
    /// Number of independent runs.
    pub num_runs: usize,
    /// Number of draws in each run.
    pub num_draws: usize,
    /// Each run uses its own stream of a generator seeded with this value.
    pub seed: u64,
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    /// Execute the runs on the rayon thread pool. The output does not
    /// depend on this.
    pub parallel: bool,
}

impl Default for MultiRunSettings {
    fn default() -> Self {
        Self {
            num_runs: 200,
            num_draws: 1000,
            seed: 0,
            lower_quantile: 0.025,
            upper_quantile: 0.975,
            parallel: true,
        }
    }
}

/// Pointwise quantiles of the running means across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantileBand {
    pub lower: Vec<f64>,
    pub median: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiRunEstimate {
    runs: Vec<RunningEstimate>,
    band: QuantileBand,
}

impl MultiRunEstimate {
    pub fn runs(&self) -> &[RunningEstimate] {
        &self.runs
    }

    pub fn band(&self) -> &QuantileBand {
        &self.band
    }

    /// Fraction of runs whose final `width` band contains `value`.
    pub fn final_coverage(&self, value: f64, width: f64) -> f64 {
        let hits = self
            .runs
            .iter()
            .filter(|run| run.final_band_contains(value, width))
            .count();
        hits as f64 / self.runs.len() as f64
    }

    /// Average of `var_k` across runs for every `k`.
    pub fn mean_variances(&self) -> Vec<f64> {
        let num_draws = self.runs.first().map_or(0, |run| run.len());
        (0..num_draws)
            .map(|k| {
                self.runs.iter().map(|run| run.variances()[k]).sum::<f64>() / self.runs.len() as f64
            })
            .collect()
    }
}

/// A generator for one of several independent streams derived from `seed`.
pub(crate) fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Repeat [`estimate`] `settings.num_runs` times with independent random
/// streams and summarise the running means by pointwise quantiles.
///
/// Run `i` draws from stream `i` of a `ChaCha8Rng` seeded with
/// `settings.seed`, so the result is the same whether or not the runs
/// execute in parallel.
pub fn estimate_many<D, F>(
    settings: &MultiRunSettings,
    base: &D,
    transform: F,
) -> Result<MultiRunEstimate>
where
    D: Distribution<f64> + Sync + ?Sized,
    F: Fn(f64) -> f64 + Sync,
{
    if settings.num_runs == 0 {
        return Err(Error::InvalidParameter(
            "multi-run estimate needs at least one run".to_string(),
        ));
    }
    let quantiles_valid = (0. ..=1.).contains(&settings.lower_quantile)
        && (0. ..=1.).contains(&settings.upper_quantile)
        && settings.lower_quantile <= settings.upper_quantile;
    if !quantiles_valid {
        return Err(Error::InvalidParameter(format!(
            "quantiles must satisfy 0 <= lower <= upper <= 1, got {} and {}",
            settings.lower_quantile, settings.upper_quantile
        )));
    }

    log::debug!(
        "running {} independent estimates with {} draws each",
        settings.num_runs,
        settings.num_draws
    );

    let run = |idx: usize| {
        let mut rng = stream_rng(settings.seed, idx as u64);
        estimate(&mut rng, base, &transform, settings.num_draws)
    };
    let runs: Vec<RunningEstimate> = if settings.parallel {
        (0..settings.num_runs).into_par_iter().map(run).collect()
    } else {
        (0..settings.num_runs).map(run).collect()
    };

    let band = quantile_band(&runs, settings);
    Ok(MultiRunEstimate { runs, band })
}

fn quantile_band(runs: &[RunningEstimate], settings: &MultiRunSettings) -> QuantileBand {
    let mut band = QuantileBand::default();
    let mut column = Vec::with_capacity(runs.len());
    for k in 0..settings.num_draws {
        column.clear();
        column.extend(runs.iter().map(|run| run.means()[k]));
        column.sort_by(f64::total_cmp);
        band.lower.push(quantile_sorted(&column, settings.lower_quantile));
        band.median.push(quantile_sorted(&column, 0.5));
        band.upper.push(quantile_sorted(&column, settings.upper_quantile));
    }
    band
}

impl QuantileBand {
    pub fn len(&self) -> usize {
        self.median.len()
    }

    pub fn is_empty(&self) -> bool {
        self.median.is_empty()
    }

    /// Width `upper - lower` at every sample size.
    pub fn widths(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip_eq(&self.upper)
            .map(|(lo, hi)| hi - lo)
            .collect_vec()
    }
}
