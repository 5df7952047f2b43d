use itertools::izip;
use rand::Rng;
use rand_distr::Distribution;

/// Running Monte Carlo estimate over every prefix of a sample stream.
///
/// For values `f_1, ..., f_n` the `k`-th entries are
///
/// ```text
/// mean_k = (f_1 + ... + f_k) / k
/// var_k  = ((f_1^2 + ... + f_k^2) / k - mean_k^2) / k
/// ```
///
/// `var_k` estimates the variance of `mean_k` itself, not of the
/// individual values. Rounding can make it slightly negative, in which
/// case it is set to zero. NaN values propagate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningEstimate {
    means: Vec<f64>,
    variances: Vec<f64>,
}

impl RunningEstimate {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let values = values.into_iter();
        let (capacity, _) = values.size_hint();
        let mut means = Vec::with_capacity(capacity);
        let mut variances = Vec::with_capacity(capacity);

        let mut sum = 0f64;
        let mut sum_sq = 0f64;
        for (i, value) in values.enumerate() {
            let k = (i + 1) as f64;
            sum += value;
            sum_sq += value * value;
            let mean = sum / k;
            let var = (sum_sq / k - mean * mean) / k;
            means.push(mean);
            variances.push(if var < 0. { 0. } else { var });
        }

        Self { means, variances }
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// The estimate using all values.
    pub fn final_mean(&self) -> Option<f64> {
        self.means.last().copied()
    }

    pub fn final_variance(&self) -> Option<f64> {
        self.variances.last().copied()
    }

    /// Standard error `sqrt(var_k)` of every running mean.
    pub fn std_errors(&self) -> impl Iterator<Item = f64> + '_ {
        self.variances.iter().map(|var| var.sqrt())
    }

    /// Pointwise interval `mean_k -/+ width * sqrt(var_k)`.
    pub fn band(&self, width: f64) -> Vec<(f64, f64)> {
        izip!(&self.means, &self.variances)
            .map(|(mean, var)| {
                let half = width * var.sqrt();
                (mean - half, mean + half)
            })
            .collect()
    }

    /// Whether `value` lies inside the final `width` band.
    pub fn final_band_contains(&self, value: f64, width: f64) -> bool {
        match (self.final_mean(), self.final_variance()) {
            (Some(mean), Some(var)) => (value - mean).abs() <= width * var.sqrt(),
            _ => false,
        }
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.means, self.variances)
    }
}

/// Draw `n` values from `base`, apply `transform` and return the running
/// estimate of `E[transform(X)]`.
pub fn estimate<R, D, F>(rng: &mut R, base: &D, mut transform: F, n: usize) -> RunningEstimate
where
    R: Rng + ?Sized,
    D: Distribution<f64> + ?Sized,
    F: FnMut(f64) -> f64,
{
    RunningEstimate::from_values((0..n).map(|_| transform(base.sample(rng))))
}
