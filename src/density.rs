use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, Normal, Uniform};

use crate::{Error, Result};

/// A non-negative function on the real line.
///
/// The density does not need to be normalized, and may be zero outside
/// its support. Any `Fn(f64) -> f64` closure is a density.
pub trait Density {
    fn density(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Density for F {
    fn density(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A distribution we can draw from and whose density we can evaluate.
///
/// Used as the proposal of a rejection sampler. Its support must cover
/// the support of the target density.
pub trait Proposal: Density {
    /// Draw one value from the distribution.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// The open interval outside of which the density is zero.
    fn support(&self) -> Support;
}

/// An open interval `(lower, upper)`. Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub lower: f64,
    pub upper: f64,
}

impl Support {
    pub const REAL: Support = Support {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    pub const POSITIVE: Support = Support {
        lower: 0.,
        upper: f64::INFINITY,
    };

    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        // Also rejects NaN bounds
        if !(lower < upper) {
            return Err(Error::InvalidParameter(format!(
                "support needs lower < upper, got ({lower}, {upper})"
            )));
        }
        Ok(Support { lower, upper })
    }

    pub fn contains(&self, x: f64) -> bool {
        x > self.lower && x < self.upper
    }

    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

/// Continuous uniform proposal on `[low, high)`.
#[derive(Debug, Clone)]
pub struct UniformProposal {
    low: f64,
    high: f64,
    dist: Uniform<f64>,
}

impl UniformProposal {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "uniform bounds must be finite, got ({low}, {high})"
            )));
        }
        let dist = Uniform::new(low, high)
            .map_err(|err| Error::InvalidParameter(format!("uniform({low}, {high}): {err}")))?;
        Ok(Self { low, high, dist })
    }
}

impl Density for UniformProposal {
    fn density(&self, x: f64) -> f64 {
        if x >= self.low && x <= self.high {
            1. / (self.high - self.low)
        } else {
            0.
        }
    }
}

impl Proposal for UniformProposal {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng)
    }

    fn support(&self) -> Support {
        Support {
            lower: self.low,
            upper: self.high,
        }
    }
}

/// Beta proposal on `(0, 1)`.
#[derive(Debug, Clone)]
pub struct BetaProposal {
    alpha: f64,
    beta: f64,
    log_norm: f64,
    dist: Beta<f64>,
}

impl BetaProposal {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        let dist = Beta::new(alpha, beta)
            .map_err(|err| Error::InvalidParameter(format!("beta({alpha}, {beta}): {err}")))?;
        let log_norm = libm::lgamma(alpha + beta) - libm::lgamma(alpha) - libm::lgamma(beta);
        Ok(Self {
            alpha,
            beta,
            log_norm,
            dist,
        })
    }
}

impl Density for BetaProposal {
    fn density(&self, x: f64) -> f64 {
        if !(0. ..=1.).contains(&x) {
            return 0.;
        }
        // powf keeps 0^0 = 1 at the edges for alpha or beta equal to one
        x.powf(self.alpha - 1.) * (1. - x).powf(self.beta - 1.) * self.log_norm.exp()
    }
}

impl Proposal for BetaProposal {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng)
    }

    fn support(&self) -> Support {
        Support {
            lower: 0.,
            upper: 1.,
        }
    }
}

/// Normal proposal on the whole real line.
#[derive(Debug, Clone)]
pub struct NormalProposal {
    mean: f64,
    std_dev: f64,
    dist: Normal<f64>,
}

impl NormalProposal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !(std_dev > 0.) {
            return Err(Error::InvalidParameter(format!(
                "normal standard deviation must be positive, got {std_dev}"
            )));
        }
        let dist = Normal::new(mean, std_dev)
            .map_err(|err| Error::InvalidParameter(format!("normal({mean}, {std_dev}): {err}")))?;
        Ok(Self {
            mean,
            std_dev,
            dist,
        })
    }

    pub fn standard() -> Self {
        Self {
            mean: 0.,
            std_dev: 1.,
            dist: Normal::new(0., 1.).expect("Standard normal parameters are valid"),
        }
    }

    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        0.5 * (1. + libm::erf(z / 2f64.sqrt()))
    }
}

impl Density for NormalProposal {
    fn density(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * TAU.sqrt())
    }
}

impl Proposal for NormalProposal {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng)
    }

    fn support(&self) -> Support {
        Support::REAL
    }
}

/// Exponential proposal with the given rate on `(0, inf)`.
#[derive(Debug, Clone)]
pub struct ExponentialProposal {
    rate: f64,
    dist: Exp<f64>,
}

impl ExponentialProposal {
    pub fn new(rate: f64) -> Result<Self> {
        if !(rate > 0. && rate.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "exponential rate must be finite and positive, got {rate}"
            )));
        }
        let dist = Exp::new(rate)
            .map_err(|err| Error::InvalidParameter(format!("exponential({rate}): {err}")))?;
        Ok(Self { rate, dist })
    }
}

impl Density for ExponentialProposal {
    fn density(&self, x: f64) -> f64 {
        if x < 0. {
            0.
        } else {
            self.rate * (-self.rate * x).exp()
        }
    }
}

impl Proposal for ExponentialProposal {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng)
    }

    fn support(&self) -> Support {
        Support::POSITIVE
    }
}

/// A proposal assembled from a sampler and a separate density function.
///
/// The two must describe the same distribution; this is not checked.
#[derive(Debug, Clone)]
pub struct CustomProposal<S, D> {
    sampler: S,
    density: D,
    support: Support,
}

impl<S, D> CustomProposal<S, D>
where
    S: Distribution<f64>,
    D: Density,
{
    pub fn new(sampler: S, density: D, support: Support) -> Self {
        Self {
            sampler,
            density,
            support,
        }
    }
}

impl<S, D: Density> Density for CustomProposal<S, D> {
    fn density(&self, x: f64) -> f64 {
        self.density.density(x)
    }
}

impl<S: Distribution<f64>, D: Density> Proposal for CustomProposal<S, D> {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sampler.sample(rng)
    }

    fn support(&self) -> Support {
        self.support
    }
}
