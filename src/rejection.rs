use rand::Rng;
use rand_distr::Distribution;

use crate::{Density, Envelope, Error, Proposal, Result};

/// Counts of proposals drawn and accepted while sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptanceStats {
    pub proposed: u64,
    pub accepted: u64,
}

impl AcceptanceStats {
    pub fn acceptance_rate(&self) -> f64 {
        self.accepted as f64 / self.proposed as f64
    }
}

/// Draw independent samples from `target` by rejection from `proposal`.
///
/// A candidate `x ~ proposal` is accepted with probability
/// `target(x) / (bound * proposal(x))`, so the accepted values follow the
/// (normalized) target density as long as `target(x) <= bound * proposal(x)`
/// everywhere on the support. A bound that is too small is not detected and
/// silently biases the output.
///
/// The sampler implements [`Distribution<f64>`], so `rng.sample_iter(&sampler)`
/// is a lazy stream of accepted values.
///
/// # Termination
///
/// Every method that returns accepted values loops until it has them. If the
/// acceptance probability is zero, for example because the target and the
/// proposal have disjoint supports, those methods never return.
#[derive(Debug, Clone)]
pub struct RejectionSampler<T, P> {
    target: T,
    proposal: P,
    bound: f64,
}

impl<T: Density, P: Proposal> RejectionSampler<T, P> {
    /// Create a sampler with envelope constant `bound`.
    ///
    /// Only checks that the bound is finite and positive.
    pub fn new(target: T, proposal: P, bound: f64) -> Result<Self> {
        if !(bound.is_finite() && bound > 0.) {
            return Err(Error::InvalidEnvelope(bound));
        }
        Ok(Self {
            target,
            proposal,
            bound,
        })
    }

    pub fn with_envelope(target: T, proposal: P, envelope: &Envelope) -> Self {
        Self {
            target,
            proposal,
            bound: envelope.bound(),
        }
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn proposal(&self) -> &P {
        &self.proposal
    }

    /// The acceptance test for a candidate and an independent uniform draw.
    #[inline]
    pub fn accepts(&self, candidate: f64, uniform: f64) -> bool {
        uniform * self.bound * self.proposal.density(candidate) < self.target.density(candidate)
    }

    /// Draw one candidate and one uniform, and return the candidate if it
    /// was accepted.
    pub fn try_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        let candidate = self.proposal.draw(rng);
        let uniform: f64 = rng.random();
        self.accepts(candidate, uniform).then_some(candidate)
    }

    /// Draw until one candidate is accepted.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        loop {
            if let Some(value) = self.try_draw(rng) {
                return value;
            }
        }
    }

    /// Return `n` accepted samples.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        std::iter::repeat_with(|| self.draw(rng)).take(n).collect()
    }

    /// Like [`RejectionSampler::sample`], but also count the proposals.
    ///
    /// For the same rng state the samples are identical to those of `sample`.
    pub fn sample_with_stats<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> (Vec<f64>, AcceptanceStats) {
        let mut stats = AcceptanceStats::default();
        let samples: Vec<f64> = std::iter::repeat_with(|| {
            stats.proposed += 1;
            self.try_draw(rng)
        })
        .flatten()
        .take(n)
        .collect();
        stats.accepted = samples.len() as u64;
        (samples, stats)
    }

    /// An endless iterator over accepted samples.
    pub fn iter<'a, R: Rng + 'a>(&'a self, mut rng: R) -> impl Iterator<Item = f64> + 'a {
        std::iter::repeat_with(move || self.draw(&mut rng))
    }
}

impl<T: Density, P: Proposal> Distribution<f64> for RejectionSampler<T, P> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BetaProposal, Triangular, UniformProposal};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn uniform_sampler() -> RejectionSampler<Triangular, UniformProposal> {
        let proposal = UniformProposal::new(0., 1.).unwrap();
        RejectionSampler::new(Triangular::standard(), proposal, 2.).unwrap()
    }

    #[test]
    fn rejects_invalid_bound() {
        for bound in [0., -1., f64::NAN, f64::INFINITY] {
            let proposal = UniformProposal::new(0., 1.).unwrap();
            let err = RejectionSampler::new(Triangular::standard(), proposal, bound).unwrap_err();
            assert!(matches!(err, Error::InvalidEnvelope(_)));
        }
    }

    #[test]
    fn acceptance_rule() {
        let sampler = uniform_sampler();
        // target(0.5) = 2 = bound * proposal(0.5)
        assert!(sampler.accepts(0.5, 0.999));
        assert!(!sampler.accepts(0.25, 0.5));
        assert!(sampler.accepts(0.25, 0.49));
        assert!(!sampler.accepts(0., 0.));
    }

    #[test]
    fn empty_sample() {
        let sampler = uniform_sampler();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sampler.sample(&mut rng, 0).is_empty());
        let (samples, stats) = sampler.sample_with_stats(&mut rng, 0);
        assert!(samples.is_empty());
        assert_eq!(stats, AcceptanceStats::default());
    }

    #[test]
    fn deterministic() {
        let sampler = uniform_sampler();
        let mut rng = StdRng::seed_from_u64(42);
        let first = sampler.sample(&mut rng, 500);

        let mut rng = StdRng::seed_from_u64(42);
        let second = sampler.sample(&mut rng, 500);
        assert_eq!(first, second);

        let mut rng = StdRng::seed_from_u64(42);
        let (third, stats) = sampler.sample_with_stats(&mut rng, 500);
        assert_eq!(first, third);
        assert_eq!(stats.accepted, 500);
        assert!(stats.proposed >= 500);

        let rng = StdRng::seed_from_u64(42);
        let lazy: Vec<f64> = sampler.iter(rng).take(500).collect();
        assert_eq!(first, lazy);

        let rng = StdRng::seed_from_u64(42);
        let streamed: Vec<f64> = rng.sample_iter(&sampler).take(500).collect();
        assert_eq!(first, streamed);
    }

    #[test]
    fn beta_proposal_accepts_more() {
        let beta = BetaProposal::new(2., 2.).unwrap();
        let sampler = RejectionSampler::new(Triangular::standard(), beta, 4. / 3.).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let (_, beta_stats) = sampler.sample_with_stats(&mut rng, 5000);

        let (_, uniform_stats) = uniform_sampler().sample_with_stats(&mut rng, 5000);
        assert!(beta_stats.acceptance_rate() > uniform_stats.acceptance_rate());
    }

    proptest! {
        #[test]
        fn check_sample_size_and_support(n in 0usize..300, seed in any::<u64>()) {
            let sampler = uniform_sampler();
            let mut rng = StdRng::seed_from_u64(seed);
            let samples = sampler.sample(&mut rng, n);
            prop_assert_eq!(samples.len(), n);
            prop_assert!(samples.iter().all(|&x| x > 0. && x < 1.));
        }
    }
}
