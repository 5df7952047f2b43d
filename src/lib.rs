//! Simulation-based statistics on plain `f64` densities.
//!
//! The crate contains a rejection sampler for arbitrary target densities,
//! a running Monte Carlo estimator that tracks the mean and the variance of
//! the mean for every prefix of a sample stream, a multi-run variant that
//! summarises many independent runs by percentile bands, and a
//! nonparametric bootstrap.
//!
//! ```
//! use mcstat_rs::{RejectionSampler, Triangular, UniformProposal};
//! use rand::SeedableRng;
//!
//! let proposal = UniformProposal::new(0., 1.).unwrap();
//! let sampler = RejectionSampler::new(Triangular::standard(), proposal, 2.).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let draws = sampler.sample(&mut rng, 1000);
//! assert_eq!(draws.len(), 1000);
//! assert!(draws.iter().all(|&x| x > 0. && x < 1.));
//! ```

pub(crate) mod bootstrap;
pub(crate) mod density;
pub(crate) mod diagnostics;
pub(crate) mod envelope;
pub(crate) mod error;
pub(crate) mod importance;
pub(crate) mod multi_run;
pub(crate) mod rejection;
pub(crate) mod running;
pub(crate) mod stats;
pub(crate) mod triangular;

pub use bootstrap::{
    bootstrap, bootstrap_ratio_of_means, ratio_of_means, BootstrapEstimate, BootstrapSettings,
};
pub use density::{
    BetaProposal, CustomProposal, Density, ExponentialProposal, NormalProposal, Proposal, Support,
    UniformProposal,
};
pub use diagnostics::{kolmogorov_p_value, ks_statistic, ks_test, KsTest};
pub use envelope::{find_envelope, Envelope, EnvelopeSearchSettings};
pub use error::{Error, Result};
pub use importance::importance_weight;
pub use multi_run::{estimate_many, MultiRunEstimate, MultiRunSettings, QuantileBand};
pub use rejection::{AcceptanceStats, RejectionSampler};
pub use running::{estimate, RunningEstimate};
pub use stats::{mean, quantile, quantile_sorted, sample_variance};
pub use triangular::Triangular;
