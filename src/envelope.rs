//! Envelope constants for rejection sampling.
//!
//! A rejection sampler needs a constant `M` with `target(x) <= M * proposal(x)`
//! on the whole support. [`find_envelope`] searches for the maximum of the
//! ratio `target / proposal` numerically on a bounded interval. When the
//! proposal has unbounded support the search interval truncates it, and a
//! maximum found on the edge of the interval only bounds the ratio inside
//! that interval. Such envelopes are flagged with [`Envelope::at_boundary`]
//! and logged as a warning; callers that know the supremum analytically
//! should use [`Envelope::exact`] instead.

use crate::{Density, Error, Proposal, Result};

/// Settings for the numerical envelope search.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeSearchSettings {
    /// Number of evenly spaced points of the initial scan, including both
    /// ends of the interval.
    pub grid_points: usize,
    /// Width of the golden-section bracket at which refinement stops.
    pub tolerance: f64,
    /// Maximum number of golden-section iterations.
    pub max_iterations: usize,
    /// Relative margin added to the maximized ratio.
    pub relative_margin: f64,
}

impl Default for EnvelopeSearchSettings {
    fn default() -> Self {
        Self {
            grid_points: 1001,
            tolerance: 1e-10,
            max_iterations: 200,
            relative_margin: 1e-6,
        }
    }
}

/// An envelope constant together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    bound: f64,
    argmax: Option<f64>,
    at_boundary: bool,
}

impl Envelope {
    /// Use a bound that is known analytically.
    pub fn exact(bound: f64) -> Result<Self> {
        if !(bound.is_finite() && bound > 0.) {
            return Err(Error::InvalidEnvelope(bound));
        }
        Ok(Self {
            bound,
            argmax: None,
            at_boundary: false,
        })
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Location of the maximum of the ratio, if the bound was searched for.
    pub fn argmax(&self) -> Option<f64> {
        self.argmax
    }

    /// Whether the maximum was found at an edge of the search interval that
    /// lies strictly inside the proposal support.
    pub fn at_boundary(&self) -> bool {
        self.at_boundary
    }

    /// Expected fraction of accepted proposals, assuming both densities
    /// are normalized.
    pub fn acceptance_rate(&self) -> f64 {
        1. / self.bound
    }
}

fn density_ratio<T: Density, P: Density>(target: &T, proposal: &P, x: f64) -> Result<f64> {
    let p = target.density(x);
    let q = proposal.density(x);
    if p.is_nan() || q.is_nan() {
        return Err(Error::UnboundedRatio { x });
    }
    if p <= 0. {
        return Ok(0.);
    }
    if q <= 0. {
        return Err(Error::SupportMismatch { x });
    }
    let ratio = p / q;
    if !ratio.is_finite() {
        return Err(Error::UnboundedRatio { x });
    }
    Ok(ratio)
}

/// Maximize `f` on `[a, b]` with golden-section search.
///
/// Assumes `f` is unimodal on the bracket.
fn golden_section_max<F>(
    mut f: F,
    mut a: f64,
    mut b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(f64, f64)>
where
    F: FnMut(f64) -> Result<f64>,
{
    let inv_phi = (5f64.sqrt() - 1.) / 2.;
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = f(c)?;
    let mut fd = f(d)?;

    for _ in 0..max_iterations {
        if (b - a).abs() < tolerance {
            break;
        }
        if fc >= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = f(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = f(d)?;
        }
    }

    if fc >= fd {
        Ok((c, fc))
    } else {
        Ok((d, fd))
    }
}

/// Search for the envelope constant of `target` over `proposal` on
/// `[lower, upper]`.
///
/// The ratio is scanned on a grid and the best grid point is refined with
/// golden-section search inside its two neighbouring cells. The returned
/// bound includes `settings.relative_margin`.
///
/// Fails if the target is positive somewhere the proposal density is zero,
/// or if the ratio is not finite.
pub fn find_envelope<T: Density, P: Proposal>(
    target: &T,
    proposal: &P,
    lower: f64,
    upper: f64,
    settings: &EnvelopeSearchSettings,
) -> Result<Envelope> {
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(Error::InvalidParameter(format!(
            "envelope search needs a finite interval, got [{lower}, {upper}]"
        )));
    }
    if settings.grid_points < 3 {
        return Err(Error::InvalidParameter(format!(
            "envelope search needs at least 3 grid points, got {}",
            settings.grid_points
        )));
    }
    if !(settings.tolerance > 0.) {
        return Err(Error::InvalidParameter(format!(
            "envelope search tolerance must be positive, got {}",
            settings.tolerance
        )));
    }

    let last = settings.grid_points - 1;
    let step = (upper - lower) / last as f64;
    let grid_x = |i: usize| {
        if i == last {
            upper
        } else {
            lower + i as f64 * step
        }
    };

    let mut best_idx = 0;
    let mut best_ratio = f64::NEG_INFINITY;
    for i in 0..=last {
        let ratio = density_ratio(target, proposal, grid_x(i))?;
        if ratio > best_ratio {
            best_idx = i;
            best_ratio = ratio;
        }
    }

    let (mut argmax, mut max_ratio) = (grid_x(best_idx), best_ratio);
    let (refined_x, refined_ratio) = golden_section_max(
        |x| density_ratio(target, proposal, x),
        grid_x(best_idx.saturating_sub(1)),
        grid_x((best_idx + 1).min(last)),
        settings.tolerance,
        settings.max_iterations,
    )?;
    if refined_ratio > max_ratio {
        argmax = refined_x;
        max_ratio = refined_ratio;
    }

    if !(max_ratio > 0.) {
        return Err(Error::InvalidParameter(format!(
            "target density is zero everywhere on [{lower}, {upper}]"
        )));
    }

    let support = proposal.support();
    let near_lower = argmax - lower <= step && lower > support.lower;
    let near_upper = upper - argmax <= step && upper < support.upper;
    let at_boundary = near_lower || near_upper;

    let bound = max_ratio * (1. + settings.relative_margin);
    if at_boundary {
        log::warn!(
            "density ratio is maximal at {argmax}, on the edge of the search interval \
             [{lower}, {upper}]; the envelope {bound} may be too small"
        );
    } else {
        log::debug!("envelope {bound} at {argmax} on [{lower}, {upper}]");
    }

    Ok(Envelope {
        bound,
        argmax: Some(argmax),
        at_boundary,
    })
}
