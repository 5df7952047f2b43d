use crate::Density;

/// Importance weight `integrand(x) / proposal(x)`.
///
/// If `X` is drawn from the normalized density `proposal`, the mean of
/// `weight(X)` estimates the integral of `integrand` over the support of
/// the proposal. Points where the integrand vanishes get weight zero even
/// if the proposal density is zero there as well.
pub fn importance_weight<G, P>(integrand: G, proposal: P) -> impl Fn(f64) -> f64
where
    G: Fn(f64) -> f64,
    P: Density,
{
    move |x| {
        let value = integrand(x);
        if value == 0. {
            0.
        } else {
            value / proposal.density(x)
        }
    }
}
