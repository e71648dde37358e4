//! # Fenske-Underwood-Gilliland Shortcut Formulas
//!
//! Classic shortcut design of a binary column:
//!
//! 1. **Fenske** - minimum theoretical stages at total reflux
//! 2. **Underwood** - characteristic root θ, then minimum reflux
//! 3. **Gilliland** - actual theoretical stages at a chosen reflux
//!
//! Functions that can fail to produce a physical answer return `Option`;
//! `None` means "unavailable" and is propagated by the caller rather than
//! turned into NaN.
//!
//! ## Notation
//!
//! - `α` = relative volatility of light key to heavy key
//! - `xD`, `xB`, `zF` = light-key mole fractions in distillate, bottoms, feed
//! - `q` = feed quality (liquid fraction)
//! - `R`, `Rmin` = reflux ratio and its minimum
//!
//! ## References
//!
//! - Fenske, M.R., Ind. Eng. Chem. 24 (1932) 482
//! - Underwood, A.J.V., Chem. Eng. Prog. 44 (1948) 603
//! - Gilliland, E.R., Ind. Eng. Chem. 32 (1940) 1220; Molokanov et al. fit

/// Relative volatility floor; keeps `ln(α)` and `α - θ` away from zero
pub const MIN_RELATIVE_VOLATILITY: f64 = 1.001;

/// Product purities are held this far inside (0, 1) in the Fenske ratio
pub const PURITY_GUARD: f64 = 1e-9;

/// Underwood bracket, exclusive of the poles at 0 and 1
pub const UNDERWOOD_THETA_LO: f64 = 1e-6;
pub const UNDERWOOD_THETA_HI: f64 = 1.0 - 1e-6;

/// Underwood bisection limits
pub const UNDERWOOD_MAX_ITERATIONS: usize = 100;
pub const UNDERWOOD_TOLERANCE: f64 = 1e-10;

/// Denominator floor used throughout the shortcut formulas
const TINY: f64 = 1e-9;

/// Minimum theoretical stages at total reflux (Fenske)
///
/// # Formula
/// Nmin = ln[(xD/(1-xD))·((1-xB)/xB)] / ln(α)
///
/// `α` is floored at 1.001 and the result at 0. `xD` and `xB` are held
/// within [`PURITY_GUARD`] of 0 and 1, so a pure product reports a large
/// finite Nmin (about 45 at α = 2.5, xD = 1, xB = 0) rather than +∞,
/// which JSON cannot carry.
///
/// # Example
/// ```rust
/// use reflux_core::equations::fug::fenske_min_stages;
///
/// let n_min = fenske_min_stages(2.5, 0.95, 0.05);
/// assert!((n_min - 6.427).abs() < 0.001);
/// ```
pub fn fenske_min_stages(alpha: f64, x_d: f64, x_b: f64) -> f64 {
    let alpha = alpha.max(MIN_RELATIVE_VOLATILITY);
    let x_d = x_d.clamp(PURITY_GUARD, 1.0 - PURITY_GUARD);
    let x_b = x_b.clamp(PURITY_GUARD, 1.0 - PURITY_GUARD);

    let separation = (x_d / (1.0 - x_d)) * ((1.0 - x_b) / x_b);
    (separation.ln() / alpha.ln().max(TINY)).max(0.0)
}

/// Underwood characteristic function
///
/// # Formula
/// f(θ) = q·(zF/(α-θ) + (1-zF)/(1-θ)) - 1
#[inline]
pub fn underwood_function(theta: f64, alpha: f64, z_f: f64, q: f64) -> f64 {
    q * (z_f / (alpha - theta) + (1.0 - z_f) / (1.0 - theta)) - 1.0
}

/// Underwood root θ in (0, 1)
///
/// Bisection on [1e-6, 1 - 1e-6], at most 100 halvings, returning early
/// once |f| < 1e-10.
///
/// # Returns
/// `None` when f has the same sign at both ends of the bracket. Some
/// combinations of α, q and zF have no root there; that is an ill-posed
/// specification, reported rather than papered over.
///
/// # Example
/// ```rust
/// use reflux_core::equations::fug::underwood_theta;
///
/// assert!(underwood_theta(2.5, 0.5, 1.0).is_some());
/// // Pure light-key feed: f < 0 across the whole bracket
/// assert!(underwood_theta(2.5, 1.0, 1.0).is_none());
/// ```
pub fn underwood_theta(alpha: f64, z_f: f64, q: f64) -> Option<f64> {
    let alpha = alpha.max(MIN_RELATIVE_VOLATILITY);
    let z_f = z_f.clamp(0.0, 1.0);
    let q = q.clamp(0.0, 1.2);
    let f = |theta: f64| underwood_function(theta, alpha, z_f, q);

    let mut lo = UNDERWOOD_THETA_LO;
    let mut hi = UNDERWOOD_THETA_HI;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return None;
    }

    for _ in 0..UNDERWOOD_MAX_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if f_mid.abs() < UNDERWOOD_TOLERANCE {
            return Some(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Some(0.5 * (lo + hi))
}

/// Minimum reflux ratio (Underwood)
///
/// # Formula
/// Rmin = xD·α/(α-θ) + (1-xD)/(1-θ) - 1
///
/// # Returns
/// `None` if θ is unavailable, or the result is non-positive or non-finite.
pub fn underwood_min_reflux(alpha: f64, x_d: f64, theta: Option<f64>) -> Option<f64> {
    let theta = theta.filter(|t| t.is_finite())?;
    let alpha = alpha.max(MIN_RELATIVE_VOLATILITY);
    let x_d = x_d.clamp(0.0, 1.0);

    let light_term = (x_d * alpha) / (alpha - theta).max(TINY);
    let heavy_term = (1.0 - x_d) / (1.0 - theta).max(TINY);
    let r_min = light_term + heavy_term - 1.0;

    (r_min > 0.0 && r_min.is_finite()).then_some(r_min)
}

/// Actual theoretical stages at reflux `R` (Gilliland, Molokanov form)
///
/// # Formula
/// Y = (R - Rmin)/(R + 1)
///
/// X = 1 - exp[((1 + 54.4Y)/(11 + 117.2Y))·(Y - 1)]
///
/// N = max((Nmin + X)/(1 - X), Nmin)
///
/// # Returns
/// `None` if `Rmin` is unavailable or `R` is zero.
///
/// # Example
/// ```rust
/// use reflux_core::equations::fug::gilliland_stages;
///
/// let n = gilliland_stages(6.43, 0.235, Some(0.181)).unwrap();
/// assert!(n >= 6.43);
/// assert!(gilliland_stages(6.43, 0.235, None).is_none());
/// ```
pub fn gilliland_stages(n_min: f64, reflux: f64, r_min: Option<f64>) -> Option<f64> {
    let r_min = r_min?;
    if reflux == 0.0 || !reflux.is_finite() {
        return None;
    }
    let n_min = n_min.max(0.0);

    let y = (reflux - r_min) / (reflux + 1.0).max(TINY);
    let x = 1.0 - (((1.0 + 54.4 * y) / (11.0 + 117.2 * y)) * (y - 1.0)).exp();
    Some(((n_min + x) / (1.0 - x).max(TINY)).max(n_min))
}
