//! # Column Balance and Hydraulic Formulas
//!
//! Overall mass balance, vapor traffic and shell sizing for a simple
//! two-product column.
//!
//! ## References
//!
//! - McCabe, Smith & Harriott, *Unit Operations of Chemical Engineering*,
//!   7th ed., Ch. 21 (material balances)
//! - Souders, M. & Brown, G.G., Ind. Eng. Chem. 26 (1934) 98
//! - Kister, H.Z., *Distillation Design* (1992), Ch. 6 and 8

use std::f64::consts::PI;

/// Distillate flow from the overall light-key balance (lever rule)
///
/// # Formula
/// D = F·(zF - xB)/(xD - xB)
///
/// Returns 0 when `xD == xB`, where the balance carries no information.
///
/// # Example
/// ```rust
/// use reflux_core::equations::column::lever_rule_distillate;
///
/// let d = lever_rule_distillate(100.0, 0.5, 0.95, 0.05);
/// assert!((d - 50.0).abs() < 1e-12);
/// ```
#[inline]
pub fn lever_rule_distillate(feed: f64, z_f: f64, x_d: f64, x_b: f64) -> f64 {
    if x_d == x_b {
        return 0.0;
    }
    feed * (z_f - x_b) / (x_d - x_b).max(1e-9)
}

/// Bottoms flow closing the overall balance, floored at zero
#[inline]
pub fn bottoms_from_balance(feed: f64, distillate: f64) -> f64 {
    (feed - distillate).max(0.0)
}

/// Overhead vapor traffic with a total condenser
///
/// # Formula
/// V = (R + 1)·D
#[inline]
pub fn overhead_vapor(reflux_ratio: f64, distillate: f64) -> f64 {
    (reflux_ratio + 1.0) * distillate
}

/// Allowable superficial vapor velocity (Souders-Brown)
///
/// # Formula
/// u = K_SB·√((ρL - ρV)/ρV)·f_flood
///
/// The density difference is floored at 1 kg/m³ so an inverted or equal
/// density pair still gives a finite, small capacity.
///
/// # Returns
/// Velocity in m/s
#[inline]
pub fn souders_brown_velocity(k_sb: f64, rho_l: f64, rho_v: f64, flood_fraction: f64) -> f64 {
    k_sb * ((rho_l - rho_v).max(1.0) / rho_v.max(1e-9)).sqrt() * flood_fraction
}

/// Diameter of a circular shell with the given cross-section
///
/// # Formula
/// D = √(4A/π)
#[inline]
pub fn circular_diameter(area_m2: f64) -> f64 {
    if area_m2 > 0.0 {
        (4.0 * area_m2 / PI).sqrt()
    } else {
        0.0
    }
}

/// Real trays from theoretical stages and overall efficiency
///
/// # Formula
/// N_actual = ⌈N_theoretical / E⌉
#[inline]
pub fn actual_trays(theoretical_stages: f64, efficiency: f64) -> u32 {
    (theoretical_stages / efficiency).ceil().max(0.0) as u32
}

/// Packed bed height from theoretical stages
///
/// # Formula
/// H = N·HETP
#[inline]
pub fn packed_height(theoretical_stages: f64, hetp_m: f64) -> f64 {
    theoretical_stages * hetp_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lever_rule_closes_balance() {
        let d = lever_rule_distillate(100.0, 0.4, 0.98, 0.02);
        let b = bottoms_from_balance(100.0, d);
        assert!((d + b - 100.0).abs() < 1e-12);
        // Light key balance also closes
        assert!((d * 0.98 + b * 0.02 - 100.0 * 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_lever_rule_degenerate() {
        assert_eq!(lever_rule_distillate(100.0, 0.5, 0.5, 0.5), 0.0);
    }

    #[test]
    fn test_bottoms_floor() {
        assert_eq!(bottoms_from_balance(100.0, 120.0), 0.0);
    }

    #[test]
    fn test_souders_brown() {
        // K = 0.1, (800-2)/2 = 399 -> sqrt ≈ 19.975
        let u = souders_brown_velocity(0.1, 800.0, 2.0, 1.0);
        assert!((u - 0.1 * 399.0_f64.sqrt()).abs() < 1e-12);
        // Flood fraction scales linearly
        assert!((souders_brown_velocity(0.1, 800.0, 2.0, 0.8) - 0.8 * u).abs() < 1e-12);
    }

    #[test]
    fn test_souders_brown_inverted_densities() {
        let u = souders_brown_velocity(0.1, 1.0, 5.0, 0.8);
        assert!(u.is_finite() && u > 0.0);
    }

    #[test]
    fn test_circular_diameter() {
        assert!((circular_diameter(PI / 4.0) - 1.0).abs() < 1e-12);
        assert_eq!(circular_diameter(0.0), 0.0);
    }

    #[test]
    fn test_actual_trays_rounds_up() {
        assert_eq!(actual_trays(10.0, 0.7), 15); // 14.29 -> 15
        assert_eq!(actual_trays(7.0, 0.7), 10);
    }

    #[test]
    fn test_packed_height() {
        assert!((packed_height(8.5, 0.5) - 4.25).abs() < 1e-12);
    }
}
