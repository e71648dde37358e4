//! # Heat Transfer and Utility Formulas
//!
//! Condenser and reboiler duties, exchanger areas, utility consumption and
//! reflux drum volume.
//!
//! ## Conventions
//!
//! - Duties are carried in kJ/h (the column balance unit) and converted to W
//!   only for the area equation, where `U` is in W/(m²·K).
//! - Temperature differences are in K (identical to °C differences).
//!
//! ## References
//!
//! - Kern, D.Q., *Process Heat Transfer* (1950), Ch. 5 (LMTD)
//! - Perry's Chemical Engineers' Handbook, 8th ed., Sec. 11

use crate::units::{KjPerHour, Watts};

/// Specific heat of cooling water, kJ/(kg·K)
pub const WATER_CP: f64 = 4.18;

/// Smallest terminal difference the condenser LMTD is allowed to see (K)
pub const MIN_APPROACH_K: f64 = 0.1;

/// Terminal differences closer than this are treated as equal
pub const LMTD_EQUAL_TOLERANCE: f64 = 1e-6;

/// Log-mean temperature difference
///
/// # Formula
/// LMTD = (ΔT1 - ΔT2) / ln(ΔT1/ΔT2)
///
/// Returns ΔT1 when the two differences are within 1e-6 of each other, and
/// `None` when either difference is not positive.
///
/// # Example
/// ```rust
/// use reflux_core::equations::heat_transfer::lmtd;
///
/// let dt = lmtd(40.0, 20.0).unwrap();
/// assert!((dt - 28.8539).abs() < 1e-3);
/// assert_eq!(lmtd(15.0, 15.0), Some(15.0));
/// assert_eq!(lmtd(0.0, 10.0), None);
/// ```
pub fn lmtd(dt1: f64, dt2: f64) -> Option<f64> {
    const E: f64 = 1e-9;
    if dt1 <= E || dt2 <= E {
        return None;
    }
    if (dt1 - dt2).abs() < LMTD_EQUAL_TOLERANCE {
        return Some(dt1);
    }
    Some((dt1 - dt2) / (dt1 / dt2).ln())
}

/// Counter-current condenser LMTD against cooling water
///
/// Terminal differences are `(T_top - CW_out)` and `(T_top - CW_in)`, each
/// floored at 0.1 K.
pub fn condenser_lmtd(t_top_c: f64, cw_in_c: f64, cw_out_c: f64) -> Option<f64> {
    lmtd(
        (t_top_c - cw_out_c).max(MIN_APPROACH_K),
        (t_top_c - cw_in_c).max(MIN_APPROACH_K),
    )
}

/// Reboiler driving force with condensing steam
///
/// The steam side is isothermal, so the driving force is the flat
/// difference `T_sat - T_bottom`, floored at 0.1 K.
#[inline]
pub fn reboiler_delta_t(steam_tsat_c: f64, t_bottom_c: f64) -> f64 {
    (steam_tsat_c - t_bottom_c).max(MIN_APPROACH_K)
}

/// Required exchanger area
///
/// # Formula
/// A = Q / (U·ΔT)
///
/// # Returns
/// Area in m², or `None` when `U` or `ΔT` is not positive
pub fn exchanger_area(duty: KjPerHour, u_w_m2k: f64, delta_t: Option<f64>) -> Option<f64> {
    let dt = delta_t.filter(|dt| *dt > 0.0)?;
    if u_w_m2k <= 0.0 {
        return None;
    }
    let q: Watts = duty.into();
    Some(q.0 / (u_w_m2k * dt))
}

/// Cooling water mass flow (kg/h)
///
/// # Formula
/// ṁ = Q / (Cp·ΔT_rise)
#[inline]
pub fn cooling_water_flow(duty: KjPerHour, rise_k: f64) -> f64 {
    if rise_k > 0.0 {
        duty.0 / (WATER_CP * rise_k)
    } else {
        0.0
    }
}

/// Condensing steam mass flow (kg/h)
///
/// # Formula
/// ṁ = Q / λ_steam
#[inline]
pub fn steam_flow(duty: KjPerHour, latent_kj_kg: f64) -> f64 {
    if latent_kj_kg > 0.0 {
        duty.0 / latent_kj_kg
    } else {
        0.0
    }
}

/// Reflux drum working volume (m³)
///
/// # Formula
/// V = (D·MW_D / ρ_D)·(t_holdup / 60)
#[inline]
pub fn reflux_drum_volume(
    distillate_kmol_h: f64,
    molar_mass: f64,
    density_kg_m3: f64,
    holdup_min: f64,
) -> f64 {
    (distillate_kmol_h * molar_mass / density_kg_m3) * (holdup_min / 60.0)
}
