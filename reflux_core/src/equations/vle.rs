//! # Vapor-Liquid Equilibrium Formulas
//!
//! Saturation temperatures and phase densities at the column ends for an
//! ideal binary (Raoult's law with Antoine vapor pressures, ideal-gas vapor).
//!
//! ## Notation
//!
//! - `x` = light-key mole fraction in the liquid
//! - `Psat_i(T)` = pure-component vapor pressure (mmHg), `T` in °C
//! - `P` = column pressure at the point of interest
//!
//! ## References
//!
//! - Antoine, C. (1888), vapor pressure correlation
//! - Smith, Van Ness & Abbott, *Introduction to Chemical Engineering
//!   Thermodynamics*, 7th ed., Ch. 10 (Raoult's law)

use crate::properties::AntoineCoefficients;
use crate::units::{Celsius, Kelvin, Kpa, MmHg, Pa};

/// Universal gas constant, J/(mol·K)
pub const GAS_CONSTANT: f64 = 8.314;

/// Lower end of the saturation-temperature search bracket (°C)
pub const SATURATION_T_MIN_C: f64 = -10.0;

/// Upper end of the saturation-temperature search bracket (°C)
pub const SATURATION_T_MAX_C: f64 = 200.0;

/// Fixed bisection count. Halving a 210 K bracket 70 times leaves a width
/// far below f64 resolution, so no tolerance test is needed.
pub const SATURATION_BISECTION_STEPS: usize = 70;

/// Pure-component vapor pressure from the Antoine equation
///
/// # Formula
/// log10(Psat) = A - B / (T + C)
///
/// # Example
/// ```rust
/// use reflux_core::equations::vle::antoine_vapor_pressure;
/// use reflux_core::properties::AntoineCoefficients;
/// use reflux_core::units::Celsius;
///
/// // Benzene boils near 80.1 °C at 760 mmHg
/// let benzene = AntoineCoefficients { a: 6.90565, b: 1211.033, c: 220.79 };
/// let p = antoine_vapor_pressure(&benzene, Celsius(80.1));
/// assert!((p.0 - 760.0).abs() < 5.0);
/// ```
#[inline]
pub fn antoine_vapor_pressure(coeffs: &AntoineCoefficients, t: Celsius) -> MmHg {
    MmHg(10f64.powf(coeffs.a - coeffs.b / (t.0 + coeffs.c)))
}

/// Total vapor pressure of an ideal binary liquid (Raoult's law)
///
/// # Formula
/// P = x·Psat_LK(T) + (1 - x)·Psat_HK(T)
#[inline]
pub fn raoult_total_pressure(
    x: f64,
    light: &AntoineCoefficients,
    heavy: &AntoineCoefficients,
    t: Celsius,
) -> MmHg {
    MmHg(x * antoine_vapor_pressure(light, t).0 + (1.0 - x) * antoine_vapor_pressure(heavy, t).0)
}

/// Saturation temperature of a binary liquid at a given pressure
///
/// Solves `x·Psat_LK(T) + (1 - x)·Psat_HK(T) = P` for `T` by bisection on
/// [-10, 200] °C. Both vapor pressures rise monotonically with `T`, so the
/// weighted sum does too and bisection needs no derivative.
///
/// A target outside the bracket converges onto the nearer bracket end.
///
/// # Example
/// ```rust
/// use reflux_core::equations::vle::saturation_temperature;
/// use reflux_core::properties::AntoineCoefficients;
/// use reflux_core::units::Kpa;
///
/// let benzene = AntoineCoefficients { a: 6.90565, b: 1211.033, c: 220.79 };
/// let toluene = AntoineCoefficients { a: 6.95464, b: 1344.80, c: 219.48 };
///
/// // Pure benzene at 1 atm
/// let t = saturation_temperature(1.0, &benzene, &toluene, Kpa(101.325));
/// assert!((t.0 - 80.1).abs() < 0.2);
/// ```
pub fn saturation_temperature(
    x: f64,
    light: &AntoineCoefficients,
    heavy: &AntoineCoefficients,
    pressure: Kpa,
) -> Celsius {
    let target: MmHg = pressure.into();
    let mut lo = SATURATION_T_MIN_C;
    let mut hi = SATURATION_T_MAX_C;

    for _ in 0..SATURATION_BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if raoult_total_pressure(x, light, heavy, Celsius(mid)).0 > target.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    Celsius(0.5 * (lo + hi))
}

/// Ideal-gas vapor density
///
/// # Formula
/// ρV = P·MW / (R·T)
///
/// # Arguments
/// * `pressure` - Absolute pressure
/// * `molar_mass` - Vapor molar mass (g/mol)
/// * `t` - Temperature
///
/// # Returns
/// Density in kg/m³
#[inline]
pub fn ideal_gas_density(pressure: Kpa, molar_mass: f64, t: Celsius) -> f64 {
    let p: Pa = pressure.into();
    let t_k: Kelvin = t.into();
    p.0 * (molar_mass / 1000.0) / (GAS_CONSTANT * t_k.0)
}

/// Ideal-gas volumetric flow from a molar flow
///
/// # Formula
/// V̇ = ṅ·R·T / P, with ṅ converted from kmol/h to mol/s
///
/// # Returns
/// Volumetric flow in m³/s
#[inline]
pub fn ideal_gas_volumetric_flow(molar_flow_kmol_h: f64, pressure: Kpa, t: Celsius) -> f64 {
    let n_mol_s = molar_flow_kmol_h * 1000.0 / 3600.0;
    let p: Pa = pressure.into();
    let t_k: Kelvin = t.into();
    n_mol_s * (GAS_CONSTANT * t_k.0) / p.0
}

/// Mole-fraction-weighted liquid density of a binary (kg/m³)
#[inline]
pub fn mixture_liquid_density(x: f64, light_density: f64, heavy_density: f64) -> f64 {
    x * light_density + (1.0 - x) * heavy_density
}

#[cfg(test)]
mod tests {
    use super::*;

    const BENZENE: AntoineCoefficients = AntoineCoefficients { a: 6.90565, b: 1211.033, c: 220.79 };
    const TOLUENE: AntoineCoefficients = AntoineCoefficients { a: 6.95464, b: 1344.80, c: 219.48 };

    #[test]
    fn test_pure_component_boiling_points() {
        let tb = saturation_temperature(1.0, &BENZENE, &TOLUENE, Kpa(101.325));
        assert!((tb.0 - 80.1).abs() < 0.2, "benzene Tb = {}", tb.0);

        let tt = saturation_temperature(0.0, &BENZENE, &TOLUENE, Kpa(101.325));
        assert!((tt.0 - 110.6).abs() < 0.3, "toluene Tb = {}", tt.0);
    }

    #[test]
    fn test_saturation_temperature_satisfies_raoult() {
        let p = Kpa(120.0);
        let t = saturation_temperature(0.3, &BENZENE, &TOLUENE, p);
        let p_calc: Kpa = raoult_total_pressure(0.3, &BENZENE, &TOLUENE, t).into();
        assert!((p_calc.0 - p.0).abs() < 1e-6);
    }

    #[test]
    fn test_mixture_boils_between_pure_components() {
        let t = saturation_temperature(0.5, &BENZENE, &TOLUENE, Kpa(101.325));
        assert!(t.0 > 80.1 && t.0 < 110.6);
    }

    #[test]
    fn test_higher_pressure_raises_temperature() {
        let t_low = saturation_temperature(0.5, &BENZENE, &TOLUENE, Kpa(101.0));
        let t_high = saturation_temperature(0.5, &BENZENE, &TOLUENE, Kpa(150.0));
        assert!(t_high.0 > t_low.0);
    }

    #[test]
    fn test_unreachable_pressure_pins_to_bracket() {
        let t = saturation_temperature(0.5, &BENZENE, &TOLUENE, Kpa(1.0e6));
        assert!((t.0 - SATURATION_T_MAX_C).abs() < 1e-9);
    }

    #[test]
    fn test_ideal_gas_density() {
        // Air-like gas: 101.325 kPa, 28.96 g/mol, 0 °C -> ~1.292 kg/m³
        let rho = ideal_gas_density(Kpa(101.325), 28.96, Celsius(0.0));
        assert!((rho - 1.292).abs() < 0.002);
    }

    #[test]
    fn test_ideal_gas_volumetric_flow() {
        // 1 kmol/h at 0 °C, 1 atm is ~22.4 m³/h
        let q = ideal_gas_volumetric_flow(1.0, Kpa(101.325), Celsius(0.0));
        assert!((q * 3600.0 - 22.41).abs() < 0.02);
    }

    #[test]
    fn test_mixture_liquid_density() {
        assert_eq!(mixture_liquid_density(0.5, 800.0, 900.0), 850.0);
        assert_eq!(mixture_liquid_density(1.0, 800.0, 900.0), 800.0);
    }
}
