//! # Preliminary PSV Sizing
//!
//! Fire-case relief of the column or its drum per API 521 heat input and
//! API 520 Part I orifice flux, with an API 526 orifice suggestion.
//!
//! This is a screening calculation: single relief case, ideal-gas vapor or
//! non-viscous liquid, no two-phase or viscosity correction.
//!
//! ## Example
//!
//! ```rust
//! use reflux_core::calculations::psv::{calculate, PsvInput};
//!
//! let result = calculate(&PsvInput::default());
//! assert_eq!(result.orifice.letter, 'D');
//! println!("Required area: {:.4} in²", result.area_in2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::distillation::DesignResult;
use crate::equations::relief::{fire_heat_input, liquid_mass_flux, select_orifice, vapor_mass_flux, Orifice};
use crate::equations::Equation;
use crate::units::{SqIn, SqM};

/// Absolute pressure added to a gauge set pressure (kPa)
pub const GAUGE_OFFSET_KPA: f64 = 101.0;

/// Lower bound on the orifice mass flux (kg/(m²·s))
pub const MIN_MASS_FLUX: f64 = 1e-12;

/// Phase flowing through the valve at relieving conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliefCase {
    #[default]
    Vapor,
    Liquid,
}

/// Relief sizing input. Omitted JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsvInput {
    /// Wetted area exposed to fire (m²)
    pub wetted_area_m2: f64,
    /// Environment factor: 1.0 bare, about 0.15 insulated, 0.082 water spray
    pub env_factor: f64,
    /// Latent heat at relieving conditions (kJ/kg)
    pub latent_heat_kj_kg: f64,
    pub case: ReliefCase,
    /// Vapor molar mass (kg/kmol)
    pub molar_mass: f64,
    /// Specific heat ratio Cp/Cv
    pub k: f64,
    pub compressibility: f64,
    pub relieving_temp_k: f64,
    pub set_pressure_kpag: f64,
    pub overpressure_pct: f64,
    pub back_pressure_kpa: f64,
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
    /// Liquid density for the liquid case (kg/m³)
    pub liquid_density: f64,
}

impl Default for PsvInput {
    fn default() -> Self {
        PsvInput {
            wetted_area_m2: 20.0,
            env_factor: 1.0,
            latent_heat_kj_kg: 350.0,
            case: ReliefCase::Vapor,
            molar_mass: 80.0,
            k: 1.30,
            compressibility: 1.0,
            relieving_temp_k: 400.0,
            set_pressure_kpag: 600.0,
            overpressure_pct: 21.0,
            back_pressure_kpa: GAUGE_OFFSET_KPA,
            kd: 0.975,
            kb: 1.0,
            kc: 1.0,
            liquid_density: 650.0,
        }
    }
}

impl PsvInput {
    /// Seed the relieving temperature from a column design's top temperature.
    pub fn with_column_top(mut self, design: &DesignResult) -> Self {
        self.relieving_temp_k = design.top_temperature_k();
        self
    }

    pub fn with_case(mut self, case: ReliefCase) -> Self {
        self.case = case;
        self
    }
}

/// Relief sizing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsvResult {
    /// Fire heat input (W)
    pub heat_input_w: f64,
    /// Required relief rate (kg/s)
    pub mass_rate_kg_s: f64,
    /// Relieving pressure, absolute (kPa)
    pub relieving_pressure_kpa: f64,
    /// Orifice mass flux (kg/(m²·s))
    pub mass_flux: f64,
    pub area_m2: f64,
    pub area_in2: f64,
    /// Suggested API 526 orifice
    pub orifice: Orifice,
    /// Requirement exceeds the largest standard orifice
    pub exceeds_largest: bool,
    pub equations_used: Vec<Equation>,
}

fn floor_at(field: &str, value: f64, lo: f64) -> f64 {
    if value.is_finite() && value >= lo {
        return value;
    }
    warn!(field, original = value, applied = lo, "relief input clamped");
    lo
}

/// Zero or non-finite means "not supplied": take `fallback`, then floor at `lo`.
fn fallback_then_floor(field: &str, value: f64, fallback: f64, lo: f64) -> f64 {
    let value = if value.is_finite() && value != 0.0 {
        value
    } else {
        warn!(field, original = value, applied = fallback, "relief input defaulted");
        fallback
    };
    floor_at(field, value, lo)
}

/// Size a relief valve for the fire case.
///
/// Infallible: every input is floored to a physically usable value first.
/// Zero valve coefficients and vapor properties count as unset and take
/// their fallbacks before the floor applies.
pub fn calculate(input: &PsvInput) -> PsvResult {
    let mut equations_used = vec![Equation::FireHeatInput, Equation::ReliefMassRate];

    let wetted_area = floor_at("wetted_area_m2", input.wetted_area_m2, 0.0);
    let env_factor = floor_at("env_factor", input.env_factor, 0.0);
    let latent = floor_at("latent_heat_kj_kg", input.latent_heat_kj_kg, 1.0);

    let heat_input_w = fire_heat_input(env_factor, wetted_area);
    let mass_rate_kg_s = heat_input_w / (latent * 1000.0);

    let set_kpag = if input.set_pressure_kpag.is_finite() { input.set_pressure_kpag } else { 0.0 };
    let overpressure = if input.overpressure_pct.is_finite() { input.overpressure_pct } else { 0.0 };
    let relieving_pressure_kpa = relieving_pressure_kpa(set_kpag, overpressure);
    let p1_pa = floor_at("relieving_pressure_pa", relieving_pressure_kpa * 1000.0, 1.0);
    let back_pressure_kpa = floor_at("back_pressure_kpa", input.back_pressure_kpa, 0.0);

    let kd = fallback_then_floor("kd", input.kd, 0.975, 0.1);
    let kb = fallback_then_floor("kb", input.kb, 1.0, 0.1);
    let kc = fallback_then_floor("kc", input.kc, 1.0, 0.1);

    let mass_flux = match input.case {
        ReliefCase::Vapor => {
            equations_used.push(Equation::VaporReliefArea);
            let mw = fallback_then_floor("molar_mass", input.molar_mass, 1.0, 1.0);
            let k = fallback_then_floor("k", input.k, 1.3, 1.01);
            let z = fallback_then_floor("compressibility", input.compressibility, 1.0, 0.2);
            let t = fallback_then_floor("relieving_temp_k", input.relieving_temp_k, 300.0, 1.0);
            vapor_mass_flux(kd * kb * kc, p1_pa, k, mw, z, t)
        }
        ReliefCase::Liquid => {
            equations_used.push(Equation::LiquidReliefArea);
            let rho = fallback_then_floor("liquid_density", input.liquid_density, 650.0, 1.0);
            let dp_pa = ((relieving_pressure_kpa - back_pressure_kpa) * 1000.0).max(1.0);
            liquid_mass_flux(kd * kc, rho, dp_pa)
        }
    };

    let area_m2 = mass_rate_kg_s / mass_flux.max(MIN_MASS_FLUX);
    let area_in2: SqIn = SqM(area_m2).into();
    let orifice = select_orifice(area_in2);
    let exceeds_largest = area_in2.0 > orifice.area.0;

    if exceeds_largest {
        warn!(area_in2 = area_in2.0, "relief area exceeds the largest API 526 orifice");
    }
    debug!(
        stage = "psv",
        heat_input_w,
        mass_rate_kg_s,
        relieving_pressure_kpa,
        area_in2 = area_in2.0,
        orifice = %orifice.letter
    );

    PsvResult {
        heat_input_w,
        mass_rate_kg_s,
        relieving_pressure_kpa,
        mass_flux,
        area_m2,
        area_in2: area_in2.0,
        orifice,
        exceeds_largest,
        equations_used,
    }
}

/// Relieving pressure, absolute (kPa), of a valve set at `set_kpag`
pub fn relieving_pressure_kpa(set_kpag: f64, overpressure_pct: f64) -> f64 {
    (set_kpag + GAUGE_OFFSET_KPA) * (1.0 + overpressure_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::distillation::{design_distillation_column, DesignInputs};

    #[test]
    fn test_default_vapor_case() {
        let r = calculate(&PsvInput::default());

        // 1160 * 20^0.82
        assert!((r.heat_input_w - 1160.0 * 20f64.powf(0.82)).abs() < 1e-6);
        assert!((r.mass_rate_kg_s - r.heat_input_w / 350_000.0).abs() < 1e-12);
        assert!((r.relieving_pressure_kpa - 701.0 * 1.21).abs() < 1e-9);
        assert!((r.mass_flux - 3086.0).abs() < 5.0, "G = {}", r.mass_flux);
        assert!((r.area_in2 - 0.0194).abs() < 5e-4, "A = {}", r.area_in2);
        assert_eq!(r.orifice.letter, 'D');
        assert!(!r.exceeds_largest);
        assert_eq!(
            r.equations_used,
            vec![Equation::FireHeatInput, Equation::ReliefMassRate, Equation::VaporReliefArea]
        );
    }

    #[test]
    fn test_liquid_case() {
        let r = calculate(&PsvInput::default().with_case(ReliefCase::Liquid));
        let dp_pa: f64 = (701.0 * 1.21 - 101.0) * 1000.0;
        let expected_g = 0.975 * (2.0 * 650.0 * dp_pa).sqrt();
        assert!((r.mass_flux - expected_g).abs() / expected_g < 1e-12);
        assert!(r.equations_used.contains(&Equation::LiquidReliefArea));
        assert!(!r.equations_used.contains(&Equation::VaporReliefArea));
    }

    #[test]
    fn test_liquid_back_pressure_above_relieving() {
        let input = PsvInput {
            back_pressure_kpa: 5000.0,
            ..PsvInput::default().with_case(ReliefCase::Liquid)
        };
        let r = calculate(&input);
        // ΔP floored at 1 Pa
        let expected_g = 0.975 * (2.0 * 650.0 * 1.0f64).sqrt();
        assert!((r.mass_flux - expected_g).abs() < 1e-9);
        assert!(r.area_m2.is_finite());
    }

    #[test]
    fn test_clamps() {
        let input = PsvInput {
            latent_heat_kj_kg: 0.0,
            k: 1.0,
            compressibility: 0.0,
            molar_mass: -3.0,
            kd: 0.0,
            ..PsvInput::default()
        };
        let r = calculate(&input);
        assert!(r.mass_rate_kg_s.is_finite());
        assert!(r.mass_flux.is_finite() && r.mass_flux > 0.0);
        assert!(r.area_m2.is_finite());
    }

    #[test]
    fn test_zero_kd_takes_fallback() {
        let base = calculate(&PsvInput::default());
        let zero = calculate(&PsvInput { kd: 0.0, ..PsvInput::default() });
        assert_eq!(zero.mass_flux, base.mass_flux);
        assert_eq!(zero.area_in2, base.area_in2);

        // Negative is supplied, so only the floor applies
        let negative = calculate(&PsvInput { kd: -1.0, ..PsvInput::default() });
        assert!((negative.mass_flux / base.mass_flux - 0.1 / 0.975).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vapor_properties_take_fallbacks() {
        let zeroed = PsvInput {
            k: 0.0,
            compressibility: 0.0,
            relieving_temp_k: 0.0,
            ..PsvInput::default()
        };
        let explicit = PsvInput {
            k: 1.3,
            compressibility: 1.0,
            relieving_temp_k: 300.0,
            ..PsvInput::default()
        };
        assert_eq!(calculate(&zeroed), calculate(&explicit));

        let liquid = PsvInput { liquid_density: 0.0, ..PsvInput::default().with_case(ReliefCase::Liquid) };
        assert_eq!(calculate(&liquid), calculate(&PsvInput::default().with_case(ReliefCase::Liquid)));
    }

    #[test]
    fn test_zero_wetted_area() {
        let input = PsvInput { wetted_area_m2: 0.0, ..PsvInput::default() };
        let r = calculate(&input);
        assert_eq!(r.heat_input_w, 0.0);
        assert_eq!(r.area_in2, 0.0);
        assert_eq!(r.orifice.letter, 'D');
    }

    #[test]
    fn test_oversized_requirement_returns_t() {
        let input = PsvInput {
            wetted_area_m2: 1.0e6,
            set_pressure_kpag: 0.0,
            overpressure_pct: 0.0,
            ..PsvInput::default()
        };
        let r = calculate(&input);
        assert_eq!(r.orifice.letter, 'T');
        assert!(r.exceeds_largest);
    }

    #[test]
    fn test_relieving_temperature_from_column() {
        let design = design_distillation_column(&DesignInputs::default());
        let input = PsvInput::default().with_column_top(&design);
        assert!((input.relieving_temp_k - (design.operating.t_top_c + 273.15)).abs() < 1e-9);

        // Cooler gas is denser, so the flux rises
        let hot = calculate(&PsvInput::default());
        let cold = calculate(&input);
        assert!(cold.mass_flux > hot.mass_flux);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let input: PsvInput = serde_json::from_str(r#"{"case": "liquid", "liquid_density": 800}"#).unwrap();
        assert_eq!(input.case, ReliefCase::Liquid);
        assert_eq!(input.liquid_density, 800.0);
        assert_eq!(input.kd, 0.975);
    }

    #[test]
    fn test_pressure_helpers() {
        assert!((relieving_pressure_kpa(600.0, 21.0) - 848.21).abs() < 1e-9);
    }
}
