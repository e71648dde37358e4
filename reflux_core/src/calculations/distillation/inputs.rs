//! Design input record and its normalization.
//!
//! `DesignInputs` is what a form or JSON file supplies: every numeric field
//! may be a number, a numeric string, an empty string or absent.
//! [`normalize`] turns it into [`NormalizedInputs`], plain `f64`s with every
//! fallback and clamp applied and recorded.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CalcError, CalcResult};
use crate::properties::{
    resolve_properties, ChemicalSystem, CustomComponents, ResolvedProperties, GENERIC_HK_LIQUID_DENSITY,
    GENERIC_HK_MOLAR_MASS, GENERIC_LATENT_HEAT, GENERIC_LK_LIQUID_DENSITY, GENERIC_LK_MOLAR_MASS,
};

// ============================================================================
// Numeric Input
// ============================================================================

/// A numeric field as supplied by a form or JSON document.
///
/// Accepts `0.95` as well as `"0.95"`. An empty string means "not supplied".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// The value if it is (or parses to) a finite number
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            NumericInput::Number(v) => Some(*v).filter(|v| v.is_finite()),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// True for an empty or whitespace-only string
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        NumericInput::Number(v)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericInput::Number(v) => write!(f, "{}", v),
            NumericInput::Text(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// Enumerated Choices
// ============================================================================

/// Column internals. Exactly one sizing path runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Internals {
    #[default]
    Trays,
    Packing,
}

impl Internals {
    pub fn display_name(&self) -> &'static str {
        match self {
            Internals::Trays => "Trays",
            Internals::Packing => "Packing",
        }
    }
}

impl std::fmt::Display for Internals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Material of construction, reported on the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConstructionMaterial {
    #[default]
    #[serde(rename = "SS316L")]
    Ss316L,
    #[serde(rename = "SS304")]
    Ss304,
    #[serde(rename = "Carbon Steel")]
    CarbonSteel,
    Duplex,
}

impl ConstructionMaterial {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConstructionMaterial::Ss316L => "SS316L",
            ConstructionMaterial::Ss304 => "SS304",
            ConstructionMaterial::CarbonSteel => "Carbon Steel",
            ConstructionMaterial::Duplex => "Duplex",
        }
    }
}

impl std::fmt::Display for ConstructionMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Design Inputs
// ============================================================================

/// Complete parameter record for one column design.
///
/// `Default` carries the factory defaults. Any field omitted from a JSON
/// document takes its default; `null`, `""` or a non-numeric string is
/// replaced during normalization and reported as an adjustment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "system": "Benzene/Toluene",
///   "feed_flow": 100,
///   "z_f": "0.50",
///   "x_d": 0.95,
///   "x_b": 0.05,
///   "internals": "packing",
///   "t_top_c": "",
///   "material": "SS316L"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInputs {
    pub system: ChemicalSystem,

    /// Feed flow (kmol/h)
    pub feed_flow: Option<NumericInput>,
    /// Feed light-key mole fraction
    pub z_f: Option<NumericInput>,
    /// Distillate light-key mole fraction
    pub x_d: Option<NumericInput>,
    /// Bottoms light-key mole fraction
    pub x_b: Option<NumericInput>,
    /// Relative volatility LK/HK
    pub alpha: Option<NumericInput>,
    /// Feed quality (liquid fraction)
    pub q: Option<NumericInput>,
    /// Operating reflux as a multiple of minimum
    pub reflux_factor: Option<NumericInput>,

    pub internals: Internals,
    pub murphree_efficiency: Option<NumericInput>,
    pub tray_spacing_m: Option<NumericInput>,
    pub dp_tray_mbar: Option<NumericInput>,
    /// Souders-Brown capacity factor (m/s)
    pub souders_brown_k: Option<NumericInput>,
    pub flood_fraction: Option<NumericInput>,
    pub hetp_m: Option<NumericInput>,
    pub packing_dp_mbar_per_m: Option<NumericInput>,

    pub p_top_kpa: Option<NumericInput>,
    pub p_bottom_kpa: Option<NumericInput>,
    /// Override for the computed top temperature (°C)
    pub t_top_c: Option<NumericInput>,
    /// Override for the computed bottom temperature (°C)
    pub t_bottom_c: Option<NumericInput>,
    /// Override for the computed top vapor density (kg/m³)
    pub rho_v_top: Option<NumericInput>,
    /// Override for the computed top liquid density (kg/m³)
    pub rho_l_top: Option<NumericInput>,

    pub cw_inlet_c: Option<NumericInput>,
    pub cw_rise_k: Option<NumericInput>,
    /// Condenser overall U (W/m²K)
    pub u_condenser: Option<NumericInput>,
    /// Reboiler overall U (W/m²K)
    pub u_reboiler: Option<NumericInput>,
    pub steam_latent_kj_kg: Option<NumericInput>,
    pub steam_tsat_c: Option<NumericInput>,

    /// Custom system only: key molar masses (kg/kmol)
    pub mw_lk: Option<NumericInput>,
    pub mw_hk: Option<NumericInput>,
    /// Custom system only: key liquid densities (kg/m³)
    pub liquid_density_lk: Option<NumericInput>,
    pub liquid_density_hk: Option<NumericInput>,
    /// Custom system only: key latent heats (kJ/kg)
    pub latent_heat_lk: Option<NumericInput>,
    pub latent_heat_hk: Option<NumericInput>,

    pub distillate_density: Option<NumericInput>,
    pub drum_holdup_min: Option<NumericInput>,

    pub material: ConstructionMaterial,

    /// Set by [`DesignInputs::from_json`] when the system name was missing
    /// or unrecognized and `Custom` was used instead
    #[serde(skip)]
    pub system_fallback: Option<Adjustment>,
}

impl Default for DesignInputs {
    fn default() -> Self {
        let n = |v: f64| Some(NumericInput::Number(v));
        DesignInputs {
            system: ChemicalSystem::BenzeneToluene,
            feed_flow: n(100.0),
            z_f: n(0.50),
            x_d: n(0.95),
            x_b: n(0.05),
            alpha: n(2.5),
            q: n(1.0),
            reflux_factor: n(1.30),
            internals: Internals::Trays,
            murphree_efficiency: n(0.70),
            tray_spacing_m: n(0.50),
            dp_tray_mbar: n(3.0),
            souders_brown_k: n(0.11),
            flood_fraction: n(0.80),
            hetp_m: n(0.50),
            packing_dp_mbar_per_m: n(0.40),
            p_top_kpa: n(101.0),
            p_bottom_kpa: n(120.0),
            t_top_c: None,
            t_bottom_c: None,
            rho_v_top: None,
            rho_l_top: None,
            cw_inlet_c: n(30.0),
            cw_rise_k: n(10.0),
            u_condenser: n(500.0),
            u_reboiler: n(1500.0),
            steam_latent_kj_kg: n(2100.0),
            steam_tsat_c: n(180.0),
            mw_lk: None,
            mw_hk: None,
            liquid_density_lk: None,
            liquid_density_hk: None,
            latent_heat_lk: None,
            latent_heat_hk: None,
            distillate_density: n(700.0),
            drum_holdup_min: n(5.0),
            material: ConstructionMaterial::Ss316L,
            system_fallback: None,
        }
    }
}

impl DesignInputs {
    /// Parse a JSON input document.
    ///
    /// The system name is matched leniently ("benzene-toluene", "BT").
    /// A `null` or unrecognized name runs the `Custom` path and is reported
    /// as a defaulted adjustment. Malformed JSON, or a document that is not
    /// an object, is an error.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(CalcError::invalid_input(
                "document",
                value.to_string(),
                "Design input must be a JSON object",
            ));
        }
        let mut system_fallback = None;
        if let Some(raw) = value.get_mut("system") {
            let system = match raw.as_str().map(ChemicalSystem::from_str_flexible) {
                Some(Ok(system)) => system,
                _ => {
                    let original = match &*raw {
                        serde_json::Value::Null => None,
                        serde_json::Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    };
                    warn!(original = ?original, "unrecognized system, using Custom properties");
                    system_fallback = Some(Adjustment {
                        field: "system".to_string(),
                        original,
                        applied: None,
                        kind: AdjustmentKind::Defaulted,
                    });
                    ChemicalSystem::Custom
                }
            };
            *raw = serde_json::to_value(system)?;
        }
        let mut inputs: Self = serde_json::from_value(value)?;
        inputs.system_fallback = system_fallback;
        Ok(inputs)
    }

    /// Builder-style system selection. Clears any earlier fallback.
    pub fn with_system(mut self, system: ChemicalSystem) -> Self {
        self.system = system;
        self.system_fallback = None;
        self
    }

    pub fn with_internals(mut self, internals: Internals) -> Self {
        self.internals = internals;
        self
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// What normalization did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Missing, blank or non-numeric; the factory default was used
    Defaulted,
    /// Numeric but out of range; pulled to the nearest bound
    Clamped,
    /// Non-numeric override; treated as not supplied
    Ignored,
}

/// One field changed by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub field: String,
    /// Supplied text, absent when the field was `null`
    pub original: Option<String>,
    /// Value used downstream, absent for ignored overrides
    pub applied: Option<f64>,
    pub kind: AdjustmentKind,
}

/// Inputs after coercion, defaults and clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInputs {
    pub system: ChemicalSystem,
    pub feed_flow: f64,
    pub z_f: f64,
    pub x_d: f64,
    pub x_b: f64,
    pub alpha: f64,
    pub q: f64,
    pub reflux_factor: f64,

    pub internals: Internals,
    pub murphree_efficiency: f64,
    pub tray_spacing_m: f64,
    pub dp_tray_mbar: f64,
    pub souders_brown_k: f64,
    pub flood_fraction: f64,
    pub hetp_m: f64,
    pub packing_dp_mbar_per_m: f64,

    pub p_top_kpa: f64,
    pub p_bottom_kpa: f64,
    pub t_top_c: Option<f64>,
    pub t_bottom_c: Option<f64>,
    pub rho_v_top: Option<f64>,
    pub rho_l_top: Option<f64>,

    pub cw_inlet_c: f64,
    pub cw_rise_k: f64,
    pub u_condenser: f64,
    pub u_reboiler: f64,
    pub steam_latent_kj_kg: f64,
    pub steam_tsat_c: f64,

    /// Key properties used when the system is `Custom`
    pub custom: CustomComponents,
    pub distillate_density: f64,
    pub drum_holdup_min: f64,
    pub material: ConstructionMaterial,

    pub adjustments: Vec<Adjustment>,
}

impl NormalizedInputs {
    /// Key-component properties for this design
    pub fn properties(&self) -> ResolvedProperties {
        resolve_properties(self.system, &self.custom)
    }

    /// True if normalization changed anything
    pub fn was_adjusted(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Collects adjustments while fields are coerced.
#[derive(Default)]
struct Normalizer {
    adjustments: Vec<Adjustment>,
}

impl Normalizer {
    fn note(&mut self, field: &str, raw: Option<&NumericInput>, applied: Option<f64>, kind: AdjustmentKind) {
        let original = raw.map(|r| r.to_string());
        warn!(field, original = ?original, applied = ?applied, kind = ?kind, "input adjusted");
        self.adjustments.push(Adjustment {
            field: field.to_string(),
            original,
            applied,
            kind,
        });
    }

    /// Finite value or the default
    fn value(&mut self, field: &str, raw: &Option<NumericInput>, default: f64) -> f64 {
        match raw.as_ref().and_then(NumericInput::as_finite) {
            Some(v) => v,
            None => {
                self.note(field, raw.as_ref(), Some(default), AdjustmentKind::Defaulted);
                default
            }
        }
    }

    /// Finite value or the default, then clamped into `[lo, hi]`
    fn bounded(&mut self, field: &str, raw: &Option<NumericInput>, default: f64, lo: f64, hi: f64) -> f64 {
        let v = self.value(field, raw, default);
        let clamped = v.clamp(lo, hi);
        if clamped != v {
            self.note(field, raw.as_ref(), Some(clamped), AdjustmentKind::Clamped);
        }
        clamped
    }

    fn at_least(&mut self, field: &str, raw: &Option<NumericInput>, default: f64, lo: f64) -> f64 {
        self.bounded(field, raw, default, lo, f64::INFINITY)
    }

    /// Strictly positive value or the default
    fn positive(&mut self, field: &str, raw: &Option<NumericInput>, default: f64) -> f64 {
        let v = self.value(field, raw, default);
        if v > 0.0 {
            v
        } else {
            self.note(field, raw.as_ref(), Some(default), AdjustmentKind::Defaulted);
            default
        }
    }

    /// Optional override; blank or absent is silently "not supplied"
    fn optional(&mut self, field: &str, raw: &Option<NumericInput>) -> Option<f64> {
        let raw = raw.as_ref()?;
        if raw.is_blank() {
            return None;
        }
        let v = raw.as_finite();
        if v.is_none() {
            self.note(field, Some(raw), None, AdjustmentKind::Ignored);
        }
        v
    }
}

/// Coerce and clamp every field of a design input record.
///
/// Never fails. Out-of-range or unusable values are replaced and listed in
/// [`NormalizedInputs::adjustments`].
///
/// # Example
///
/// ```rust
/// use reflux_core::calculations::distillation::{normalize, DesignInputs, AdjustmentKind};
///
/// let mut inputs = DesignInputs::default();
/// inputs.x_d = Some("1.2".into());
/// inputs.alpha = Some("".into());
///
/// let n = normalize(&inputs);
/// assert_eq!(n.x_d, 1.0);
/// assert_eq!(n.alpha, 2.5);
/// assert_eq!(n.adjustments.len(), 2);
/// assert_eq!(n.adjustments[0].kind, AdjustmentKind::Clamped);
/// ```
pub fn normalize(inputs: &DesignInputs) -> NormalizedInputs {
    let mut n = Normalizer::default();
    n.adjustments.extend(inputs.system_fallback.clone());

    let feed_flow = n.at_least("feed_flow", &inputs.feed_flow, 100.0, 0.0);
    let z_f = n.bounded("z_f", &inputs.z_f, 0.50, 0.0, 1.0);
    let x_d = n.bounded("x_d", &inputs.x_d, 0.95, 0.0, 1.0);
    let x_b = n.bounded("x_b", &inputs.x_b, 0.05, 0.0, 1.0);
    let alpha = n.at_least("alpha", &inputs.alpha, 2.5, 1.001);
    let q = n.bounded("q", &inputs.q, 1.0, 0.0, 1.2);
    let reflux_factor = n.at_least("reflux_factor", &inputs.reflux_factor, 1.30, 1.05);

    let murphree_efficiency = n.bounded("murphree_efficiency", &inputs.murphree_efficiency, 0.70, 0.3, 1.0);
    let tray_spacing_m = n.at_least("tray_spacing_m", &inputs.tray_spacing_m, 0.50, 0.3);
    let dp_tray_mbar = n.at_least("dp_tray_mbar", &inputs.dp_tray_mbar, 3.0, 0.5);
    let souders_brown_k = n.at_least("souders_brown_k", &inputs.souders_brown_k, 0.11, 0.05);
    let flood_fraction = n.bounded("flood_fraction", &inputs.flood_fraction, 0.80, 0.5, 0.95);
    let hetp_m = n.at_least("hetp_m", &inputs.hetp_m, 0.50, 0.15);
    let packing_dp_mbar_per_m = n.at_least("packing_dp_mbar_per_m", &inputs.packing_dp_mbar_per_m, 0.40, 0.05);

    let p_top_kpa = n.at_least("p_top_kpa", &inputs.p_top_kpa, 101.0, 1.0);
    let p_bottom_kpa = n.at_least("p_bottom_kpa", &inputs.p_bottom_kpa, 120.0, 1.0);
    let t_top_c = n.optional("t_top_c", &inputs.t_top_c);
    let t_bottom_c = n.optional("t_bottom_c", &inputs.t_bottom_c);
    let rho_v_top = n.optional("rho_v_top", &inputs.rho_v_top);
    let rho_l_top = n.optional("rho_l_top", &inputs.rho_l_top);

    let cw_inlet_c = n.value("cw_inlet_c", &inputs.cw_inlet_c, 30.0);
    let cw_rise_k = n.value("cw_rise_k", &inputs.cw_rise_k, 10.0);
    let u_condenser = n.value("u_condenser", &inputs.u_condenser, 500.0);
    let u_reboiler = n.value("u_reboiler", &inputs.u_reboiler, 1500.0);
    let steam_latent_kj_kg = n.value("steam_latent_kj_kg", &inputs.steam_latent_kj_kg, 2100.0);
    let steam_tsat_c = n.value("steam_tsat_c", &inputs.steam_tsat_c, 180.0);

    // Named systems take their properties from the pack; overrides are not consulted
    let custom = if inputs.system == ChemicalSystem::Custom {
        let mut opt = |field, raw: &Option<NumericInput>, default| match raw {
            None => default,
            Some(r) if r.is_blank() => default,
            Some(_) => n.positive(field, raw, default),
        };
        CustomComponents {
            light_molar_mass: opt("mw_lk", &inputs.mw_lk, GENERIC_LK_MOLAR_MASS),
            heavy_molar_mass: opt("mw_hk", &inputs.mw_hk, GENERIC_HK_MOLAR_MASS),
            light_liquid_density: opt("liquid_density_lk", &inputs.liquid_density_lk, GENERIC_LK_LIQUID_DENSITY),
            heavy_liquid_density: opt("liquid_density_hk", &inputs.liquid_density_hk, GENERIC_HK_LIQUID_DENSITY),
            light_latent_heat_kj_kg: opt("latent_heat_lk", &inputs.latent_heat_lk, GENERIC_LATENT_HEAT),
            heavy_latent_heat_kj_kg: opt("latent_heat_hk", &inputs.latent_heat_hk, GENERIC_LATENT_HEAT),
        }
    } else {
        CustomComponents::default()
    };

    let distillate_density = n.at_least("distillate_density", &inputs.distillate_density, 700.0, 1.0);
    let drum_holdup_min = n.at_least("drum_holdup_min", &inputs.drum_holdup_min, 5.0, 0.0);

    NormalizedInputs {
        system: inputs.system,
        feed_flow,
        z_f,
        x_d,
        x_b,
        alpha,
        q,
        reflux_factor,
        internals: inputs.internals,
        murphree_efficiency,
        tray_spacing_m,
        dp_tray_mbar,
        souders_brown_k,
        flood_fraction,
        hetp_m,
        packing_dp_mbar_per_m,
        p_top_kpa,
        p_bottom_kpa,
        t_top_c,
        t_bottom_c,
        rho_v_top,
        rho_l_top,
        cw_inlet_c,
        cw_rise_k,
        u_condenser,
        u_reboiler,
        steam_latent_kj_kg,
        steam_tsat_c,
        custom,
        distillate_density,
        drum_holdup_min,
        material: inputs.material,
        adjustments: n.adjustments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_adjustment() {
        let n = normalize(&DesignInputs::default());
        assert!(!n.was_adjusted(), "{:?}", n.adjustments);
        assert_eq!(n.feed_flow, 100.0);
        assert_eq!(n.x_d, 0.95);
        assert_eq!(n.internals, Internals::Trays);
        assert_eq!(n.t_top_c, None);
    }

    #[test]
    fn test_numeric_input_parsing() {
        assert_eq!(NumericInput::from("0.95").as_finite(), Some(0.95));
        assert_eq!(NumericInput::from(" 12 ").as_finite(), Some(12.0));
        assert_eq!(NumericInput::from("abc").as_finite(), None);
        assert_eq!(NumericInput::from("").as_finite(), None);
        assert!(NumericInput::from("  ").is_blank());
        assert_eq!(NumericInput::from(f64::NAN).as_finite(), None);
        assert_eq!(NumericInput::from("inf").as_finite(), None);
    }

    #[test]
    fn test_fraction_clamps() {
        let inputs = DesignInputs {
            z_f: Some(NumericInput::from(-0.2)),
            x_d: Some(NumericInput::from(1.5)),
            q: Some(NumericInput::from(3.0)),
            flood_fraction: Some(NumericInput::from(0.2)),
            murphree_efficiency: Some(NumericInput::from(0.1)),
            ..DesignInputs::default()
        };
        let n = normalize(&inputs);
        assert_eq!(n.z_f, 0.0);
        assert_eq!(n.x_d, 1.0);
        assert_eq!(n.q, 1.2);
        assert_eq!(n.flood_fraction, 0.5);
        assert_eq!(n.murphree_efficiency, 0.3);
        assert!(n.adjustments.iter().all(|a| a.kind == AdjustmentKind::Clamped));
        assert_eq!(n.adjustments.len(), 5);
    }

    #[test]
    fn test_lower_bounds() {
        let inputs = DesignInputs {
            feed_flow: Some(NumericInput::from(-10.0)),
            alpha: Some(NumericInput::from(0.8)),
            reflux_factor: Some(NumericInput::from(1.0)),
            p_top_kpa: Some(NumericInput::from(0.0)),
            hetp_m: Some(NumericInput::from(0.01)),
            distillate_density: Some(NumericInput::from(0.0)),
            ..DesignInputs::default()
        };
        let n = normalize(&inputs);
        assert_eq!(n.feed_flow, 0.0);
        assert_eq!(n.alpha, 1.001);
        assert_eq!(n.reflux_factor, 1.05);
        assert_eq!(n.p_top_kpa, 1.0);
        assert_eq!(n.hetp_m, 0.15);
        assert_eq!(n.distillate_density, 1.0);
    }

    #[test]
    fn test_non_numeric_falls_back_to_default() {
        let inputs = DesignInputs {
            z_f: Some("half".into()),
            cw_rise_k: None,
            ..DesignInputs::default()
        };
        let n = normalize(&inputs);
        assert_eq!(n.z_f, 0.50);
        assert_eq!(n.cw_rise_k, 10.0);

        let z = n.adjustments.iter().find(|a| a.field == "z_f").unwrap();
        assert_eq!(z.kind, AdjustmentKind::Defaulted);
        assert_eq!(z.original.as_deref(), Some("half"));
        assert_eq!(z.applied, Some(0.50));

        let cw = n.adjustments.iter().find(|a| a.field == "cw_rise_k").unwrap();
        assert_eq!(cw.original, None);
    }

    #[test]
    fn test_overrides() {
        let inputs = DesignInputs {
            t_top_c: Some("85.5".into()),
            t_bottom_c: Some("".into()),
            rho_v_top: Some("n/a".into()),
            rho_l_top: Some(NumericInput::from(810.0)),
            ..DesignInputs::default()
        };
        let n = normalize(&inputs);
        assert_eq!(n.t_top_c, Some(85.5));
        assert_eq!(n.t_bottom_c, None);
        assert_eq!(n.rho_v_top, None);
        assert_eq!(n.rho_l_top, Some(810.0));
        // Only the unparseable override is reported
        assert_eq!(n.adjustments.len(), 1);
        assert_eq!(n.adjustments[0].kind, AdjustmentKind::Ignored);
    }

    #[test]
    fn test_custom_overrides_only_for_custom() {
        let inputs = DesignInputs {
            mw_lk: Some(NumericInput::from(58.08)),
            latent_heat_lk: Some("518".into()),
            mw_hk: Some(NumericInput::from(-1.0)),
            ..DesignInputs::default()
        };

        let named = normalize(&inputs);
        assert_eq!(named.custom, CustomComponents::default());
        assert!(!named.was_adjusted());

        let custom = normalize(&inputs.clone().with_system(ChemicalSystem::Custom));
        assert_eq!(custom.custom.light_molar_mass, 58.08);
        assert_eq!(custom.custom.light_latent_heat_kj_kg, 518.0);
        assert_eq!(custom.custom.heavy_molar_mass, GENERIC_HK_MOLAR_MASS);
        assert_eq!(custom.adjustments.len(), 1);
        assert_eq!(custom.properties().light_molar_mass, 58.08);
    }

    #[test]
    fn test_from_json_string_fields() {
        let json = r#"{
            "system": "hexane-heptane",
            "feed_flow": "250",
            "z_f": 0.4,
            "x_d": "0.98",
            "internals": "packing",
            "t_top_c": "",
            "material": "Carbon Steel"
        }"#;
        let inputs = DesignInputs::from_json(json).unwrap();
        assert_eq!(inputs.system, ChemicalSystem::HexaneHeptane);
        assert_eq!(inputs.internals, Internals::Packing);
        assert_eq!(inputs.material, ConstructionMaterial::CarbonSteel);
        // Omitted fields keep their defaults
        assert_eq!(inputs.alpha, Some(NumericInput::Number(2.5)));

        let n = normalize(&inputs);
        assert_eq!(n.feed_flow, 250.0);
        assert_eq!(n.x_d, 0.98);
        assert_eq!(n.t_top_c, None);
    }

    #[test]
    fn test_from_json_unknown_system() {
        let inputs = DesignInputs::from_json(r#"{"system": "Acetone/Water", "mw_lk": 58.08}"#).unwrap();
        assert_eq!(inputs.system, ChemicalSystem::Custom);
        let n = normalize(&inputs);
        assert_eq!(n.custom.light_molar_mass, 58.08);
        assert_eq!(
            n.adjustments,
            vec![Adjustment {
                field: "system".to_string(),
                original: Some("Acetone/Water".to_string()),
                applied: None,
                kind: AdjustmentKind::Defaulted,
            }]
        );

        let inputs = DesignInputs::from_json(r#"{"system": null}"#).unwrap();
        assert_eq!(inputs.system, ChemicalSystem::Custom);
        assert_eq!(inputs.system_fallback.as_ref().map(|a| a.original.clone()), Some(None));

        // An explicit selection afterwards drops the fallback note
        let inputs = inputs.with_system(ChemicalSystem::EthanolWater);
        assert!(!normalize(&inputs).was_adjusted());

        // Absent system keeps the default pack
        let inputs = DesignInputs::from_json("{}").unwrap();
        assert_eq!(inputs.system, ChemicalSystem::BenzeneToluene);
        assert!(inputs.system_fallback.is_none());

        let err = DesignInputs::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let err = DesignInputs::from_json("[0.95, 0.05]").unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "document"));
    }

    #[test]
    fn test_inputs_roundtrip() {
        let inputs = DesignInputs {
            z_f: Some("0.45".into()),
            ..DesignInputs::default()
        };
        let json = serde_json::to_string(&inputs).unwrap();
        let back: DesignInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, back);
    }
}
