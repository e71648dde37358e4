//! Design result records.
//!
//! Unavailable quantities are `None` (JSON `null`), never NaN or zero, so a
//! consumer can tell "not computed" from "computed as zero".

use serde::{Deserialize, Serialize};

use super::inputs::Internals;
use crate::equations::Equation;
use crate::properties::ChemicalSystem;
use crate::units::KELVIN_OFFSET;

/// Temperatures and densities at the column ends.
///
/// The `*_auto` fields hold what the property pack predicted; the plain
/// fields hold what the design used after overrides and fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingConditions {
    pub p_top_kpa: f64,
    pub p_bottom_kpa: f64,
    pub t_top_c: f64,
    pub t_bottom_c: f64,
    /// Top vapor density (kg/m³)
    pub rho_v_top: f64,
    /// Top liquid density (kg/m³)
    pub rho_l_top: f64,
    pub t_top_auto_c: Option<f64>,
    pub t_bottom_auto_c: Option<f64>,
    pub rho_v_auto: Option<f64>,
    pub rho_l_auto: Option<f64>,
}

/// Fenske-Underwood-Gilliland shortcut results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FugSummary {
    pub min_stages: f64,
    pub underwood_theta: Option<f64>,
    pub min_reflux: Option<f64>,
    pub reflux_ratio: Option<f64>,
    pub theoretical_stages: Option<f64>,
}

/// Overall balance (kmol/h).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassBalance {
    pub distillate: f64,
    pub bottoms: f64,
    /// Overhead vapor; `None` without an operating reflux
    pub vapor: Option<f64>,
}

/// Tray column sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraySection {
    pub actual_trays: u32,
    pub height_m: f64,
    pub pressure_drop_mbar: f64,
}

/// Packed column sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedSection {
    pub height_m: f64,
    pub pressure_drop_mbar: f64,
}

/// Shell sizing. At most one of `trays` and `packing` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hydraulics {
    /// Top vapor volumetric flow (m³/s)
    pub vapor_volumetric_flow_m3_s: Option<f64>,
    /// Souders-Brown allowable velocity at design flood (m/s)
    pub allowable_velocity_m_s: f64,
    pub area_m2: Option<f64>,
    pub diameter_m: Option<f64>,
    pub trays: Option<TraySection>,
    pub packing: Option<PackedSection>,
}

/// Condenser, reboiler and utility consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilities {
    pub condenser_duty_kj_h: Option<f64>,
    pub reboiler_duty_kj_h: Option<f64>,
    pub cw_inlet_c: f64,
    pub cw_outlet_c: f64,
    pub cw_rise_k: f64,
    pub cooling_water_kg_h: Option<f64>,
    pub steam_kg_h: Option<f64>,
    pub condenser_lmtd_k: Option<f64>,
    pub condenser_area_m2: Option<f64>,
    pub reboiler_delta_t_k: f64,
    pub reboiler_area_m2: Option<f64>,
}

/// Reflux drum sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefluxDrum {
    /// Distillate molar mass (kg/kmol)
    pub distillate_molar_mass: f64,
    pub volume_m3: f64,
}

/// Everything one design run produces.
///
/// Built from scratch on every run; nothing carries over between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub system: ChemicalSystem,
    pub internals: Internals,
    pub operating: OperatingConditions,
    pub fug: FugSummary,
    pub balance: MassBalance,
    pub hydraulics: Hydraulics,
    pub utilities: Utilities,
    pub drum: RefluxDrum,
    /// Underwood root, minimum reflux or stage count unavailable
    pub bad_specs: bool,
    /// Correlations applied, in pipeline order
    pub equations_used: Vec<Equation>,
}

impl DesignResult {
    /// Column top temperature in kelvin (relief sizing basis)
    pub fn top_temperature_k(&self) -> f64 {
        self.operating.t_top_c + KELVIN_OFFSET
    }

    /// Column height for either internals type
    pub fn column_height_m(&self) -> Option<f64> {
        match (&self.hydraulics.trays, &self.hydraulics.packing) {
            (Some(t), _) => Some(t.height_m),
            (None, Some(p)) => Some(p.height_m),
            (None, None) => None,
        }
    }

    /// Column pressure drop for either internals type (mbar)
    pub fn pressure_drop_mbar(&self) -> Option<f64> {
        match (&self.hydraulics.trays, &self.hydraulics.packing) {
            (Some(t), _) => Some(t.pressure_drop_mbar),
            (None, Some(p)) => Some(p.pressure_drop_mbar),
            (None, None) => None,
        }
    }
}
