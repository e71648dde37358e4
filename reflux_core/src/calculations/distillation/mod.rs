//! # Binary Distillation Column Design
//!
//! Shortcut sizing of a two-product column: Fenske-Underwood-Gilliland stage
//! count, Souders-Brown shell diameter, tray or packed height, condenser and
//! reboiler duties with exchanger areas, utilities and reflux drum.
//!
//! ## Pipeline
//!
//! Data flows strictly forward, each stage reading the normalized inputs and
//! the outputs of the stages before it:
//!
//! 1. Property resolution (pack or Custom)
//! 2. Phase equilibrium at the column ends (dew points, densities)
//! 3. FUG shortcut
//! 4. Material balance and hydraulics
//! 5. Heat duties, exchangers, utilities, reflux drum
//!
//! The pipeline never fails. An Underwood root that is not bracketed raises
//! `bad_specs`; every quantity that needs the reflux ratio is then `None`
//! while the rest is still reported.
//!
//! ## Example
//!
//! ```rust
//! use reflux_core::calculations::distillation::{design_distillation_column, DesignInputs};
//!
//! let result = design_distillation_column(&DesignInputs::default());
//!
//! assert!(!result.bad_specs);
//! assert!((result.balance.distillate - 50.0).abs() < 1e-9);
//! println!("N = {:.2}", result.fug.theoretical_stages.unwrap());
//! println!("Shell ID = {:.3} m", result.hydraulics.diameter_m.unwrap());
//! ```

mod inputs;
mod result;

pub use inputs::{
    normalize, Adjustment, AdjustmentKind, ConstructionMaterial, DesignInputs, Internals, NormalizedInputs,
    NumericInput,
};
pub use result::{
    DesignResult, FugSummary, Hydraulics, MassBalance, OperatingConditions, PackedSection, RefluxDrum,
    TraySection, Utilities,
};

use tracing::{debug, warn};

use crate::equations::column::{
    actual_trays, bottoms_from_balance, circular_diameter, lever_rule_distillate, overhead_vapor,
    packed_height, souders_brown_velocity,
};
use crate::equations::fug::{fenske_min_stages, gilliland_stages, underwood_min_reflux, underwood_theta};
use crate::equations::heat_transfer::{
    condenser_lmtd, cooling_water_flow, exchanger_area, reboiler_delta_t, reflux_drum_volume, steam_flow,
};
use crate::equations::vle::{
    ideal_gas_density, ideal_gas_volumetric_flow, mixture_liquid_density, saturation_temperature,
};
use crate::equations::{Equation, EquationTracker};
use crate::properties::ResolvedProperties;
use crate::units::{Celsius, KjPerHour, Kpa};

/// Top temperature when neither a property pack nor an override gives one (°C)
pub const FALLBACK_T_TOP_C: f64 = 78.0;
/// Bottom temperature when neither a property pack nor an override gives one (°C)
pub const FALLBACK_T_BOTTOM_C: f64 = 95.0;
/// Top vapor density fallback (kg/m³)
pub const FALLBACK_RHO_V: f64 = 1.5;
/// Top liquid density fallback (kg/m³)
pub const FALLBACK_RHO_L: f64 = 650.0;

/// Design a column from a raw input record.
///
/// Normalizes `inputs` and runs the pipeline. Identical inputs give
/// identical results; no state is kept between calls.
pub fn design_distillation_column(inputs: &DesignInputs) -> DesignResult {
    let normalized = normalize(inputs);
    design_from_normalized(&normalized)
}

/// Run the pipeline on already-normalized inputs.
pub fn design_from_normalized(n: &NormalizedInputs) -> DesignResult {
    let mut tracker = EquationTracker::new();

    let props = n.properties();
    debug!(
        stage = "properties",
        system = %n.system,
        mw_lk = props.light_molar_mass,
        mw_hk = props.heavy_molar_mass,
        has_pack = props.antoine.is_some()
    );

    let operating = resolve_operating_conditions(n, &props, &mut tracker);
    let fug = solve_shortcut(n, &mut tracker);

    let bad_specs = fug.underwood_theta.is_none() || fug.min_reflux.is_none() || fug.theoretical_stages.is_none();
    if bad_specs {
        warn!(
            alpha = n.alpha,
            q = n.q,
            z_f = n.z_f,
            "Underwood root not bracketed on (0, 1); review alpha, q and zF"
        );
    }

    let balance = material_balance(n, &fug, &mut tracker);
    let hydraulics = size_shell(n, &operating, &fug, &balance, &mut tracker);
    let (utilities, drum) = size_utilities(n, &props, &operating, &balance, &mut tracker);

    DesignResult {
        system: n.system,
        internals: n.internals,
        operating,
        fug,
        balance,
        hydraulics,
        utilities,
        drum,
        bad_specs,
        equations_used: tracker.unique_equations(),
    }
}

// ============================================================================
// Stage 2: phase equilibrium at the column ends
// ============================================================================

fn resolve_operating_conditions(
    n: &NormalizedInputs,
    props: &ResolvedProperties,
    tracker: &mut EquationTracker,
) -> OperatingConditions {
    let p_top = Kpa(n.p_top_kpa);
    let p_bottom = Kpa(n.p_bottom_kpa);

    // (t_top, t_bottom, rho_v, rho_l) predicted by the pack
    let auto = props.antoine.map(|(light, heavy)| {
        tracker.record(Equation::AntoineVaporPressure, "column top");
        tracker.record(Equation::AntoineVaporPressure, "column bottom");
        tracker.record(Equation::SaturationTemperature, "column top");
        tracker.record(Equation::SaturationTemperature, "column bottom");
        tracker.record(Equation::IdealGasVaporDensity, "column top");
        tracker.record(Equation::MixtureLiquidDensity, "column top");

        let t_top = saturation_temperature(n.x_d, &light, &heavy, p_top);
        let t_bottom = saturation_temperature(n.x_b, &light, &heavy, p_bottom);
        let rho_v = ideal_gas_density(p_top, props.mixture_molar_mass(n.x_d), t_top);
        let rho_l = mixture_liquid_density(n.x_d, props.light_liquid_density, props.heavy_liquid_density);
        (t_top.0, t_bottom.0, rho_v, rho_l)
    });

    if auto.is_none() && (n.t_top_c.is_none() || n.t_bottom_c.is_none()) {
        warn!(
            system = %n.system,
            "no property pack; generic column temperatures used where no override is given"
        );
    }

    // Each override wins independently of the others
    let conditions = OperatingConditions {
        p_top_kpa: n.p_top_kpa,
        p_bottom_kpa: n.p_bottom_kpa,
        t_top_c: n.t_top_c.or(auto.map(|a| a.0)).unwrap_or(FALLBACK_T_TOP_C),
        t_bottom_c: n.t_bottom_c.or(auto.map(|a| a.1)).unwrap_or(FALLBACK_T_BOTTOM_C),
        rho_v_top: n.rho_v_top.or(auto.map(|a| a.2)).unwrap_or(FALLBACK_RHO_V),
        rho_l_top: n.rho_l_top.or(auto.map(|a| a.3)).unwrap_or(FALLBACK_RHO_L),
        t_top_auto_c: auto.map(|a| a.0),
        t_bottom_auto_c: auto.map(|a| a.1),
        rho_v_auto: auto.map(|a| a.2),
        rho_l_auto: auto.map(|a| a.3),
    };

    debug!(
        stage = "vle",
        t_top_c = conditions.t_top_c,
        t_bottom_c = conditions.t_bottom_c,
        rho_v_top = conditions.rho_v_top,
        rho_l_top = conditions.rho_l_top
    );
    conditions
}

// ============================================================================
// Stage 3: FUG shortcut
// ============================================================================

fn solve_shortcut(n: &NormalizedInputs, tracker: &mut EquationTracker) -> FugSummary {
    tracker.record(Equation::FenskeMinimumStages, "total reflux");
    let min_stages = fenske_min_stages(n.alpha, n.x_d, n.x_b);

    tracker.record(Equation::UnderwoodTheta, "feed");
    let theta = underwood_theta(n.alpha, n.z_f, n.q);

    if theta.is_some() {
        tracker.record(Equation::UnderwoodMinimumReflux, "minimum reflux");
    }
    let min_reflux = underwood_min_reflux(n.alpha, n.x_d, theta);

    let reflux_ratio = min_reflux.map(|r_min| {
        tracker.record(Equation::OperatingReflux, "operating reflux");
        n.reflux_factor * r_min
    });

    let theoretical_stages = reflux_ratio.and_then(|r| {
        tracker.record(Equation::GillilandStages, "operating reflux");
        gilliland_stages(min_stages, r, min_reflux)
    });

    debug!(
        stage = "fug",
        n_min = min_stages,
        theta = ?theta,
        r_min = ?min_reflux,
        reflux = ?reflux_ratio,
        n_theoretical = ?theoretical_stages
    );

    FugSummary {
        min_stages,
        underwood_theta: theta,
        min_reflux,
        reflux_ratio,
        theoretical_stages,
    }
}

// ============================================================================
// Stage 4: material balance and hydraulics
// ============================================================================

fn material_balance(n: &NormalizedInputs, fug: &FugSummary, tracker: &mut EquationTracker) -> MassBalance {
    tracker.record(Equation::LeverRuleBalance, "overall");
    let distillate = lever_rule_distillate(n.feed_flow, n.z_f, n.x_d, n.x_b);
    let bottoms = bottoms_from_balance(n.feed_flow, distillate);

    let vapor = fug.reflux_ratio.map(|r| {
        tracker.record(Equation::OverheadVapor, "column top");
        overhead_vapor(r, distillate)
    });

    debug!(stage = "balance", distillate, bottoms, vapor = ?vapor);
    MassBalance { distillate, bottoms, vapor }
}

fn size_shell(
    n: &NormalizedInputs,
    operating: &OperatingConditions,
    fug: &FugSummary,
    balance: &MassBalance,
    tracker: &mut EquationTracker,
) -> Hydraulics {
    tracker.record(Equation::SoudersBrownVelocity, "column top");
    let allowable_velocity_m_s = souders_brown_velocity(
        n.souders_brown_k,
        operating.rho_l_top,
        operating.rho_v_top,
        n.flood_fraction,
    );

    let vapor_volumetric_flow_m3_s = balance.vapor.map(|v| {
        tracker.record(Equation::IdealGasVolumetricFlow, "column top");
        ideal_gas_volumetric_flow(v, Kpa(operating.p_top_kpa), Celsius(operating.t_top_c))
    });

    let area_m2 = vapor_volumetric_flow_m3_s.map(|vdot| {
        if allowable_velocity_m_s > 0.0 {
            vdot / allowable_velocity_m_s
        } else {
            0.0
        }
    });
    let diameter_m = area_m2.map(|a| {
        tracker.record(Equation::ColumnDiameter, "shell");
        circular_diameter(a)
    });

    let (trays, packing) = match (n.internals, fug.theoretical_stages) {
        (Internals::Trays, Some(stages)) => {
            tracker.record(Equation::TrayColumnHeight, "trays");
            let count = actual_trays(stages, n.murphree_efficiency);
            let section = TraySection {
                actual_trays: count,
                height_m: f64::from(count) * n.tray_spacing_m,
                pressure_drop_mbar: f64::from(count) * n.dp_tray_mbar,
            };
            (Some(section), None)
        }
        (Internals::Packing, Some(stages)) => {
            tracker.record(Equation::PackedBedHeight, "packing");
            let height_m = packed_height(stages, n.hetp_m);
            let section = PackedSection {
                height_m,
                pressure_drop_mbar: height_m * n.packing_dp_mbar_per_m,
            };
            (None, Some(section))
        }
        (_, None) => (None, None),
    };

    debug!(
        stage = "hydraulics",
        allowable_velocity_m_s,
        diameter_m = ?diameter_m,
        actual_trays = ?trays.as_ref().map(|t| t.actual_trays),
        packed_height_m = ?packing.as_ref().map(|p| p.height_m)
    );

    Hydraulics {
        vapor_volumetric_flow_m3_s,
        allowable_velocity_m_s,
        area_m2,
        diameter_m,
        trays,
        packing,
    }
}

// ============================================================================
// Stage 5: duties, exchangers, utilities, drum
// ============================================================================

fn size_utilities(
    n: &NormalizedInputs,
    props: &ResolvedProperties,
    operating: &OperatingConditions,
    balance: &MassBalance,
    tracker: &mut EquationTracker,
) -> (Utilities, RefluxDrum) {
    let condenser_duty = balance.vapor.map(|v| {
        tracker.record(Equation::CondenserDuty, "condenser");
        KjPerHour(v * props.mixture_latent_heat_kj_kmol(n.x_d))
    });
    let reboiler_duty = balance.vapor.map(|v| {
        tracker.record(Equation::ReboilerDuty, "reboiler");
        KjPerHour((v + balance.bottoms) * props.mixture_latent_heat_kj_kmol(n.x_b))
    });

    let cw_outlet_c = n.cw_inlet_c + n.cw_rise_k;
    tracker.record(Equation::LogMeanTemperatureDifference, "condenser");
    let condenser_lmtd_k = condenser_lmtd(operating.t_top_c, n.cw_inlet_c, cw_outlet_c);
    tracker.record(Equation::ReboilerDrivingForce, "reboiler");
    let reboiler_delta_t_k = reboiler_delta_t(n.steam_tsat_c, operating.t_bottom_c);

    let condenser_area_m2 = condenser_duty.and_then(|q| {
        tracker.record(Equation::ExchangerArea, "condenser");
        exchanger_area(q, n.u_condenser, condenser_lmtd_k)
    });
    let reboiler_area_m2 = reboiler_duty.and_then(|q| {
        tracker.record(Equation::ExchangerArea, "reboiler");
        exchanger_area(q, n.u_reboiler, Some(reboiler_delta_t_k))
    });

    let cooling_water_kg_h = condenser_duty.map(|q| {
        tracker.record(Equation::CoolingWaterFlow, "condenser");
        cooling_water_flow(q, n.cw_rise_k)
    });
    let steam_kg_h = reboiler_duty.map(|q| {
        tracker.record(Equation::SteamFlow, "reboiler");
        steam_flow(q, n.steam_latent_kj_kg)
    });

    tracker.record(Equation::RefluxDrumVolume, "reflux drum");
    let distillate_molar_mass = props.mixture_molar_mass(n.x_d);
    let drum = RefluxDrum {
        distillate_molar_mass,
        volume_m3: reflux_drum_volume(
            balance.distillate,
            distillate_molar_mass,
            n.distillate_density,
            n.drum_holdup_min,
        ),
    };

    debug!(
        stage = "utilities",
        condenser_duty_kj_h = ?condenser_duty.map(|q| q.0),
        reboiler_duty_kj_h = ?reboiler_duty.map(|q| q.0),
        condenser_lmtd_k = ?condenser_lmtd_k,
        reboiler_delta_t_k,
        drum_volume_m3 = drum.volume_m3
    );

    let utilities = Utilities {
        condenser_duty_kj_h: condenser_duty.map(|q| q.0),
        reboiler_duty_kj_h: reboiler_duty.map(|q| q.0),
        cw_inlet_c: n.cw_inlet_c,
        cw_outlet_c,
        cw_rise_k: n.cw_rise_k,
        cooling_water_kg_h,
        steam_kg_h,
        condenser_lmtd_k,
        condenser_area_m2,
        reboiler_delta_t_k,
        reboiler_area_m2,
    };
    (utilities, drum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::ChemicalSystem;

    fn default_design() -> DesignResult {
        design_distillation_column(&DesignInputs::default())
    }

    #[test]
    fn test_default_design_shortcut() {
        let r = default_design();
        assert!(!r.bad_specs);

        let expected_n_min = 361.0_f64.ln() / 2.5_f64.ln();
        assert!((r.fug.min_stages - expected_n_min).abs() < 1e-9);

        let theta = r.fug.underwood_theta.unwrap();
        assert!((theta - 0.3486).abs() < 1e-3, "theta = {}", theta);

        let r_min = r.fug.min_reflux.unwrap();
        assert!((r_min - 0.1807).abs() < 2e-3, "Rmin = {}", r_min);
        assert!((r.fug.reflux_ratio.unwrap() - 1.3 * r_min).abs() < 1e-12);

        let n = r.fug.theoretical_stages.unwrap();
        assert!((n - 8.08).abs() < 0.05, "N = {}", n);
    }

    #[test]
    fn test_default_design_balance_and_trays() {
        let r = default_design();
        assert!((r.balance.distillate - 50.0).abs() < 1e-9);
        assert!((r.balance.bottoms - 50.0).abs() < 1e-9);

        let v = r.balance.vapor.unwrap();
        assert!((v - (r.fug.reflux_ratio.unwrap() + 1.0) * 50.0).abs() < 1e-9);

        let trays = r.hydraulics.trays.as_ref().unwrap();
        assert_eq!(trays.actual_trays, 12);
        assert!((trays.height_m - 6.0).abs() < 1e-9);
        assert!((trays.pressure_drop_mbar - 36.0).abs() < 1e-9);
        assert!(r.hydraulics.packing.is_none());
        assert!(r.hydraulics.diameter_m.unwrap() > 0.0);
    }

    #[test]
    fn test_default_design_temperatures() {
        let r = default_design();
        // Nearly pure benzene overhead at 1 atm, toluene-rich bottoms at 120 kPa
        assert!(r.operating.t_top_c > 80.0 && r.operating.t_top_c < 84.0, "Ttop = {}", r.operating.t_top_c);
        assert!(r.operating.t_bottom_c > 110.0 && r.operating.t_bottom_c < 125.0);
        assert_eq!(r.operating.t_top_auto_c, Some(r.operating.t_top_c));
        assert!(r.operating.rho_v_top > 2.0 && r.operating.rho_v_top < 3.5);
    }

    #[test]
    fn test_default_design_utilities() {
        let r = default_design();
        let u = &r.utilities;

        let qc = u.condenser_duty_kj_h.unwrap();
        assert!((qc - 1.905e6).abs() / 1.905e6 < 0.01, "Qc = {}", qc);
        assert!(u.reboiler_duty_kj_h.unwrap() > qc);

        assert_eq!(u.cw_outlet_c, 40.0);
        let lmtd = u.condenser_lmtd_k.unwrap();
        assert!(lmtd > 41.0 && lmtd < 52.0);
        assert!((u.cooling_water_kg_h.unwrap() - qc / 41.8).abs() < 1e-6);
        assert!(u.condenser_area_m2.unwrap() > 0.0);
        assert!((u.reboiler_delta_t_k - (180.0 - r.operating.t_bottom_c)).abs() < 1e-9);
    }

    #[test]
    fn test_packing_path() {
        let r = design_distillation_column(&DesignInputs::default().with_internals(Internals::Packing));
        assert!(r.hydraulics.trays.is_none());
        let p = r.hydraulics.packing.as_ref().unwrap();
        let n = r.fug.theoretical_stages.unwrap();
        assert!((p.height_m - n * 0.5).abs() < 1e-12);
        assert!((p.pressure_drop_mbar - p.height_m * 0.4).abs() < 1e-12);
        assert_eq!(r.column_height_m(), Some(p.height_m));
        assert!(r.equations_used.contains(&Equation::PackedBedHeight));
        assert!(!r.equations_used.contains(&Equation::TrayColumnHeight));
    }

    #[test]
    fn test_bad_specs_degrades() {
        let inputs = DesignInputs {
            z_f: Some(NumericInput::from(1.0)),
            ..DesignInputs::default()
        };
        let r = design_distillation_column(&inputs);

        assert!(r.bad_specs);
        assert!(r.fug.underwood_theta.is_none());
        assert!(r.fug.min_reflux.is_none());
        assert!(r.fug.theoretical_stages.is_none());
        assert!(r.balance.vapor.is_none());
        assert!(r.hydraulics.diameter_m.is_none());
        assert!(r.hydraulics.trays.is_none());
        assert!(r.utilities.condenser_duty_kj_h.is_none());
        assert!(r.utilities.condenser_area_m2.is_none());
        assert!(r.utilities.steam_kg_h.is_none());

        // Quantities that do not need the reflux ratio are still reported
        assert!(r.fug.min_stages > 0.0);
        assert!(r.hydraulics.allowable_velocity_m_s > 0.0);
        assert!(r.utilities.condenser_lmtd_k.is_some());
        assert!(r.drum.volume_m3 > 0.0);
    }

    #[test]
    fn test_bad_specs_zero_quality() {
        let inputs = DesignInputs {
            q: Some(NumericInput::from(0.0)),
            ..DesignInputs::default()
        };
        assert!(design_distillation_column(&inputs).bad_specs);
    }

    #[test]
    fn test_custom_system_fallbacks() {
        let r = design_distillation_column(&DesignInputs::default().with_system(ChemicalSystem::Custom));
        assert_eq!(r.operating.t_top_c, FALLBACK_T_TOP_C);
        assert_eq!(r.operating.t_bottom_c, FALLBACK_T_BOTTOM_C);
        assert_eq!(r.operating.rho_v_top, FALLBACK_RHO_V);
        assert_eq!(r.operating.rho_l_top, FALLBACK_RHO_L);
        assert!(r.operating.t_top_auto_c.is_none());
        assert!(!r.equations_used.contains(&Equation::SaturationTemperature));
        // 0.95 * 78 + 0.05 * 92
        assert!((r.drum.distillate_molar_mass - 78.7).abs() < 1e-9);
    }

    #[test]
    fn test_overrides_are_independent() {
        let inputs = DesignInputs {
            t_top_c: Some(NumericInput::from(90.0)),
            rho_l_top: Some("800".into()),
            ..DesignInputs::default()
        };
        let r = design_distillation_column(&inputs);
        assert_eq!(r.operating.t_top_c, 90.0);
        assert_eq!(r.operating.rho_l_top, 800.0);
        // Not overridden: pack values still used
        assert_eq!(r.operating.t_bottom_c, r.operating.t_bottom_auto_c.unwrap());
        assert_eq!(r.operating.rho_v_top, r.operating.rho_v_auto.unwrap());
        assert_ne!(r.operating.t_top_auto_c, Some(90.0));
    }

    #[test]
    fn test_equal_purities_zero_distillate() {
        let inputs = DesignInputs {
            x_d: Some(NumericInput::from(0.5)),
            x_b: Some(NumericInput::from(0.5)),
            ..DesignInputs::default()
        };
        let r = design_distillation_column(&inputs);
        assert_eq!(r.balance.distillate, 0.0);
        assert_eq!(r.balance.bottoms, 100.0);
    }

    #[test]
    fn test_equations_used_in_pipeline_order() {
        let r = default_design();
        let pos = |eq| r.equations_used.iter().position(|e| *e == eq).unwrap();
        assert!(pos(Equation::SaturationTemperature) < pos(Equation::FenskeMinimumStages));
        assert!(pos(Equation::GillilandStages) < pos(Equation::LeverRuleBalance));
        assert!(pos(Equation::ColumnDiameter) < pos(Equation::CondenserDuty));

        let mut deduped = r.equations_used.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), r.equations_used.len());
    }

    #[test]
    fn test_result_json_roundtrip() {
        let r = default_design();
        let json = serde_json::to_string(&r).unwrap();
        let back: DesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fug, r.fug);
        assert_eq!(back.hydraulics.trays, r.hydraulics.trays);
        assert_eq!(back.equations_used, r.equations_used);
    }

    #[test]
    fn test_bad_specs_serializes_nulls() {
        let inputs = DesignInputs {
            z_f: Some(NumericInput::from(1.0)),
            ..DesignInputs::default()
        };
        let value = serde_json::to_value(design_distillation_column(&inputs)).unwrap();
        assert!(value["fug"]["min_reflux"].is_null());
        assert!(value["hydraulics"]["diameter_m"].is_null());
        assert_eq!(value["bad_specs"], serde_json::Value::Bool(true));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn inputs_for(feed: f64, x_b: f64, z_f: f64, x_d: f64) -> DesignInputs {
        DesignInputs {
            feed_flow: Some(NumericInput::from(feed)),
            z_f: Some(NumericInput::from(z_f)),
            x_d: Some(NumericInput::from(x_d)),
            x_b: Some(NumericInput::from(x_b)),
            ..DesignInputs::default()
        }
    }

    proptest! {
        #[test]
        fn mass_balance_closes(
            feed in 1.0_f64..1000.0,
            x_b in 0.001_f64..0.3,
            z_gap in 0.01_f64..0.3,
            d_gap in 0.01_f64..0.3,
        ) {
            let z_f = x_b + z_gap;
            let x_d = (z_f + d_gap).min(0.999);
            prop_assume!(x_d > z_f);

            let r = design_distillation_column(&inputs_for(feed, x_b, z_f, x_d));
            let total = r.balance.distillate + r.balance.bottoms;
            prop_assert!((total - feed).abs() <= 1e-9 * feed, "D + B = {} vs F = {}", total, feed);
        }

        #[test]
        fn design_is_idempotent(
            alpha in 1.1_f64..6.0,
            q in 0.0_f64..1.2,
            z_f in 0.1_f64..0.9,
            packed in any::<bool>(),
        ) {
            let inputs = DesignInputs {
                alpha: Some(NumericInput::from(alpha)),
                q: Some(NumericInput::from(q)),
                z_f: Some(NumericInput::from(z_f)),
                internals: if packed { Internals::Packing } else { Internals::Trays },
                ..DesignInputs::default()
            };
            let first = design_distillation_column(&inputs);
            let second = design_distillation_column(&inputs);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }

        #[test]
        fn stages_never_below_minimum(
            alpha in 1.2_f64..6.0,
            rr in 1.05_f64..3.0,
        ) {
            let inputs = DesignInputs {
                alpha: Some(NumericInput::from(alpha)),
                reflux_factor: Some(NumericInput::from(rr)),
                ..DesignInputs::default()
            };
            let r = design_distillation_column(&inputs);
            if let Some(n) = r.fug.theoretical_stages {
                prop_assert!(n >= r.fug.min_stages);
            }
        }

        #[test]
        fn one_internals_path(packed in any::<bool>(), alpha in 1.1_f64..6.0) {
            let internals = if packed { Internals::Packing } else { Internals::Trays };
            let inputs = DesignInputs {
                alpha: Some(NumericInput::from(alpha)),
                internals,
                ..DesignInputs::default()
            };
            let r = design_distillation_column(&inputs);
            prop_assert!(!(r.hydraulics.trays.is_some() && r.hydraulics.packing.is_some()));
            if r.fug.theoretical_stages.is_some() {
                prop_assert_eq!(r.hydraulics.packing.is_some(), packed);
                prop_assert_eq!(r.hydraulics.trays.is_some(), !packed);
            }
        }
    }
}
