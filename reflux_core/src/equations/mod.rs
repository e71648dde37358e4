//! # Process Engineering Equations
//!
//! All correlations used by the column design pipeline and the relief
//! sizer live here as plain functions on `f64` or unit newtypes. Having
//! them in one place enables:
//! - Easy verification against literature (Fenske, Underwood, API 520/521)
//! - Documentation of guards and floors next to each formula
//! - Consistent implementation across calculation types
//!
//! ## Modules
//!
//! - [`vle`] - Antoine vapor pressure, saturation temperature, phase densities
//! - [`fug`] - Fenske, Underwood and Gilliland shortcut design
//! - [`column`] - Material balance, vapor traffic, diameter and height
//! - [`heat_transfer`] - LMTD, exchanger area, utilities, reflux drum
//! - [`relief`] - API 520/521 fire-case relief sizing
//! - [`registry`] - Equation metadata and tracking for the datasheet appendix
//!
//! ## Conventions
//!
//! - **Compositions**: light-key mole fractions
//! - **Flows**: kmol/h unless stated otherwise
//! - **Pressure**: kPa absolute at the API; mmHg inside Antoine
//! - **Duties**: kJ/h, converted to W only for area

pub mod column;
pub mod fug;
pub mod heat_transfer;
pub mod registry;
pub mod relief;
pub mod vle;

// Re-export commonly used items
pub use vle::{
    antoine_vapor_pressure,
    ideal_gas_density,
    ideal_gas_volumetric_flow,
    mixture_liquid_density,
    raoult_total_pressure,
    saturation_temperature,
};

pub use fug::{
    fenske_min_stages,
    gilliland_stages,
    underwood_function,
    underwood_min_reflux,
    underwood_theta,
};

pub use column::{
    actual_trays,
    bottoms_from_balance,
    circular_diameter,
    lever_rule_distillate,
    overhead_vapor,
    packed_height,
    souders_brown_velocity,
};

pub use heat_transfer::{
    condenser_lmtd,
    cooling_water_flow,
    exchanger_area,
    lmtd,
    reboiler_delta_t,
    reflux_drum_volume,
    steam_flow,
};

pub use relief::{
    critical_flow_coefficient,
    fire_heat_input,
    liquid_mass_flux,
    select_orifice,
    vapor_mass_flux,
    Orifice,
    API_526_ORIFICES,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
    generate_static_equations_appendix_typst,
};
