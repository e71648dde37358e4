//! # Equation Registry
//!
//! Central registry of every correlation the design pipeline and the relief
//! sizer apply. Each equation has metadata including literature references,
//! formulas, and variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for the datasheet appendix and audit trails
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use reflux_core::equations::registry::{Equation, EquationTracker};
//!
//! // Track equation usage during a calculation
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::FenskeMinimumStages, "FUG");
//!
//! // Get metadata for the appendix
//! let meta = Equation::FenskeMinimumStages.metadata();
//! assert!(meta.formula_plain.contains("ln(alpha)"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Literature References
// ============================================================================

/// Source of a correlation.
///
/// All equations cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// Journal paper or monograph
    Literature {
        author: &'static str,
        year: u16,
        source: &'static str,
    },
    /// API recommended practice or standard
    Api {
        standard: &'static str,
        edition: u8,
        section: &'static str,
    },
    /// Perry's Chemical Engineers' Handbook
    Perry {
        edition: u8,
        section: &'static str,
    },
    /// Textbook thermodynamics or balance (no specific reference needed)
    Fundamentals,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Literature { author, year, source } => {
                format!("{} ({}), {}", author, year, source)
            }
            CodeReference::Api { standard, edition, section } => {
                format!("API {} {}ed, {}", standard, edition, section)
            }
            CodeReference::Perry { edition, section } => {
                format!("Perry's Handbook {}ed, Sec. {}", edition, section)
            }
            CodeReference::Fundamentals => "Fundamental Thermodynamics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Literature { author, .. } => *author,
            CodeReference::Api { .. } => "API",
            CodeReference::Perry { .. } => "Perry's",
            CodeReference::Fundamentals => "Fundamentals",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Vapor pressure, saturation temperature, phase densities
    PhaseEquilibrium,
    /// Fenske, Underwood, Gilliland
    ShortcutDesign,
    /// Overall balance and vapor traffic
    MaterialBalance,
    /// Shell diameter, height and pressure drop
    Hydraulics,
    /// Condenser and reboiler duties
    HeatDuties,
    /// LMTD and exchanger area
    HeatExchange,
    /// Cooling water, steam and reflux drum
    Utilities,
    /// Relief valve sizing
    PressureRelief,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::PhaseEquilibrium => "Phase Equilibrium",
            EquationCategory::ShortcutDesign => "Shortcut Design (FUG)",
            EquationCategory::MaterialBalance => "Material Balance",
            EquationCategory::Hydraulics => "Hydraulics",
            EquationCategory::HeatDuties => "Heat Duties",
            EquationCategory::HeatExchange => "Heat Exchange",
            EquationCategory::Utilities => "Utilities",
            EquationCategory::PressureRelief => "Pressure Relief",
        }
    }

    /// Sort order for the appendix (lower = earlier), follows pipeline order
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::PhaseEquilibrium => 1,
            EquationCategory::ShortcutDesign => 2,
            EquationCategory::MaterialBalance => 3,
            EquationCategory::Hydraulics => 4,
            EquationCategory::HeatDuties => 5,
            EquationCategory::HeatExchange => 6,
            EquationCategory::Utilities => 7,
            EquationCategory::PressureRelief => 8,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
///
/// `symbol` is written in Typst math syntax; multi-letter subscripts are
/// quoted so Typst does not read them as identifiers.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }

    /// Symbol with Typst quoting removed, for plain-text output
    pub fn plain_symbol(&self) -> String {
        self.symbol.replace('"', "")
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one correlation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Fenske Minimum Stages")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in Typst math notation for PDF rendering
    pub formula_typst: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    /// Literature reference
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation (for linking)
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All correlations used by Reflux.
///
/// Each variant maps to a specific formula with full metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Phase Equilibrium
    // -------------------------------------------------------------------------
    /// log10(Psat) = A - B/(T + C)
    AntoineVaporPressure,
    /// x·Psat_LK(T) + (1-x)·Psat_HK(T) = P
    SaturationTemperature,
    /// ρV = P·MW/(R·T)
    IdealGasVaporDensity,
    /// ρL = x·ρLK + (1-x)·ρHK
    MixtureLiquidDensity,

    // -------------------------------------------------------------------------
    // Shortcut Design
    // -------------------------------------------------------------------------
    FenskeMinimumStages,
    UnderwoodTheta,
    UnderwoodMinimumReflux,
    /// R = RR·Rmin
    OperatingReflux,
    GillilandStages,

    // -------------------------------------------------------------------------
    // Material Balance
    // -------------------------------------------------------------------------
    LeverRuleBalance,
    /// V = (R+1)·D
    OverheadVapor,
    IdealGasVolumetricFlow,

    // -------------------------------------------------------------------------
    // Hydraulics
    // -------------------------------------------------------------------------
    SoudersBrownVelocity,
    ColumnDiameter,
    /// Trays: ceil(N/E), height and ΔP
    TrayColumnHeight,
    /// Packing: N·HETP and ΔP
    PackedBedHeight,

    // -------------------------------------------------------------------------
    // Heat Duties
    // -------------------------------------------------------------------------
    CondenserDuty,
    ReboilerDuty,

    // -------------------------------------------------------------------------
    // Heat Exchange
    // -------------------------------------------------------------------------
    LogMeanTemperatureDifference,
    ReboilerDrivingForce,
    ExchangerArea,

    // -------------------------------------------------------------------------
    // Utilities
    // -------------------------------------------------------------------------
    CoolingWaterFlow,
    SteamFlow,
    RefluxDrumVolume,

    // -------------------------------------------------------------------------
    // Pressure Relief
    // -------------------------------------------------------------------------
    FireHeatInput,
    ReliefMassRate,
    VaporReliefArea,
    LiquidReliefArea,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Phase equilibrium
            Equation::AntoineVaporPressure => EquationMetadata {
                name: "Antoine Vapor Pressure",
                description: "Pure-component vapor pressure as a function of temperature",
                formula_typst: r#"$log_(10) P^"sat" = A - B / (T + C)$"#,
                formula_plain: "log10(Psat) = A - B/(T + C)",
                reference: CodeReference::Literature {
                    author: "Antoine",
                    year: 1888,
                    source: "C. R. Acad. Sci. 107",
                },
                variables: vec![
                    Variable::new(r#"P^"sat""#, "Vapor pressure", "mmHg"),
                    Variable::new("T", "Temperature", "°C"),
                    Variable::new("A", "Antoine constant", "—"),
                    Variable::new("B", "Antoine constant", "°C"),
                    Variable::new("C", "Antoine constant", "°C"),
                ],
                assumptions: vec!["Constants valid near the normal boiling range"],
                category: EquationCategory::PhaseEquilibrium,
                source_module: "equations/vle.rs",
                source_function: "antoine_vapor_pressure",
            },

            Equation::SaturationTemperature => EquationMetadata {
                name: "Binary Saturation Temperature",
                description: "Temperature at which an ideal binary liquid boils at the column pressure",
                formula_typst: r#"$x P^"sat"_"LK" (T) + (1 - x) P^"sat"_"HK" (T) = P$"#,
                formula_plain: "x·Psat_LK(T) + (1 - x)·Psat_HK(T) = P",
                reference: CodeReference::Perry { edition: 8, section: "13" },
                variables: vec![
                    Variable::new("x", "Light-key liquid mole fraction (xD at top, xB at bottom)", "—"),
                    Variable::new("P", "Column pressure", "mmHg"),
                    Variable::new("T", "Saturation temperature", "°C"),
                ],
                assumptions: vec![
                    "Raoult's law (ideal liquid and vapor)",
                    "Solved by bisection on [-10, 200] °C, 70 halvings",
                ],
                category: EquationCategory::PhaseEquilibrium,
                source_module: "equations/vle.rs",
                source_function: "saturation_temperature",
            },

            Equation::IdealGasVaporDensity => EquationMetadata {
                name: "Ideal-Gas Vapor Density",
                description: "Overhead vapor density at top temperature and pressure",
                formula_typst: r#"$rho_V = (P dot.c M) / (R T)$"#,
                formula_plain: "rhoV = P·MW/(R·T)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("rho_V", "Vapor density", "kg/m³"),
                    Variable::new("P", "Absolute pressure", "Pa"),
                    Variable::new("M", "Vapor molar mass", "kg/mol"),
                    Variable::new("R", "Gas constant, 8.314", "J/(mol·K)"),
                    Variable::new("T", "Absolute temperature", "K"),
                ],
                assumptions: vec!["Ideal gas"],
                category: EquationCategory::PhaseEquilibrium,
                source_module: "equations/vle.rs",
                source_function: "ideal_gas_density",
            },

            Equation::MixtureLiquidDensity => EquationMetadata {
                name: "Mixture Liquid Density",
                description: "Mole-fraction-weighted liquid density at the distillate composition",
                formula_typst: r#"$rho_L = x_D rho_"LK" + (1 - x_D) rho_"HK"$"#,
                formula_plain: "rhoL = xD·rho_LK + (1 - xD)·rho_HK",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("rho_L", "Liquid density", "kg/m³"),
                    Variable::new("x_D", "Distillate light-key mole fraction", "—"),
                ],
                assumptions: vec!["Linear mixing rule on a mole basis"],
                category: EquationCategory::PhaseEquilibrium,
                source_module: "equations/vle.rs",
                source_function: "mixture_liquid_density",
            },

            // Shortcut design
            Equation::FenskeMinimumStages => EquationMetadata {
                name: "Fenske Minimum Stages",
                description: "Theoretical stages at total reflux",
                formula_typst: r#"$N_min = ln((x_D / (1 - x_D)) ((1 - x_B) / x_B)) / ln(alpha)$"#,
                formula_plain: "Nmin = ln[(xD/(1-xD))·((1-xB)/xB)] / ln(alpha)",
                reference: CodeReference::Literature {
                    author: "Fenske",
                    year: 1932,
                    source: "Ind. Eng. Chem. 24, 482",
                },
                variables: vec![
                    Variable::new("N_min", "Minimum theoretical stages", "—"),
                    Variable::new("x_D", "Distillate light-key mole fraction", "—"),
                    Variable::new("x_B", "Bottoms light-key mole fraction", "—"),
                    Variable::new("alpha", "Relative volatility LK/HK", "—"),
                ],
                assumptions: vec!["Constant relative volatility", "alpha floored at 1.001", "Nmin floored at 0"],
                category: EquationCategory::ShortcutDesign,
                source_module: "equations/fug.rs",
                source_function: "fenske_min_stages",
            },

            Equation::UnderwoodTheta => EquationMetadata {
                name: "Underwood Root",
                description: "Common root theta between the key volatilities",
                formula_typst: r#"$q (z_F / (alpha - theta) + (1 - z_F) / (1 - theta)) - 1 = 0$"#,
                formula_plain: "q·(zF/(alpha - theta) + (1 - zF)/(1 - theta)) - 1 = 0",
                reference: CodeReference::Literature {
                    author: "Underwood",
                    year: 1948,
                    source: "Chem. Eng. Prog. 44, 603",
                },
                variables: vec![
                    Variable::new("theta", "Underwood root, 0 < theta < 1", "—"),
                    Variable::new("q", "Feed quality (liquid fraction)", "—"),
                    Variable::new("z_F", "Feed light-key mole fraction", "—"),
                    Variable::new("alpha", "Relative volatility", "—"),
                ],
                assumptions: vec![
                    "Root sought by bisection, 100 iterations, stops once |f| falls below 1e-10",
                    "No sign change on (0, 1) flags the specification as ill-posed",
                ],
                category: EquationCategory::ShortcutDesign,
                source_module: "equations/fug.rs",
                source_function: "underwood_theta",
            },

            Equation::UnderwoodMinimumReflux => EquationMetadata {
                name: "Underwood Minimum Reflux",
                description: "Minimum reflux ratio from the Underwood root",
                formula_typst: r#"$R_min = (x_D alpha) / (alpha - theta) + (1 - x_D) / (1 - theta) - 1$"#,
                formula_plain: "Rmin = xD·alpha/(alpha - theta) + (1 - xD)/(1 - theta) - 1",
                reference: CodeReference::Literature {
                    author: "Underwood",
                    year: 1948,
                    source: "Chem. Eng. Prog. 44, 603",
                },
                variables: vec![
                    Variable::new("R_min", "Minimum reflux ratio", "—"),
                    Variable::new("x_D", "Distillate light-key mole fraction", "—"),
                    Variable::new("theta", "Underwood root", "—"),
                ],
                assumptions: vec!["Non-positive or non-finite results are treated as unavailable"],
                category: EquationCategory::ShortcutDesign,
                source_module: "equations/fug.rs",
                source_function: "underwood_min_reflux",
            },

            Equation::OperatingReflux => EquationMetadata {
                name: "Operating Reflux Ratio",
                description: "Design reflux as a multiple of the minimum",
                formula_typst: r#"$R = "RR" dot.c R_min$"#,
                formula_plain: "R = RR·Rmin",
                reference: CodeReference::Perry { edition: 8, section: "13" },
                variables: vec![
                    Variable::new("R", "Operating reflux ratio", "—"),
                    Variable::new(r#""RR""#, "Reflux factor, at least 1.05", "—"),
                ],
                assumptions: vec!["Typical economic optimum lies at RR = 1.1 to 1.5"],
                category: EquationCategory::ShortcutDesign,
                source_module: "calculations/distillation/mod.rs",
                source_function: "design_from_normalized",
            },

            Equation::GillilandStages => EquationMetadata {
                name: "Gilliland Correlation (Molokanov)",
                description: "Theoretical stages at the operating reflux",
                formula_typst: r#"$Y = (R - R_min) / (R + 1)$, $X = 1 - exp(((1 + 54.4 Y) / (11 + 117.2 Y)) (Y - 1))$, $N = (N_min + X) / (1 - X)$"#,
                formula_plain: "Y = (R - Rmin)/(R + 1), X = 1 - exp[((1 + 54.4Y)/(11 + 117.2Y))·(Y - 1)], N = (Nmin + X)/(1 - X)",
                reference: CodeReference::Literature {
                    author: "Molokanov et al.",
                    year: 1972,
                    source: "Int. Chem. Eng. 12, 209",
                },
                variables: vec![
                    Variable::new("N", "Theoretical stages", "—"),
                    Variable::new("N_min", "Minimum stages (Fenske)", "—"),
                    Variable::new("R", "Operating reflux ratio", "—"),
                    Variable::new("R_min", "Minimum reflux ratio", "—"),
                ],
                assumptions: vec!["N is never reported below Nmin"],
                category: EquationCategory::ShortcutDesign,
                source_module: "equations/fug.rs",
                source_function: "gilliland_stages",
            },

            // Material balance
            Equation::LeverRuleBalance => EquationMetadata {
                name: "Overall Material Balance",
                description: "Distillate and bottoms flows from the light-key balance (lever rule)",
                formula_typst: r#"$D = F (z_F - x_B) / (x_D - x_B)$, $B = F - D$"#,
                formula_plain: "D = F·(zF - xB)/(xD - xB), B = F - D",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("F", "Feed flow", "kmol/h"),
                    Variable::new("D", "Distillate flow", "kmol/h"),
                    Variable::new("B", "Bottoms flow", "kmol/h"),
                ],
                assumptions: vec!["D = 0 when xD = xB", "B floored at 0"],
                category: EquationCategory::MaterialBalance,
                source_module: "equations/column.rs",
                source_function: "lever_rule_distillate",
            },

            Equation::OverheadVapor => EquationMetadata {
                name: "Overhead Vapor Traffic",
                description: "Vapor leaving the top stage with a total condenser",
                formula_typst: r#"$V = (R + 1) D$"#,
                formula_plain: "V = (R + 1)·D",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("V", "Overhead vapor flow", "kmol/h"),
                    Variable::new("R", "Operating reflux ratio", "—"),
                    Variable::new("D", "Distillate flow", "kmol/h"),
                ],
                assumptions: vec!["Total condenser", "Constant molar overflow"],
                category: EquationCategory::MaterialBalance,
                source_module: "equations/column.rs",
                source_function: "overhead_vapor",
            },

            Equation::IdealGasVolumetricFlow => EquationMetadata {
                name: "Vapor Volumetric Flow",
                description: "Actual volumetric vapor flow at top conditions",
                formula_typst: r#"$dot(V) = (dot(n) R T) / P$"#,
                formula_plain: "Vdot = n·R·T/P",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("dot(V)", "Volumetric flow", "m³/s"),
                    Variable::new("dot(n)", "Molar flow", "mol/s"),
                ],
                assumptions: vec!["Ideal gas at top temperature and pressure"],
                category: EquationCategory::MaterialBalance,
                source_module: "equations/vle.rs",
                source_function: "ideal_gas_volumetric_flow",
            },

            // Hydraulics
            Equation::SoudersBrownVelocity => EquationMetadata {
                name: "Souders-Brown Allowable Velocity",
                description: "Design superficial vapor velocity at the selected approach to flood",
                formula_typst: r#"$u = K_"SB" sqrt((rho_L - rho_V) / rho_V) dot.c f$"#,
                formula_plain: "u = Ksb·sqrt((rhoL - rhoV)/rhoV)·f",
                reference: CodeReference::Literature {
                    author: "Souders & Brown",
                    year: 1934,
                    source: "Ind. Eng. Chem. 26, 98",
                },
                variables: vec![
                    Variable::new("u", "Allowable vapor velocity", "m/s"),
                    Variable::new(r#"K_"SB""#, "Capacity factor", "m/s"),
                    Variable::new("f", "Design fraction of flood", "—"),
                ],
                assumptions: vec!["Density difference floored at 1 kg/m³"],
                category: EquationCategory::Hydraulics,
                source_module: "equations/column.rs",
                source_function: "souders_brown_velocity",
            },

            Equation::ColumnDiameter => EquationMetadata {
                name: "Column Diameter",
                description: "Shell inside diameter from the required free area",
                formula_typst: r#"$A = dot(V) / u$, $D_c = sqrt(4 A / pi)$"#,
                formula_plain: "A = Vdot/u, Dc = sqrt(4A/pi)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("A", "Cross-sectional area", "m²"),
                    Variable::new("D_c", "Column diameter", "m"),
                ],
                assumptions: vec!["Whole cross-section active (no downcomer allowance)"],
                category: EquationCategory::Hydraulics,
                source_module: "equations/column.rs",
                source_function: "circular_diameter",
            },

            Equation::TrayColumnHeight => EquationMetadata {
                name: "Tray Count, Height and Pressure Drop",
                description: "Real trays from overall efficiency, with tangent height and column pressure drop",
                formula_typst: r#"$N_"act" = ceil(N / E)$, $H = N_"act" S$, $Delta P = N_"act" Delta p$"#,
                formula_plain: "Nact = ceil(N/E), H = Nact·S, dP = Nact·dp_tray",
                reference: CodeReference::Perry { edition: 8, section: "14" },
                variables: vec![
                    Variable::new("E", "Murphree tray efficiency", "—"),
                    Variable::new("S", "Tray spacing", "m"),
                    Variable::new("Delta p", "Pressure drop per tray", "mbar"),
                ],
                assumptions: vec!["Efficiency applied as an overall column efficiency"],
                category: EquationCategory::Hydraulics,
                source_module: "equations/column.rs",
                source_function: "actual_trays",
            },

            Equation::PackedBedHeight => EquationMetadata {
                name: "Packed Height and Pressure Drop",
                description: "Packed bed height from HETP and bed pressure drop",
                formula_typst: r#"$H = N dot.c "HETP"$, $Delta P = H Delta p$"#,
                formula_plain: "H = N·HETP, dP = H·dp_m",
                reference: CodeReference::Perry { edition: 8, section: "14" },
                variables: vec![
                    Variable::new(r#""HETP""#, "Height equivalent to a theoretical plate", "m"),
                    Variable::new("Delta p", "Pressure drop per metre of packing", "mbar/m"),
                ],
                assumptions: vec!["Constant HETP over the bed"],
                category: EquationCategory::Hydraulics,
                source_module: "equations/column.rs",
                source_function: "packed_height",
            },

            // Heat duties
            Equation::CondenserDuty => EquationMetadata {
                name: "Condenser Duty",
                description: "Heat removed condensing the overhead vapor",
                formula_typst: r#"$Q_c = V (x_D lambda_"LK" M_"LK" + (1 - x_D) lambda_"HK" M_"HK")$"#,
                formula_plain: "Qc = V·(xD·lambda_LK·MW_LK + (1 - xD)·lambda_HK·MW_HK)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("Q_c", "Condenser duty", "kJ/h"),
                    Variable::new("lambda", "Latent heat", "kJ/kg"),
                    Variable::new("M", "Molar mass", "kg/kmol"),
                ],
                assumptions: vec!["Saturated reflux, no subcooling"],
                category: EquationCategory::HeatDuties,
                source_module: "properties/mod.rs",
                source_function: "mixture_latent_heat_kj_kmol",
            },

            Equation::ReboilerDuty => EquationMetadata {
                name: "Reboiler Duty",
                description: "Heat supplied to generate boil-up",
                formula_typst: r#"$Q_r = (V + B) (x_B lambda_"LK" M_"LK" + (1 - x_B) lambda_"HK" M_"HK")$"#,
                formula_plain: "Qr = (V + B)·(xB·lambda_LK·MW_LK + (1 - xB)·lambda_HK·MW_HK)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("Q_r", "Reboiler duty", "kJ/h"),
                    Variable::new("B", "Bottoms flow", "kmol/h"),
                ],
                assumptions: vec!["Latent heat at bottoms composition"],
                category: EquationCategory::HeatDuties,
                source_module: "properties/mod.rs",
                source_function: "mixture_latent_heat_kj_kmol",
            },

            // Heat exchange
            Equation::LogMeanTemperatureDifference => EquationMetadata {
                name: "Log-Mean Temperature Difference",
                description: "Counter-current driving force of the condenser against cooling water",
                formula_typst: r#"$"LMTD" = (Delta T_1 - Delta T_2) / ln(Delta T_1 / Delta T_2)$"#,
                formula_plain: "LMTD = (dT1 - dT2)/ln(dT1/dT2)",
                reference: CodeReference::Literature {
                    author: "Kern",
                    year: 1950,
                    source: "Process Heat Transfer, Ch. 5",
                },
                variables: vec![
                    Variable::new("Delta T_1", "Top temperature minus CW outlet", "K"),
                    Variable::new("Delta T_2", "Top temperature minus CW inlet", "K"),
                ],
                assumptions: vec![
                    "Terminal differences floored at 0.1 K",
                    "Equal differences (within 1e-6) give LMTD = dT1",
                ],
                category: EquationCategory::HeatExchange,
                source_module: "equations/heat_transfer.rs",
                source_function: "lmtd",
            },

            Equation::ReboilerDrivingForce => EquationMetadata {
                name: "Reboiler Driving Force",
                description: "Flat temperature difference against isothermal condensing steam",
                formula_typst: r#"$Delta T_r = T_"sat" - T_"bot"$"#,
                formula_plain: "dTr = Tsat - Tbot",
                reference: CodeReference::Perry { edition: 8, section: "11" },
                variables: vec![
                    Variable::new(r#"T_"sat""#, "Steam saturation temperature", "°C"),
                    Variable::new(r#"T_"bot""#, "Column bottom temperature", "°C"),
                ],
                assumptions: vec!["Steam side isothermal", "Floored at 0.1 K"],
                category: EquationCategory::HeatExchange,
                source_module: "equations/heat_transfer.rs",
                source_function: "reboiler_delta_t",
            },

            Equation::ExchangerArea => EquationMetadata {
                name: "Exchanger Area",
                description: "Required heat-transfer area for a duty and driving force",
                formula_typst: r#"$A = Q / (U Delta T)$"#,
                formula_plain: "A = Q/(U·dT)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("Q", "Duty", "W"),
                    Variable::new("U", "Overall heat-transfer coefficient", "W/(m²·K)"),
                    Variable::new("A", "Area", "m²"),
                ],
                assumptions: vec!["No fouling margin"],
                category: EquationCategory::HeatExchange,
                source_module: "equations/heat_transfer.rs",
                source_function: "exchanger_area",
            },

            // Utilities
            Equation::CoolingWaterFlow => EquationMetadata {
                name: "Cooling Water Flow",
                description: "Cooling water needed to absorb the condenser duty",
                formula_typst: r#"$dot(m)_"cw" = Q_c / (c_p Delta T_"cw")$"#,
                formula_plain: "m_cw = Qc/(cp·dT_cw)",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new(r#"dot(m)_"cw""#, "Cooling water flow", "kg/h"),
                    Variable::new("c_p", "Water heat capacity, 4.18", "kJ/(kg·K)"),
                    Variable::new(r#"Delta T_"cw""#, "Cooling water temperature rise", "K"),
                ],
                assumptions: vec!["Zero when the rise is not positive"],
                category: EquationCategory::Utilities,
                source_module: "equations/heat_transfer.rs",
                source_function: "cooling_water_flow",
            },

            Equation::SteamFlow => EquationMetadata {
                name: "Steam Consumption",
                description: "Condensing steam needed for the reboiler duty",
                formula_typst: r#"$dot(m)_s = Q_r / lambda_s$"#,
                formula_plain: "m_s = Qr/lambda_s",
                reference: CodeReference::Fundamentals,
                variables: vec![
                    Variable::new("dot(m)_s", "Steam flow", "kg/h"),
                    Variable::new("lambda_s", "Steam latent heat", "kJ/kg"),
                ],
                assumptions: vec!["Saturated steam, condensate leaves saturated"],
                category: EquationCategory::Utilities,
                source_module: "equations/heat_transfer.rs",
                source_function: "steam_flow",
            },

            Equation::RefluxDrumVolume => EquationMetadata {
                name: "Reflux Drum Volume",
                description: "Working volume for the selected holdup time on distillate",
                formula_typst: r#"$V_"drum" = (D M_D) / rho_D dot.c t_h / 60$"#,
                formula_plain: "V_drum = (D·MW_D/rho_D)·(t_h/60)",
                reference: CodeReference::Perry { edition: 8, section: "14" },
                variables: vec![
                    Variable::new("M_D", "Distillate molar mass", "kg/kmol"),
                    Variable::new("rho_D", "Distillate density", "kg/m³"),
                    Variable::new("t_h", "Holdup time", "min"),
                ],
                assumptions: vec!["Holdup on distillate flow only"],
                category: EquationCategory::Utilities,
                source_module: "equations/heat_transfer.rs",
                source_function: "reflux_drum_volume",
            },

            // Pressure relief
            Equation::FireHeatInput => EquationMetadata {
                name: "Fire Heat Input",
                description: "Heat absorbed by a wetted vessel exposed to a pool fire",
                formula_typst: r#"$Q = 1160 F A_"wet"^0.82$"#,
                formula_plain: "Q = 1160·F·A_wet^0.82",
                reference: CodeReference::Api { standard: "521", edition: 6, section: "Eq. (7)" },
                variables: vec![
                    Variable::new("Q", "Heat input", "W"),
                    Variable::new("F", "Environment factor", "—"),
                    Variable::new(r#"A_"wet""#, "Wetted area", "m²"),
                ],
                assumptions: vec!["Adequate drainage and firefighting"],
                category: EquationCategory::PressureRelief,
                source_module: "equations/relief.rs",
                source_function: "fire_heat_input",
            },

            Equation::ReliefMassRate => EquationMetadata {
                name: "Required Relief Rate",
                description: "Vapor generated by the fire heat input",
                formula_typst: r#"$dot(m) = Q / lambda$"#,
                formula_plain: "m = Q/lambda",
                reference: CodeReference::Api { standard: "521", edition: 6, section: "4.4.13" },
                variables: vec![
                    Variable::new("dot(m)", "Relief rate", "kg/s"),
                    Variable::new("lambda", "Latent heat at relieving conditions", "J/kg"),
                ],
                assumptions: vec!["All heat input goes to vaporization"],
                category: EquationCategory::PressureRelief,
                source_module: "calculations/psv.rs",
                source_function: "calculate",
            },

            Equation::VaporReliefArea => EquationMetadata {
                name: "Vapor Relief Area (Critical Flow)",
                description: "Effective orifice area for choked vapor flow",
                formula_typst: r#"$A = dot(m) / (K_d K_b K_c P_1 C_k sqrt(k / (R_"eff" T)))$, $C_k = sqrt(k) (2 / (k + 1))^((k + 1) / (2 (k - 1)))$"#,
                formula_plain: "A = m/(Kd·Kb·Kc·P1·Ck·sqrt(k/(R_eff·T))), Ck = sqrt(k)·(2/(k+1))^((k+1)/(2(k-1)))",
                reference: CodeReference::Api { standard: "520 Part I", edition: 9, section: "5.6.3" },
                variables: vec![
                    Variable::new("P_1", "Relieving pressure", "Pa abs"),
                    Variable::new("k", "Specific heat ratio", "—"),
                    Variable::new(r#"R_"eff""#, "Specific gas constant over Z", "J/(kg·K)"),
                    Variable::new("T", "Relieving temperature", "K"),
                ],
                assumptions: vec!["Critical (choked) flow", "Ideal-gas k"],
                category: EquationCategory::PressureRelief,
                source_module: "equations/relief.rs",
                source_function: "vapor_mass_flux",
            },

            Equation::LiquidReliefArea => EquationMetadata {
                name: "Liquid Relief Area",
                description: "Effective orifice area for non-viscous liquid flow",
                formula_typst: r#"$A = dot(m) / (K_d K_c sqrt(2 rho Delta P))$"#,
                formula_plain: "A = m/(Kd·Kc·sqrt(2·rho·dP))",
                reference: CodeReference::Api { standard: "520 Part I", edition: 9, section: "5.8" },
                variables: vec![
                    Variable::new("rho", "Liquid density", "kg/m³"),
                    Variable::new("Delta P", "Relieving minus back pressure", "Pa"),
                ],
                assumptions: vec!["Viscosity correction taken as 1"],
                category: EquationCategory::PressureRelief,
                source_module: "equations/relief.rs",
                source_function: "liquid_mass_flux",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            PhaseEquilibrium,
            ShortcutDesign,
            MaterialBalance,
            Hydraulics,
            HeatDuties,
            HeatExchange,
            Utilities,
            PressureRelief,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::AntoineVaporPressure,
    Equation::SaturationTemperature,
    Equation::IdealGasVaporDensity,
    Equation::MixtureLiquidDensity,
    Equation::FenskeMinimumStages,
    Equation::UnderwoodTheta,
    Equation::UnderwoodMinimumReflux,
    Equation::OperatingReflux,
    Equation::GillilandStages,
    Equation::LeverRuleBalance,
    Equation::OverheadVapor,
    Equation::IdealGasVolumetricFlow,
    Equation::SoudersBrownVelocity,
    Equation::ColumnDiameter,
    Equation::TrayColumnHeight,
    Equation::PackedBedHeight,
    Equation::CondenserDuty,
    Equation::ReboilerDuty,
    Equation::LogMeanTemperatureDifference,
    Equation::ReboilerDrivingForce,
    Equation::ExchangerArea,
    Equation::CoolingWaterFlow,
    Equation::SteamFlow,
    Equation::RefluxDrumVolume,
    Equation::FireHeatInput,
    Equation::ReliefMassRate,
    Equation::VaporReliefArea,
    Equation::LiquidReliefArea,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied during a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where it was applied (e.g., "column top", "condenser")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation for appendix generation
    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Group unique equations by category for appendix
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

impl FromIterator<Equation> for EquationTracker {
    fn from_iter<I: IntoIterator<Item = Equation>>(iter: I) -> Self {
        let mut tracker = EquationTracker::new();
        for eq in iter {
            tracker.record(eq, "");
        }
        tracker
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Generate Typst markup for the "List of Equations" appendix.
    ///
    /// Organized by category in pipeline order; each unique equation shows
    /// its formula, reference, variables and where it was applied.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reflux_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record(Equation::FenskeMinimumStages, "FUG");
    /// tracker.record(Equation::CondenserDuty, "condenser");
    ///
    /// let typst = tracker.generate_appendix_typst();
    /// assert!(typst.contains("Fenske Minimum Stages"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: List of Equations]
  ]
]

#v(12pt)

#text(size: 10pt)[
  This appendix lists the correlations applied in this design, in calculation order.
  Each equation includes its formula, literature reference, and where it was applied.
]

#v(16pt)
"##);

        let by_category = self.by_category();

        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No equations recorded for this design.]\n");
            return output;
        }

        let usage_by_eq = self.by_equation();

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();

                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[{}]\n\n", meta.description));
                output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Reference:* {}\n\n", meta.reference.citation()));

                if !meta.variables.is_empty() {
                    output.push_str("*Variables:*\n");
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  align: (left, left, left),\n");
                    output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");

                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [{}], [{}],\n",
                            var.symbol, var.description, var.units
                        ));
                    }
                    output.push_str(")\n\n");
                }

                if let Some(usages) = usage_by_eq.get(&equation) {
                    let mut contexts: Vec<&str> = usages
                        .iter()
                        .map(|u| u.context.as_str())
                        .filter(|c| !c.is_empty())
                        .collect();
                    contexts.sort();
                    contexts.dedup();

                    if !contexts.is_empty() {
                        output.push_str(&format!("*Applied to:* {}\n\n", contexts.join(", ")));
                    }
                }

                if !meta.assumptions.is_empty() {
                    output.push_str("*Assumptions:*\n");
                    for assumption in &meta.assumptions {
                        output.push_str(&format!("- {}\n", assumption));
                    }
                    output.push('\n');
                }

                output.push_str("#v(8pt)\n");
                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
                output.push_str("#v(8pt)\n\n");
            }
        }

        output
    }
}

/// Generate a "List of Equations" appendix for a fixed set of equations.
pub fn generate_static_equations_appendix_typst(equations: &[Equation]) -> String {
    equations.iter().copied().collect::<EquationTracker>().generate_appendix_typst()
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// # Example
///
/// ```rust
/// use reflux_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Reflux Equations Reference"));
/// assert!(markdown.contains("Shortcut Design (FUG)"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(r#"# Reflux Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every correlation used by the Reflux column design and
relief sizing calculations, with formula, reference, source location and
assumptions.

## Conventions

| Quantity | Unit |
|----------|------|
| Molar flows | kmol/h |
| Compositions | Light-key mole fraction |
| Pressure | kPa abs (Antoine in mmHg) |
| Temperature | °C (K inside gas-law terms) |
| Duties | kJ/h (W in the area equation) |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.plain_symbol(),
                        var.description,
                        var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(r#"## How to Audit

1. Find the equation you want to verify in the sections above
2. Check the **Reference** for the original source (Fenske, Underwood, API 520, etc.)
3. Follow the **Source** link to the implementing function
4. Run `cargo test` to check the implementation against known values
"#);

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 28);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_typst.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(meta.formula_typst.starts_with('$'), "Equation {:?} formula not in math mode", eq);
        }

        let fenske = Equation::FenskeMinimumStages.metadata();
        assert!(fenske.formula_plain.contains("ln(alpha)"));

        let lmtd = Equation::LogMeanTemperatureDifference.metadata();
        assert!(lmtd.formula_plain.contains("ln(dT1/dT2)"));
    }

    #[test]
    fn test_code_reference_citation() {
        let fenske = CodeReference::Literature {
            author: "Fenske",
            year: 1932,
            source: "Ind. Eng. Chem. 24, 482",
        };
        assert_eq!(fenske.citation(), "Fenske (1932), Ind. Eng. Chem. 24, 482");
        assert_eq!(fenske.short_form(), "Fenske");

        let api = CodeReference::Api { standard: "521", edition: 6, section: "Eq. (7)" };
        assert_eq!(api.citation(), "API 521 6ed, Eq. (7)");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::SaturationTemperature, "column top");
        tracker.record(Equation::SaturationTemperature, "column bottom");
        tracker.record(Equation::FenskeMinimumStages, "FUG");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::SaturationTemperature, Equation::FenskeMinimumStages]
        );
    }

    #[test]
    fn test_by_category() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::CondenserDuty, "test");
        tracker.record(Equation::FenskeMinimumStages, "test");
        tracker.record(Equation::ExchangerArea, "test");

        let by_cat = tracker.by_category();
        let categories: Vec<_> = by_cat.iter().map(|(cat, _)| *cat).collect();
        assert_eq!(
            categories,
            vec![
                EquationCategory::ShortcutDesign,
                EquationCategory::HeatDuties,
                EquationCategory::HeatExchange
            ]
        );
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_every_category_populated() {
        for cat in Equation::all_categories() {
            assert!(!Equation::in_category(cat).is_empty(), "{:?} is empty", cat);
        }
    }

    #[test]
    fn test_generate_appendix_typst() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::UnderwoodTheta, "FUG");
        tracker.record(Equation::LogMeanTemperatureDifference, "condenser");
        tracker.record(Equation::ExchangerArea, "condenser");
        tracker.record(Equation::ExchangerArea, "reboiler");

        let typst = tracker.generate_appendix_typst();

        assert!(typst.contains("Appendix: List of Equations"));
        assert!(typst.contains("Underwood Root"));
        assert!(typst.contains("Log-Mean Temperature Difference"));
        assert!(typst.contains("Underwood (1948)"));
        assert!(typst.contains("*Applied to:* condenser, reboiler"));
        assert!(typst.contains("== Shortcut Design (FUG)"));
        assert!(typst.contains("== Heat Exchange"));
    }

    #[test]
    fn test_generate_appendix_empty_tracker() {
        let typst = EquationTracker::new().generate_appendix_typst();
        assert!(typst.contains("Appendix: List of Equations"));
        assert!(typst.contains("No equations recorded"));
    }

    #[test]
    fn test_static_equations_appendix() {
        let typst = generate_static_equations_appendix_typst(&[
            Equation::FireHeatInput,
            Equation::VaporReliefArea,
        ]);
        assert!(typst.contains("Fire Heat Input"));
        assert!(typst.contains("API 520 Part I"));
    }

    #[test]
    fn test_plain_symbol_strips_quotes() {
        let var = Variable::new(r#"K_"SB""#, "Capacity factor", "m/s");
        assert_eq!(var.plain_symbol(), "K_SB");
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Reflux Equations Reference"));
        assert!(markdown.contains("Auto-generated from source code"));
        assert!(markdown.contains("## Conventions"));

        for cat in Equation::all_categories() {
            assert!(markdown.contains(&format!("## {}", cat.display_name())), "Missing {:?}", cat);
        }

        assert!(markdown.contains("### Fenske Minimum Stages"));
        assert!(markdown.contains("`V = (R + 1)·D`"));
        assert!(markdown.contains("| K_SB |"));
        assert!(markdown.contains("equations/fug.rs"));
        assert!(markdown.contains("**Total Equations:** 28"));
        assert!(markdown.contains("**Categories:** 8"));
        assert!(markdown.contains("## How to Audit"));
    }

    #[test]
    fn test_equation_metadata_has_source_info() {
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} missing formula_plain", eq);
        }
    }
}
