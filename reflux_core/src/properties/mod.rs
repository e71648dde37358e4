//! # Property Packs
//!
//! Physical properties for the light-key / heavy-key pair of a binary
//! separation. Named systems come from a small static table; `Custom`
//! bypasses the table and takes molar masses, liquid densities and latent
//! heats from the caller (or generic defaults).
//!
//! ## Example
//!
//! ```rust
//! use reflux_core::properties::{ChemicalSystem, CustomComponents, resolve_properties};
//!
//! let pair = ChemicalSystem::BenzeneToluene.key_pair().unwrap();
//! assert_eq!(pair.light.name, "Benzene");
//!
//! // Custom has no table entry and no Antoine constants
//! assert!(ChemicalSystem::Custom.key_pair().is_none());
//! let props = resolve_properties(ChemicalSystem::Custom, &CustomComponents::default());
//! assert!(props.antoine.is_none());
//! assert_eq!(props.light_molar_mass, 78.0);
//! ```

mod packs;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Generic light-key molar mass used when no property pack is selected (g/mol)
pub const GENERIC_LK_MOLAR_MASS: f64 = 78.0;
/// Generic heavy-key molar mass used when no property pack is selected (g/mol)
pub const GENERIC_HK_MOLAR_MASS: f64 = 92.0;
/// Generic light-key liquid density (kg/m³)
pub const GENERIC_LK_LIQUID_DENSITY: f64 = 650.0;
/// Generic heavy-key liquid density (kg/m³)
pub const GENERIC_HK_LIQUID_DENSITY: f64 = 700.0;
/// Generic latent heat for either key (kJ/kg)
pub const GENERIC_LATENT_HEAT: f64 = 350.0;

/// Antoine constants for `log10(Psat[mmHg]) = A - B / (T[°C] + C)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntoineCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Pure-component reference data for one key component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Component {
    /// Display name
    pub name: &'static str,
    /// Molar mass (g/mol = kg/kmol)
    pub molar_mass: f64,
    /// Liquid density (kg/m³)
    pub liquid_density: f64,
    /// Vapor pressure correlation
    pub antoine: AntoineCoefficients,
    /// Latent heat of vaporization (kJ/kg)
    pub latent_heat_kj_kg: f64,
}

/// Light key and heavy key of a binary system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyPair {
    pub light: Component,
    pub heavy: Component,
}

/// Named binary systems with built-in property packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChemicalSystem {
    #[default]
    #[serde(rename = "Benzene/Toluene")]
    BenzeneToluene,
    #[serde(rename = "Hexane/Heptane")]
    HexaneHeptane,
    #[serde(rename = "Ethanol/Water")]
    EthanolWater,
    /// No property pack; caller-supplied or generic properties
    Custom,
}

impl ChemicalSystem {
    /// All systems, in menu order
    pub const ALL: [ChemicalSystem; 4] = [
        ChemicalSystem::Custom,
        ChemicalSystem::BenzeneToluene,
        ChemicalSystem::HexaneHeptane,
        ChemicalSystem::EthanolWater,
    ];

    /// Look up the property pack. `None` for `Custom`.
    pub fn key_pair(&self) -> Option<KeyPair> {
        match self {
            ChemicalSystem::BenzeneToluene => Some(packs::BENZENE_TOLUENE),
            ChemicalSystem::HexaneHeptane => Some(packs::HEXANE_HEPTANE),
            ChemicalSystem::EthanolWater => Some(packs::ETHANOL_WATER),
            ChemicalSystem::Custom => None,
        }
    }

    /// Get display name (same text as the serialized form)
    pub fn display_name(&self) -> &'static str {
        match self {
            ChemicalSystem::BenzeneToluene => "Benzene/Toluene",
            ChemicalSystem::HexaneHeptane => "Hexane/Heptane",
            ChemicalSystem::EthanolWater => "Ethanol/Water",
            ChemicalSystem::Custom => "Custom",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_', '/'], "-").as_str() {
            "BENZENE-TOLUENE" | "BT" => Ok(ChemicalSystem::BenzeneToluene),
            "HEXANE-HEPTANE" | "N-HEXANE-N-HEPTANE" | "HH" => Ok(ChemicalSystem::HexaneHeptane),
            "ETHANOL-WATER" | "EW" => Ok(ChemicalSystem::EthanolWater),
            "CUSTOM" => Ok(ChemicalSystem::Custom),
            _ => Err(CalcError::system_not_found(s)),
        }
    }
}

impl std::fmt::Display for ChemicalSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Caller-supplied key properties, consulted only for `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomComponents {
    pub light_molar_mass: f64,
    pub heavy_molar_mass: f64,
    pub light_liquid_density: f64,
    pub heavy_liquid_density: f64,
    pub light_latent_heat_kj_kg: f64,
    pub heavy_latent_heat_kj_kg: f64,
}

impl Default for CustomComponents {
    fn default() -> Self {
        CustomComponents {
            light_molar_mass: GENERIC_LK_MOLAR_MASS,
            heavy_molar_mass: GENERIC_HK_MOLAR_MASS,
            light_liquid_density: GENERIC_LK_LIQUID_DENSITY,
            heavy_liquid_density: GENERIC_HK_LIQUID_DENSITY,
            light_latent_heat_kj_kg: GENERIC_LATENT_HEAT,
            heavy_latent_heat_kj_kg: GENERIC_LATENT_HEAT,
        }
    }
}

/// Properties the rest of the pipeline works from.
///
/// `antoine` is `None` when no property pack was selected; the VLE stage is
/// skipped in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedProperties {
    pub light_molar_mass: f64,
    pub heavy_molar_mass: f64,
    pub light_liquid_density: f64,
    pub heavy_liquid_density: f64,
    pub light_latent_heat_kj_kg: f64,
    pub heavy_latent_heat_kj_kg: f64,
    pub antoine: Option<(AntoineCoefficients, AntoineCoefficients)>,
}

impl ResolvedProperties {
    /// Molar mass of a liquid or vapor with light-key fraction `x` (kg/kmol)
    pub fn mixture_molar_mass(&self, x: f64) -> f64 {
        x * self.light_molar_mass + (1.0 - x) * self.heavy_molar_mass
    }

    /// Molar latent heat of a mixture with light-key fraction `x` (kJ/kmol)
    pub fn mixture_latent_heat_kj_kmol(&self, x: f64) -> f64 {
        x * self.light_latent_heat_kj_kg * self.light_molar_mass
            + (1.0 - x) * self.heavy_latent_heat_kj_kg * self.heavy_molar_mass
    }
}

/// Resolve the key-component properties for a system.
///
/// Named systems ignore `custom` entirely; `Custom` uses it verbatim.
pub fn resolve_properties(system: ChemicalSystem, custom: &CustomComponents) -> ResolvedProperties {
    match system.key_pair() {
        Some(pair) => ResolvedProperties {
            light_molar_mass: pair.light.molar_mass,
            heavy_molar_mass: pair.heavy.molar_mass,
            light_liquid_density: pair.light.liquid_density,
            heavy_liquid_density: pair.heavy.liquid_density,
            light_latent_heat_kj_kg: pair.light.latent_heat_kj_kg,
            heavy_latent_heat_kj_kg: pair.heavy.latent_heat_kj_kg,
            antoine: Some((pair.light.antoine, pair.heavy.antoine)),
        },
        None => ResolvedProperties {
            light_molar_mass: custom.light_molar_mass,
            heavy_molar_mass: custom.heavy_molar_mass,
            light_liquid_density: custom.light_liquid_density,
            heavy_liquid_density: custom.heavy_liquid_density,
            light_latent_heat_kj_kg: custom.light_latent_heat_kj_kg,
            heavy_latent_heat_kj_kg: custom.heavy_latent_heat_kj_kg,
            antoine: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_systems_have_packs() {
        for system in ChemicalSystem::ALL {
            assert_eq!(system.key_pair().is_some(), system != ChemicalSystem::Custom);
        }
    }

    #[test]
    fn test_light_key_is_more_volatile() {
        // At 80 °C the light key must have the higher vapor pressure
        for system in ChemicalSystem::ALL {
            if let Some(pair) = system.key_pair() {
                let psat = |a: AntoineCoefficients| 10f64.powf(a.a - a.b / (80.0 + a.c));
                assert!(psat(pair.light.antoine) > psat(pair.heavy.antoine), "{}", system);
            }
        }
    }

    #[test]
    fn test_named_system_ignores_custom() {
        let custom = CustomComponents {
            light_molar_mass: 1.0,
            ..CustomComponents::default()
        };
        let props = resolve_properties(ChemicalSystem::HexaneHeptane, &custom);
        assert_eq!(props.light_molar_mass, 86.18);
        assert!(props.antoine.is_some());
    }

    #[test]
    fn test_custom_uses_overrides() {
        let custom = CustomComponents {
            light_molar_mass: 58.08,
            light_latent_heat_kj_kg: 518.0,
            ..CustomComponents::default()
        };
        let props = resolve_properties(ChemicalSystem::Custom, &custom);
        assert_eq!(props.light_molar_mass, 58.08);
        assert_eq!(props.heavy_molar_mass, GENERIC_HK_MOLAR_MASS);
        assert_eq!(props.light_latent_heat_kj_kg, 518.0);
        assert_eq!(props.heavy_liquid_density, GENERIC_HK_LIQUID_DENSITY);
    }

    #[test]
    fn test_mixture_averages() {
        let props = resolve_properties(ChemicalSystem::BenzeneToluene, &CustomComponents::default());
        assert!((props.mixture_molar_mass(1.0) - 78.11).abs() < 1e-12);
        assert!((props.mixture_molar_mass(0.5) - 85.125).abs() < 1e-9);
        // 394 kJ/kg * 78.11 kg/kmol
        assert!((props.mixture_latent_heat_kj_kmol(1.0) - 30_775.34).abs() < 1e-6);
    }

    #[test]
    fn test_from_str_flexible() {
        assert_eq!(ChemicalSystem::from_str_flexible("Benzene/Toluene").unwrap(), ChemicalSystem::BenzeneToluene);
        assert_eq!(ChemicalSystem::from_str_flexible("ethanol water").unwrap(), ChemicalSystem::EthanolWater);
        assert_eq!(ChemicalSystem::from_str_flexible("custom").unwrap(), ChemicalSystem::Custom);
        assert!(ChemicalSystem::from_str_flexible("Acetone/Water").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ChemicalSystem::HexaneHeptane).unwrap();
        assert_eq!(json, "\"Hexane/Heptane\"");
        let roundtrip: ChemicalSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, ChemicalSystem::HexaneHeptane);
    }
}
