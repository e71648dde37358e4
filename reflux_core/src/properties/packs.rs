//! Binary property packs.
//!
//! Antoine constants are for `log10(Psat[mmHg]) = A - B / (T[°C] + C)`.
//! Liquid densities are near-ambient values; latent heats are at the
//! normal boiling point.

use super::{AntoineCoefficients, Component, KeyPair};

pub(super) const BENZENE: Component = Component {
    name: "Benzene",
    molar_mass: 78.11,
    liquid_density: 876.0,
    antoine: AntoineCoefficients { a: 6.90565, b: 1211.033, c: 220.79 },
    latent_heat_kj_kg: 394.0,
};

pub(super) const TOLUENE: Component = Component {
    name: "Toluene",
    molar_mass: 92.14,
    liquid_density: 867.0,
    antoine: AntoineCoefficients { a: 6.95464, b: 1344.80, c: 219.48 },
    latent_heat_kj_kg: 351.0,
};

pub(super) const N_HEXANE: Component = Component {
    name: "n-Hexane",
    molar_mass: 86.18,
    liquid_density: 655.0,
    antoine: AntoineCoefficients { a: 6.8763, b: 1171.53, c: 224.0 },
    latent_heat_kj_kg: 334.0,
};

pub(super) const N_HEPTANE: Component = Component {
    name: "n-Heptane",
    molar_mass: 100.21,
    liquid_density: 684.0,
    antoine: AntoineCoefficients { a: 6.8930, b: 1264.00, c: 216.0 },
    latent_heat_kj_kg: 317.0,
};

pub(super) const ETHANOL: Component = Component {
    name: "Ethanol",
    molar_mass: 46.07,
    liquid_density: 789.0,
    antoine: AntoineCoefficients { a: 8.20417, b: 1642.89, c: 230.30 },
    latent_heat_kj_kg: 841.0,
};

pub(super) const WATER: Component = Component {
    name: "Water",
    molar_mass: 18.02,
    liquid_density: 997.0,
    antoine: AntoineCoefficients { a: 8.14019, b: 1810.94, c: 244.485 },
    latent_heat_kj_kg: 2257.0,
};

pub(super) const BENZENE_TOLUENE: KeyPair = KeyPair { light: BENZENE, heavy: TOLUENE };
pub(super) const HEXANE_HEPTANE: KeyPair = KeyPair { light: N_HEXANE, heavy: N_HEPTANE };
pub(super) const ETHANOL_WATER: KeyPair = KeyPair { light: ETHANOL, heavy: WATER };
