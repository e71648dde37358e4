//! # Unit Types
//!
//! Type-safe wrappers for the process units the engine converts between.
//! These are plain f64 newtypes: they serialize as bare numbers and cost
//! nothing at runtime, but keep a kPa from being fed to an Antoine equation
//! that expects mmHg.
//!
//! ## Units in Use
//!
//! Reflux works in SI-flavoured process units:
//! - Pressure: kilopascal (kPa), pascal (Pa), millimetre of mercury (mmHg)
//! - Temperature: degree Celsius (°C), kelvin (K)
//! - Heat rate: kilojoule per hour (kJ/h), watt (W)
//! - Area: square metre (m²), square inch (in²)
//!
//! ## Example
//!
//! ```rust
//! use reflux_core::units::{Kpa, MmHg, Celsius, Kelvin};
//!
//! let p_top = Kpa(101.325);
//! let p_mmhg: MmHg = p_top.into();
//! assert!((p_mmhg.0 - 760.0).abs() < 1e-9);
//!
//! let t: Kelvin = Celsius(25.0).into();
//! assert!((t.0 - 298.15).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// One standard atmosphere in kPa
pub const ATM_KPA: f64 = 101.325;

/// One standard atmosphere in mmHg
pub const ATM_MMHG: f64 = 760.0;

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Square metres per square inch
pub const M2_PER_IN2: f64 = 0.00064516;

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kpa(pub f64);

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pa(pub f64);

/// Pressure in millimetres of mercury (Antoine tables use this)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmHg(pub f64);

impl From<Kpa> for Pa {
    fn from(kpa: Kpa) -> Self {
        Pa(kpa.0 * 1000.0)
    }
}

impl From<Pa> for Kpa {
    fn from(pa: Pa) -> Self {
        Kpa(pa.0 / 1000.0)
    }
}

impl From<Kpa> for MmHg {
    fn from(kpa: Kpa) -> Self {
        MmHg(kpa.0 * (ATM_MMHG / ATM_KPA))
    }
}

impl From<MmHg> for Kpa {
    fn from(mmhg: MmHg) -> Self {
        Kpa(mmhg.0 * (ATM_KPA / ATM_MMHG))
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - KELVIN_OFFSET)
    }
}

// ============================================================================
// Heat Rate Units
// ============================================================================

/// Heat rate in kilojoules per hour (the duty unit of the column balance)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KjPerHour(pub f64);

/// Heat rate in watts (the duty unit of exchanger sizing)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

impl From<KjPerHour> for Watts {
    fn from(q: KjPerHour) -> Self {
        Watts(q.0 * 1000.0 / 3600.0)
    }
}

impl From<Watts> for KjPerHour {
    fn from(w: Watts) -> Self {
        KjPerHour(w.0 * 3600.0 / 1000.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

/// Area in square inches (API 526 orifice tables use this)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

impl From<SqM> for SqIn {
    fn from(m2: SqM) -> Self {
        SqIn(m2.0 / M2_PER_IN2)
    }
}

impl From<SqIn> for SqM {
    fn from(in2: SqIn) -> Self {
        SqM(in2.0 * M2_PER_IN2)
    }
}
