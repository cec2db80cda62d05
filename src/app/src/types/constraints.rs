use serde::{Deserialize, Serialize};

use super::device::HardwareVariant;

/// Lowest core voltage (mV) the device accepts.
pub const MIN_CORE_VOLTAGE: u32 = 1005;
/// Voltage ceiling used when no variant-specific ceiling is known.
pub const ABSOLUTE_MAX_CORE_VOLTAGE: u32 = 1400;
/// Lowest frequency (MHz) accepted for any variant.
pub const MIN_FREQUENCY: u32 = 1;

/// Stored overheat threshold of 0 used to mean "disabled"; it maps to this.
pub const OVERHEAT_TEMP_REPLACEMENT: u32 = 70;
pub const MIN_OVERHEAT_TEMP: u32 = 40;
pub const MAX_OVERHEAT_TEMP: u32 = 90;

/// Headroom allowed above the highest predefined table entry.
const CEILING_FACTOR: f64 = 1.2;

/// Predefined frequencies (MHz) for a variant, ascending.
pub fn predefined_frequencies(variant: HardwareVariant) -> &'static [u32] {
    match variant {
        HardwareVariant::Bm1366 => &[400, 425, 450, 475, 485, 500, 525, 550, 575],
        HardwareVariant::Bm1368 => &[400, 425, 450, 475, 490, 500, 525, 550, 575],
        HardwareVariant::Bm1370 => &[500, 515, 525, 550, 575, 590, 600],
        HardwareVariant::Unknown => &[],
    }
}

/// Predefined core voltages (mV) for a variant, ascending.
pub fn predefined_voltages(variant: HardwareVariant) -> &'static [u32] {
    match variant {
        HardwareVariant::Bm1366 => &[1100, 1150, 1200, 1250, 1300],
        HardwareVariant::Bm1368 => &[1100, 1150, 1200, 1250, 1300, 1350],
        HardwareVariant::Bm1370 => &[1120, 1130, 1140, 1150, 1160, 1170, 1180, 1190, 1200],
        HardwareVariant::Unknown => &[],
    }
}

/// Safe operating range for frequency and core voltage.
///
/// A `None` ceiling means the variant has no predefined table: the frequency
/// upper-bound check is disabled and voltage falls back to
/// [`ABSOLUTE_MAX_CORE_VOLTAGE`]. Unsafe-settings detection is off for that
/// setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintBounds {
    pub min_voltage: u32,
    pub max_voltage: Option<u32>,
    pub min_frequency: u32,
    pub max_frequency: Option<u32>,
}

impl Default for ConstraintBounds {
    fn default() -> Self {
        Self::compute(HardwareVariant::Unknown)
    }
}

impl ConstraintBounds {
    pub fn compute(variant: HardwareVariant) -> Self {
        Self {
            min_voltage: MIN_CORE_VOLTAGE,
            max_voltage: ceiling(predefined_voltages(variant)),
            min_frequency: MIN_FREQUENCY,
            max_frequency: ceiling(predefined_frequencies(variant)),
        }
    }

    /// Upper voltage limit enforced by validation.
    pub fn effective_max_voltage(&self) -> u32 {
        self.max_voltage.unwrap_or(ABSOLUTE_MAX_CORE_VOLTAGE)
    }

    pub fn voltage_exceeds_ceiling(&self, voltage: f64) -> bool {
        self.max_voltage
            .is_some_and(|max| voltage > f64::from(max))
    }

    pub fn frequency_exceeds_ceiling(&self, frequency: f64) -> bool {
        self.max_frequency
            .is_some_and(|max| frequency > f64::from(max))
    }
}

fn ceiling(table: &[u32]) -> Option<u32> {
    table
        .iter()
        .max()
        .map(|&max| (f64::from(max) * CEILING_FACTOR).round() as u32)
}

/// Remap a stored overheat threshold of 0 and clamp it into the accepted range.
pub fn normalize_overheat_temp(raw: u32) -> u32 {
    let temp = if raw == 0 {
        OVERHEAT_TEMP_REPLACEMENT
    } else {
        raw
    };
    temp.clamp(MIN_OVERHEAT_TEMP, MAX_OVERHEAT_TEMP)
}
