use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::form::{EditableFormState, FieldValue, FormField};

/// Fan control mode as stored in `autofanspeed`.
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum FanMode {
    Manual = 0,
    AutoFixed = 1,
    AutoPid = 2,
}

impl FanMode {
    /// Only numeric values select a mode; text such as `"2"` does not.
    pub fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(n) if *n == 0.0 => Some(Self::Manual),
            FieldValue::Number(n) if *n == 1.0 => Some(Self::AutoFixed),
            FieldValue::Number(n) if *n == 2.0 => Some(Self::AutoPid),
            _ => None,
        }
    }
}

/// Which fan-related controls are editable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldEnablement {
    pub fanspeed: bool,
    pub pid_target_temp: bool,
    /// pidP, pidI and pidD.
    pub pid_tuning: bool,
}

impl FieldEnablement {
    pub fn for_mode(mode: FanMode, advanced_mode: bool) -> Self {
        match mode {
            FanMode::Manual => Self {
                fanspeed: true,
                pid_target_temp: false,
                pid_tuning: false,
            },
            FanMode::AutoFixed => Self {
                fanspeed: false,
                pid_target_temp: false,
                pid_tuning: false,
            },
            FanMode::AutoPid => Self {
                fanspeed: false,
                pid_target_temp: true,
                pid_tuning: advanced_mode,
            },
        }
    }

    fn apply(self, form: &mut EditableFormState) {
        form.set_enabled(FormField::Fanspeed, self.fanspeed);
        form.set_enabled(FormField::PidTargetTemp, self.pid_target_temp);
        for field in [FormField::PidP, FormField::PidI, FormField::PidD] {
            form.set_enabled(field, self.pid_tuning);
        }
    }
}

/// Re-evaluate fan field enablement from the current `autofanspeed` value.
///
/// Only enablement changes; values and validity stay untouched. An
/// unrecognized mode leaves the fields as they are.
pub fn update_fan_fields(form: &mut EditableFormState, advanced_mode: bool) -> Option<FanMode> {
    let mode = form
        .value(FormField::Autofanspeed)
        .and_then(FanMode::from_value)?;

    log::debug!("fan mode {mode:?}, advanced mode {advanced_mode}");
    FieldEnablement::for_mode(mode, advanced_mode).apply(form);
    Some(mode)
}
