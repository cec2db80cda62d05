use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::constraints::{normalize_overheat_temp, ConstraintBounds};
use super::device::DeviceInfo;
use crate::error::{Error, ValidationError};

/// Editable settings, named by their device API keys when serialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    #[serde(rename = "flipscreen")]
    Flipscreen,
    #[serde(rename = "invertscreen")]
    Invertscreen,
    #[serde(rename = "autoscreenoff")]
    Autoscreenoff,
    #[serde(rename = "stratumURL")]
    StratumUrl,
    #[serde(rename = "stratumPort")]
    StratumPort,
    #[serde(rename = "stratumUser")]
    StratumUser,
    #[serde(rename = "stratumPassword")]
    StratumPassword,
    #[serde(rename = "fallbackStratumURL")]
    FallbackStratumUrl,
    #[serde(rename = "fallbackStratumPort")]
    FallbackStratumPort,
    #[serde(rename = "fallbackStratumUser")]
    FallbackStratumUser,
    #[serde(rename = "fallbackStratumPassword")]
    FallbackStratumPassword,
    #[serde(rename = "hostname")]
    Hostname,
    #[serde(rename = "ssid")]
    Ssid,
    #[serde(rename = "wifiPass")]
    WifiPass,
    #[serde(rename = "coreVoltage")]
    CoreVoltage,
    #[serde(rename = "frequency")]
    Frequency,
    #[serde(rename = "jobInterval")]
    JobInterval,
    #[serde(rename = "stratumDifficulty")]
    StratumDifficulty,
    #[serde(rename = "autofanspeed")]
    Autofanspeed,
    #[serde(rename = "pidTargetTemp")]
    PidTargetTemp,
    #[serde(rename = "pidP")]
    PidP,
    #[serde(rename = "pidI")]
    PidI,
    #[serde(rename = "pidD")]
    PidD,
    #[serde(rename = "invertfanpolarity")]
    Invertfanpolarity,
    #[serde(rename = "autofanpolarity")]
    Autofanpolarity,
    #[serde(rename = "fanspeed")]
    Fanspeed,
    #[serde(rename = "overheat_temp")]
    OverheatTemp,
}

impl FormField {
    pub const ALL: [FormField; 27] = [
        Self::Flipscreen,
        Self::Invertscreen,
        Self::Autoscreenoff,
        Self::StratumUrl,
        Self::StratumPort,
        Self::StratumUser,
        Self::StratumPassword,
        Self::FallbackStratumUrl,
        Self::FallbackStratumPort,
        Self::FallbackStratumUser,
        Self::FallbackStratumPassword,
        Self::Hostname,
        Self::Ssid,
        Self::WifiPass,
        Self::CoreVoltage,
        Self::Frequency,
        Self::JobInterval,
        Self::StratumDifficulty,
        Self::Autofanspeed,
        Self::PidTargetTemp,
        Self::PidP,
        Self::PidI,
        Self::PidD,
        Self::Invertfanpolarity,
        Self::Autofanpolarity,
        Self::Fanspeed,
        Self::OverheatTemp,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Flipscreen => "flipscreen",
            Self::Invertscreen => "invertscreen",
            Self::Autoscreenoff => "autoscreenoff",
            Self::StratumUrl => "stratumURL",
            Self::StratumPort => "stratumPort",
            Self::StratumUser => "stratumUser",
            Self::StratumPassword => "stratumPassword",
            Self::FallbackStratumUrl => "fallbackStratumURL",
            Self::FallbackStratumPort => "fallbackStratumPort",
            Self::FallbackStratumUser => "fallbackStratumUser",
            Self::FallbackStratumPassword => "fallbackStratumPassword",
            Self::Hostname => "hostname",
            Self::Ssid => "ssid",
            Self::WifiPass => "wifiPass",
            Self::CoreVoltage => "coreVoltage",
            Self::Frequency => "frequency",
            Self::JobInterval => "jobInterval",
            Self::StratumDifficulty => "stratumDifficulty",
            Self::Autofanspeed => "autofanspeed",
            Self::PidTargetTemp => "pidTargetTemp",
            Self::PidP => "pidP",
            Self::PidI => "pidI",
            Self::PidD => "pidD",
            Self::Invertfanpolarity => "invertfanpolarity",
            Self::Autofanpolarity => "autofanpolarity",
            Self::Fanspeed => "fanspeed",
            Self::OverheatTemp => "overheat_temp",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Password fields are shown masked and only sent when edited.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Self::StratumPassword | Self::FallbackStratumPassword | Self::WifiPass
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A form control value. Numbers share one variant, so `1` and `1.0` compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Booleans compare as 0/1 against the device's integer flags.
    pub fn normalized(&self) -> FieldValue {
        match self {
            Self::Bool(b) => Self::Number(if *b { 1.0 } else { 0.0 }),
            other => other.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Null | Self::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_mask(&self, mask: &str) -> bool {
        self.as_text() == Some(mask)
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Value::from(*n as i64)
            }
            Self::Number(n) => Value::from(*n),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

macro_rules! number_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )+
    };
}

number_from!(u8, u16, u32, i32);

/// One entry of the explicit validation table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    /// Pool URLs are entered without scheme and without port.
    NoStratumScheme,
    NoColon,
    Min(f64),
    Max(f64),
    MinVoltage,
    MaxVoltage,
    MinFrequency,
    MaxFrequency,
}

const STRATUM_SCHEME: &str = "stratum+tcp://";
const MAX_PORT: f64 = 65535.0;

impl Rule {
    /// Empty values only fail `Required`; the other rules skip them.
    pub fn check(self, value: &FieldValue, bounds: &ConstraintBounds) -> Result<(), ValidationError> {
        if value.is_empty() {
            return match self {
                Self::Required => Err(ValidationError::Required),
                _ => Ok(()),
            };
        }

        match self {
            Self::Required => Ok(()),
            Self::NoStratumScheme => forbid(value, STRATUM_SCHEME),
            Self::NoColon => forbid(value, ":"),
            Self::Min(min) => at_least(value, min),
            Self::Max(max) => at_most(value, max),
            Self::MinVoltage => at_least(value, f64::from(bounds.min_voltage)),
            Self::MaxVoltage => at_most(value, f64::from(bounds.effective_max_voltage())),
            Self::MinFrequency => at_least(value, f64::from(bounds.min_frequency)),
            Self::MaxFrequency => match bounds.max_frequency {
                Some(max) => at_most(value, f64::from(max)),
                None => Ok(()),
            },
        }
    }
}

fn forbid(value: &FieldValue, pattern: &str) -> Result<(), ValidationError> {
    match value.as_text() {
        Some(text) if text.contains(pattern) => {
            Err(ValidationError::ForbiddenPattern(pattern.to_string()))
        }
        _ => Ok(()),
    }
}

fn at_least(value: &FieldValue, min: f64) -> Result<(), ValidationError> {
    match value.as_number() {
        Some(n) if n < min => Err(ValidationError::BelowMinimum(min)),
        Some(_) => Ok(()),
        None => Err(ValidationError::NotANumber),
    }
}

fn at_most(value: &FieldValue, max: f64) -> Result<(), ValidationError> {
    match value.as_number() {
        Some(n) if n > max => Err(ValidationError::AboveMaximum(max)),
        Some(_) => Ok(()),
        None => Err(ValidationError::NotANumber),
    }
}

/// Validation table: the rules checked for each field, in order.
pub fn rules_for(field: FormField) -> &'static [Rule] {
    use Rule::*;

    match field {
        FormField::StratumUrl => &[Required, NoStratumScheme, NoColon],
        FormField::StratumPort => &[Required, NoColon, Min(0.0), Max(MAX_PORT)],
        FormField::FallbackStratumUrl => &[NoStratumScheme, NoColon],
        FormField::FallbackStratumPort => &[NoColon, Min(0.0), Max(MAX_PORT)],
        FormField::CoreVoltage => &[Required, MinVoltage, MaxVoltage],
        FormField::Frequency => &[Required, MinFrequency, MaxFrequency],
        FormField::StratumDifficulty => &[Required, Min(1.0)],
        FormField::PidTargetTemp => &[Required, Min(30.0), Max(80.0)],
        FormField::PidP | FormField::PidD => &[Required, Min(0.0), Max(100.0)],
        FormField::PidI => &[Required, Min(0.0), Max(10.0)],
        FormField::OverheatTemp => &[Required, Min(40.0), Max(90.0)],
        FormField::StratumUser
        | FormField::StratumPassword
        | FormField::Hostname
        | FormField::Ssid
        | FormField::JobInterval
        | FormField::Autofanspeed
        | FormField::Invertfanpolarity
        | FormField::Autofanpolarity
        | FormField::Fanspeed => &[Required],
        FormField::Flipscreen
        | FormField::Invertscreen
        | FormField::Autoscreenoff
        | FormField::FallbackStratumUser
        | FormField::FallbackStratumPassword
        | FormField::WifiPass => &[],
    }
}

pub fn validate_field(
    field: FormField,
    value: &FieldValue,
    bounds: &ConstraintBounds,
) -> FieldValidity {
    match rules_for(field)
        .iter()
        .try_for_each(|rule| rule.check(value, bounds))
    {
        Ok(()) => FieldValidity::Valid,
        Err(reason) => FieldValidity::Invalid(reason),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum FieldValidity {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl FieldValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormEntry {
    pub value: FieldValue,
    pub enabled: bool,
    pub validity: FieldValidity,
}

/// Working copy of the editable settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditableFormState {
    entries: BTreeMap<FormField, FormEntry>,
}

impl EditableFormState {
    /// Seed the form from a device snapshot. Passwords start out masked.
    pub fn from_device_info(info: &DeviceInfo, mask: &str) -> Self {
        let wifi_pass = match info.wifi_pass.as_deref() {
            Some(pass) if !pass.is_empty() => mask,
            _ => "",
        };

        let values = [
            (FormField::Flipscreen, FieldValue::from(info.flipscreen == 1)),
            (FormField::Invertscreen, FieldValue::from(info.invertscreen == 1)),
            (FormField::Autoscreenoff, FieldValue::from(info.autoscreenoff == 1)),
            (FormField::StratumUrl, FieldValue::from(info.stratum_url.as_str())),
            (FormField::StratumPort, FieldValue::from(info.stratum_port)),
            (FormField::StratumUser, FieldValue::from(info.stratum_user.as_str())),
            (FormField::StratumPassword, FieldValue::from(mask)),
            (
                FormField::FallbackStratumUrl,
                FieldValue::from(info.fallback_stratum_url.as_str()),
            ),
            (
                FormField::FallbackStratumPort,
                FieldValue::from(info.fallback_stratum_port),
            ),
            (
                FormField::FallbackStratumUser,
                FieldValue::from(info.fallback_stratum_user.as_str()),
            ),
            (FormField::FallbackStratumPassword, FieldValue::from(mask)),
            (FormField::Hostname, FieldValue::from(info.hostname.as_str())),
            (FormField::Ssid, FieldValue::from(info.ssid.as_str())),
            (FormField::WifiPass, FieldValue::from(wifi_pass)),
            (FormField::CoreVoltage, FieldValue::from(info.core_voltage)),
            (FormField::Frequency, FieldValue::from(info.frequency)),
            (FormField::JobInterval, FieldValue::from(info.job_interval)),
            (
                FormField::StratumDifficulty,
                FieldValue::from(info.stratum_difficulty),
            ),
            (
                FormField::Autofanspeed,
                FieldValue::from(info.autofanspeed.unwrap_or(0)),
            ),
            (
                FormField::PidTargetTemp,
                FieldValue::from(info.pid_target_temp.unwrap_or(55.0)),
            ),
            (FormField::PidP, FieldValue::from(info.pid_p.unwrap_or(6.0))),
            (FormField::PidI, FieldValue::from(info.pid_i.unwrap_or(0.1))),
            (FormField::PidD, FieldValue::from(info.pid_d.unwrap_or(10.0))),
            (
                FormField::Invertfanpolarity,
                FieldValue::from(info.invertfanpolarity == 1),
            ),
            (
                FormField::Autofanpolarity,
                FieldValue::from(info.autofanpolarity == 1),
            ),
            (FormField::Fanspeed, FieldValue::from(info.fanspeed)),
            (
                FormField::OverheatTemp,
                FieldValue::from(normalize_overheat_temp(info.overheat_temp)),
            ),
        ];

        let entries = values
            .into_iter()
            .map(|(field, value)| {
                (
                    field,
                    FormEntry {
                        value,
                        enabled: true,
                        validity: FieldValidity::Valid,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn entry(&self, field: FormField) -> Option<&FormEntry> {
        self.entries.get(&field)
    }

    pub fn value(&self, field: FormField) -> Option<&FieldValue> {
        self.entries.get(&field).map(|entry| &entry.value)
    }

    pub fn is_enabled(&self, field: FormField) -> bool {
        self.entries.get(&field).is_some_and(|entry| entry.enabled)
    }

    /// Store a new value and re-check that field. Returns `false` for fields
    /// the form does not hold.
    pub fn set_value(
        &mut self,
        field: FormField,
        value: FieldValue,
        bounds: &ConstraintBounds,
    ) -> bool {
        match self.entries.get_mut(&field) {
            Some(entry) => {
                entry.validity = validate_field(field, &value, bounds);
                entry.value = value;
                true
            }
            None => false,
        }
    }

    /// Toggle enablement without touching value or validity.
    pub fn set_enabled(&mut self, field: FormField, enabled: bool) {
        if let Some(entry) = self.entries.get_mut(&field) {
            entry.enabled = enabled;
        }
    }

    pub fn revalidate(&mut self, bounds: &ConstraintBounds) {
        for (field, entry) in &mut self.entries {
            entry.validity = validate_field(*field, &entry.value, bounds);
        }
    }

    /// First validation failure among enabled fields; disabled fields are not checked.
    pub fn first_error(&self) -> Option<Error> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.enabled)
            .find_map(|(field, entry)| match &entry.validity {
                FieldValidity::Valid => None,
                FieldValidity::Invalid(reason) => Some(Error::Validation {
                    field: *field,
                    source: reason.clone(),
                }),
            })
    }

    pub fn is_valid(&self) -> bool {
        self.first_error().is_none()
    }

    /// Like [`Self::first_error`], but voltage or frequency above a computed
    /// ceiling does not count: that is an unsafe setting the operator may
    /// confirm, not a reason to refuse the save.
    pub fn first_blocking_error(&self, bounds: &ConstraintBounds) -> Option<Error> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.enabled)
            .find_map(|(field, entry)| match &entry.validity {
                FieldValidity::Invalid(ValidationError::AboveMaximum(_))
                    if is_confirmable_ceiling(*field, bounds) =>
                {
                    None
                }
                FieldValidity::Valid => None,
                FieldValidity::Invalid(reason) => Some(Error::Validation {
                    field: *field,
                    source: reason.clone(),
                }),
            })
    }

    /// Materialize every field, disabled ones included, as the `updateSystem`
    /// payload. Masked passwords and an empty Wi-Fi password mean "unchanged"
    /// and are left out.
    pub fn to_payload(&self, mask: &str) -> Map<String, Value> {
        self.entries
            .iter()
            .filter(|(field, entry)| !is_unchanged_secret(**field, &entry.value, mask))
            .map(|(field, entry)| (field.key().to_string(), entry.value.to_json()))
            .collect()
    }
}

fn is_confirmable_ceiling(field: FormField, bounds: &ConstraintBounds) -> bool {
    match field {
        FormField::CoreVoltage => bounds.max_voltage.is_some(),
        FormField::Frequency => bounds.max_frequency.is_some(),
        _ => false,
    }
}

fn is_unchanged_secret(field: FormField, value: &FieldValue, mask: &str) -> bool {
    if !field.is_secret() {
        return false;
    }
    value.is_mask(mask) || (field == FormField::WifiPass && value.is_empty())
}
