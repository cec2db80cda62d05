use serde::{Deserialize, Serialize};

use super::form::FieldValue;

/// ASIC family reported by the device; selects the predefined frequency and
/// voltage tables.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum HardwareVariant {
    #[serde(rename = "BM1366")]
    Bm1366,
    #[serde(rename = "BM1368")]
    Bm1368,
    #[serde(rename = "BM1370")]
    Bm1370,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Snapshot of all device settings as returned by `GET /api/system/info`.
///
/// Optional fields are the ones older firmware may omit; the editable form
/// fills in the same defaults the device applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    pub flipscreen: u8,
    pub invertscreen: u8,
    pub autoscreenoff: u8,

    pub hostname: String,
    pub ssid: String,
    pub wifi_pass: Option<String>,
    pub wifi_status: String,

    #[serde(rename = "stratumURL")]
    pub stratum_url: String,
    pub stratum_port: u16,
    pub stratum_user: String,
    #[serde(rename = "fallbackStratumURL")]
    pub fallback_stratum_url: String,
    pub fallback_stratum_port: u16,
    pub fallback_stratum_user: String,

    pub frequency: f64,
    pub core_voltage: f64,
    pub job_interval: u32,
    pub stratum_difficulty: u32,

    pub autofanspeed: Option<u8>,
    pub pid_target_temp: Option<f64>,
    pub pid_p: Option<f64>,
    pub pid_i: Option<f64>,
    pub pid_d: Option<f64>,
    pub invertfanpolarity: u8,
    pub autofanpolarity: u8,
    pub fanspeed: u32,
    #[serde(rename = "overheat_temp")]
    pub overheat_temp: u32,

    #[serde(rename = "ASICModel")]
    pub asic_model: HardwareVariant,
    pub default_frequency: Option<f64>,
    pub default_core_voltage: Option<f64>,
}

impl DeviceInfo {
    /// Factory-default frequency, 0 when the device does not report one.
    pub fn factory_frequency(&self) -> f64 {
        self.default_frequency.unwrap_or(0.0)
    }

    /// Factory-default core voltage, 0 when the device does not report one.
    pub fn factory_core_voltage(&self) -> f64 {
        self.default_core_voltage.unwrap_or(0.0)
    }

    /// Value stored under a device API key, as captured at load time.
    ///
    /// Passwords other than `wifiPass` are never reported by the device and
    /// resolve to `None`.
    pub fn snapshot_value(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "flipscreen" => FieldValue::from(self.flipscreen),
            "invertscreen" => FieldValue::from(self.invertscreen),
            "autoscreenoff" => FieldValue::from(self.autoscreenoff),
            "hostname" => FieldValue::from(self.hostname.as_str()),
            "ssid" => FieldValue::from(self.ssid.as_str()),
            "wifiPass" => FieldValue::from(self.wifi_pass.as_deref().unwrap_or_default()),
            "wifiStatus" => FieldValue::from(self.wifi_status.as_str()),
            "stratumURL" => FieldValue::from(self.stratum_url.as_str()),
            "stratumPort" => FieldValue::from(self.stratum_port),
            "stratumUser" => FieldValue::from(self.stratum_user.as_str()),
            "fallbackStratumURL" => FieldValue::from(self.fallback_stratum_url.as_str()),
            "fallbackStratumPort" => FieldValue::from(self.fallback_stratum_port),
            "fallbackStratumUser" => FieldValue::from(self.fallback_stratum_user.as_str()),
            "frequency" => FieldValue::Number(self.frequency),
            "coreVoltage" => FieldValue::Number(self.core_voltage),
            "jobInterval" => FieldValue::from(self.job_interval),
            "stratumDifficulty" => FieldValue::from(self.stratum_difficulty),
            "autofanspeed" => self.autofanspeed.map(FieldValue::from)?,
            "pidTargetTemp" => self.pid_target_temp.map(FieldValue::Number)?,
            "pidP" => self.pid_p.map(FieldValue::Number)?,
            "pidI" => self.pid_i.map(FieldValue::Number)?,
            "pidD" => self.pid_d.map(FieldValue::Number)?,
            "invertfanpolarity" => FieldValue::from(self.invertfanpolarity),
            "autofanpolarity" => FieldValue::from(self.autofanpolarity),
            "fanspeed" => FieldValue::from(self.fanspeed),
            "overheat_temp" => FieldValue::from(self.overheat_temp),
            _ => return None,
        };
        Some(value)
    }
}
