use super::device::DeviceInfo;
use super::form::{EditableFormState, FormField};

/// Settings the device only picks up after a restart.
pub const REBOOT_REQUIRED_FIELDS: [&str; 16] = [
    "flipscreen",
    "invertscreen",
    "autoscreenoff",
    "hostname",
    "ssid",
    "wifiPass",
    "wifiStatus",
    "stratumURL",
    "stratumPort",
    "stratumUser",
    "fallbackStratumURL",
    "fallbackStratumPort",
    "fallbackStratumUser",
    "invertfanpolarity",
    "autofanpolarity",
    "stratumDifficulty",
];

/// Whether the edited form differs from the load-time snapshot in any
/// reboot-required setting.
///
/// Keys the form does not hold count as unchanged, as do fields still showing
/// the password mask.
pub fn requires_reboot(original: &DeviceInfo, form: &EditableFormState, mask: &str) -> bool {
    REBOOT_REQUIRED_FIELDS.iter().any(|&key| {
        let Some(current) = FormField::from_key(key).and_then(|field| form.value(field)) else {
            return false;
        };
        let current = current.normalized();
        if current.is_mask(mask) {
            return false;
        }

        let original = original
            .snapshot_value(key)
            .map(|value| value.normalized())
            .unwrap_or_default();

        if current != original {
            log::debug!("reboot required, {key} changed: {original:?} -> {current:?}");
            return true;
        }
        false
    })
}
