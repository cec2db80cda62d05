use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{Error, UnsafeSetting};
use crate::types::*;

/// Application Model - the complete state of one configuration session
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    pub config: SessionConfig,

    // Device state
    /// Empty for the local device
    pub endpoint: String,
    /// Baseline captured at load time, never edited
    pub original_settings: Option<DeviceInfo>,
    pub hardware_variant: HardwareVariant,
    pub bounds: ConstraintBounds,
    pub frequency_options: Vec<DropdownOption>,
    pub voltage_options: Vec<DropdownOption>,

    // Form state
    pub form: Option<EditableFormState>,
    pub advanced_mode: bool,

    // Side channels
    pub wifi: WifiScanState,
    pub firmware_upload: UploadTask,
    pub website_upload: UploadTask,

    // Request state
    /// Bumped on every reset; responses tagged with an older value are stale.
    pub generation: u64,
    pub is_loading: bool,
    pub save_in_flight: bool,
    pub restart_in_flight: bool,

    // Unsafe settings confirmation
    pub unsafe_warning_visible: bool,

    // Deferred focus hand-off
    pub pending_focus: Option<u64>,
    pub next_schedule_id: u64,
    pub focus_target: Option<FormField>,

    // UI state
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl Model {
    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Log a typed error and surface it to the operator.
    ///
    /// Leaves `is_loading` alone: a failing side channel must not abandon a
    /// load that is still in flight.
    pub fn report(&mut self, error: Error) {
        log::error!("{error}");
        self.error_message = Some(error.to_string());
    }

    /// Report an error and return a render command
    pub fn report_and_render(
        &mut self,
        error: Error,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.report(error);
        crux_core::render::render()
    }

    /// Clear the error message without affecting the loading state.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.original_settings.is_some() && self.form.is_some()
    }

    pub fn upload_task(&self, target: UploadTarget) -> &UploadTask {
        match target {
            UploadTarget::Firmware => &self.firmware_upload,
            UploadTarget::Website => &self.website_upload,
        }
    }

    pub fn upload_task_mut(&mut self, target: UploadTarget) -> &mut UploadTask {
        match target {
            UploadTarget::Firmware => &mut self.firmware_upload,
            UploadTarget::Website => &mut self.website_upload,
        }
    }

    /// Recomputed on every call; there is no cached answer.
    pub fn requires_reboot(&self) -> bool {
        match (&self.original_settings, &self.form) {
            (Some(original), Some(form)) => {
                requires_reboot(original, form, &self.config.password_mask)
            }
            _ => false,
        }
    }

    fn form_number(&self, field: FormField) -> Option<f64> {
        self.form
            .as_ref()
            .and_then(|form| form.value(field))
            .and_then(FieldValue::as_number)
    }

    /// Voltage/frequency above their safe ceiling. Not a validation failure.
    pub fn constraint_violations(&self) -> Vec<Error> {
        let mut violations = Vec::new();

        if let Some(voltage) = self.form_number(FormField::CoreVoltage) {
            if let Some(ceiling) = self.bounds.max_voltage {
                if self.bounds.voltage_exceeds_ceiling(voltage) {
                    violations.push(Error::ConstraintViolation {
                        setting: UnsafeSetting::CoreVoltage,
                        value: voltage,
                        ceiling,
                    });
                }
            }
        }

        if let Some(frequency) = self.form_number(FormField::Frequency) {
            if let Some(ceiling) = self.bounds.max_frequency {
                if self.bounds.frequency_exceeds_ceiling(frequency) {
                    violations.push(Error::ConstraintViolation {
                        setting: UnsafeSetting::Frequency,
                        value: frequency,
                        ceiling,
                    });
                }
            }
        }

        violations
    }

    pub fn has_unsafe_settings(&self) -> bool {
        !self.constraint_violations().is_empty()
    }

    /// Recompute both dropdowns from the variant tables and the current form values.
    pub fn rebuild_options(&mut self) {
        let Some(original) = &self.original_settings else {
            self.frequency_options.clear();
            self.voltage_options.clear();
            return;
        };
        let frequency = self
            .form_number(FormField::Frequency)
            .unwrap_or(original.frequency);
        let voltage = self
            .form_number(FormField::CoreVoltage)
            .unwrap_or(original.core_voltage);

        self.frequency_options = assemble_dropdown_options(
            predefined_frequencies(self.hardware_variant),
            original.factory_frequency(),
            frequency,
        );
        self.voltage_options = assemble_dropdown_options(
            predefined_voltages(self.hardware_variant),
            original.factory_core_voltage(),
            voltage,
        );
    }

    /// Ids are never reused within a session, so a late callback can't be mistaken
    /// for the current one.
    pub fn allocate_schedule_id(&mut self) -> u64 {
        self.next_schedule_id += 1;
        self.next_schedule_id
    }

    /// Drop everything tied to the loaded device. Configuration, the
    /// externally supplied advanced-mode flag and the upload channels survive;
    /// an upload that is already running cannot be abandoned.
    pub fn reset_session(&mut self) {
        *self = Model {
            config: self.config.clone(),
            advanced_mode: self.advanced_mode,
            firmware_upload: std::mem::take(&mut self.firmware_upload),
            website_upload: std::mem::take(&mut self.website_upload),
            generation: self.generation.wrapping_add(1),
            next_schedule_id: self.next_schedule_id,
            ..Default::default()
        };
    }

    /// Whether a response belongs to the current session.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn view_model(&self) -> ViewModel {
        let violations = self.constraint_violations();
        let exceeds = |setting: UnsafeSetting| {
            violations.iter().any(|violation| {
                matches!(violation, Error::ConstraintViolation { setting: s, .. } if *s == setting)
            })
        };

        ViewModel {
            is_loaded: self.is_loaded(),
            is_loading: self.is_loading,
            hardware_variant: self.hardware_variant,
            bounds: self.bounds,
            frequency_options: self.frequency_options.clone(),
            voltage_options: self.voltage_options.clone(),
            form: self.form.clone(),
            form_valid: self
                .form
                .as_ref()
                .is_some_and(|form| form.first_blocking_error(&self.bounds).is_none()),
            requires_reboot: self.requires_reboot(),
            voltage_too_high: exceeds(UnsafeSetting::CoreVoltage),
            frequency_too_high: exceeds(UnsafeSetting::Frequency),
            has_unsafe_settings: !violations.is_empty(),
            unsafe_warning_visible: self.unsafe_warning_visible,
            advanced_mode: self.advanced_mode,
            wifi_networks: self.wifi.networks.clone(),
            scanning_wifi: self.wifi.in_flight,
            firmware_upload: self.firmware_upload.clone(),
            website_upload: self.website_upload.clone(),
            is_saving: self.save_in_flight,
            is_restarting: self.restart_in_flight,
            focus_target: self.focus_target,
            error_message: self.error_message.clone(),
            success_message: self.success_message.clone(),
        }
    }
}

/// What the shell renders. Derived from [`Model`] on every read.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct ViewModel {
    pub is_loaded: bool,
    pub is_loading: bool,
    pub hardware_variant: HardwareVariant,
    pub bounds: ConstraintBounds,
    pub frequency_options: Vec<DropdownOption>,
    pub voltage_options: Vec<DropdownOption>,
    pub form: Option<EditableFormState>,
    pub form_valid: bool,
    pub requires_reboot: bool,
    pub voltage_too_high: bool,
    pub frequency_too_high: bool,
    pub has_unsafe_settings: bool,
    pub unsafe_warning_visible: bool,
    pub advanced_mode: bool,
    pub wifi_networks: Vec<WifiNetwork>,
    pub scanning_wifi: bool,
    pub firmware_upload: UploadTask,
    pub website_upload: UploadTask,
    pub is_saving: bool,
    pub is_restarting: bool,
    /// Field the shell should focus, set by the deferred hand-off
    pub focus_target: Option<FormField>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}
