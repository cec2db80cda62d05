use serde::{Deserialize, Serialize};

use crate::commands::{
    preferences::PreferenceOutput, schedule::ScheduleOutput, upload::UploadOutput,
};
use crate::types::*;

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Event {
    Session(SessionEvent),
    Form(FormEvent),
    Wifi(WifiEvent),
    Upload(UploadEvent),
    Ui(UiEvent),
}

/// Loading, saving and restarting the device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SessionEvent {
    /// JSON-encoded `SessionConfig`
    Configure {
        config: String,
    },
    /// `endpoint` is empty for the local device, else e.g. `http://10.0.0.5`
    Load {
        endpoint: String,
    },
    Save,
    /// Save, asking for confirmation first when settings exceed safe ceilings
    ConfirmSave,
    AcknowledgeUnsafeWarning {
        dont_show_again: bool,
    },
    DismissUnsafeWarning,
    Restart,
    Teardown,

    // Responses carry the `Model::generation` that issued the request.
    #[serde(skip)]
    InfoResponse {
        generation: u64,
        result: Result<DeviceInfo, String>,
    },
    #[serde(skip)]
    SaveResponse {
        generation: u64,
        result: Result<(), String>,
    },
    #[serde(skip)]
    RestartResponse {
        generation: u64,
        result: Result<(), String>,
    },
    #[serde(skip)]
    UnsafeWarningPreference {
        generation: u64,
        output: PreferenceOutput,
    },
    #[serde(skip)]
    UnsafeWarningPreferenceStored(PreferenceOutput),
}

/// Operator edits
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum FormEvent {
    SetField { field: FormField, value: FieldValue },
    SetAdvancedMode(bool),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum WifiEvent {
    /// Explicit rescan; `now_ms` is the shell's wall clock
    Scan {
        now_ms: u64,
    },
    SelectorOpened {
        now_ms: u64,
    },
    /// `explicit` is true when picked from the list rather than typed
    Select {
        ssid: String,
        explicit: bool,
    },

    #[serde(skip)]
    ScanResponse {
        generation: u64,
        result: Result<WifiScanResponse, String>,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum UploadEvent {
    SelectFile {
        target: UploadTarget,
        file: UploadFile,
    },
    Start {
        target: UploadTarget,
    },
    /// Sent by the shell while the upload request is running
    Progress {
        target: UploadTarget,
        bytes_sent: u64,
        bytes_total: u64,
    },
    Reset {
        target: UploadTarget,
    },

    #[serde(skip)]
    Finished {
        target: UploadTarget,
        output: UploadOutput,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum UiEvent {
    ClearError,
    ClearSuccess,
    /// The shell moved focus to `ViewModel::focus_target`
    FocusHandled,

    #[serde(skip)]
    ScheduleResolved(ScheduleOutput),
}
