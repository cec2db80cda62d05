use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UploadError;

/// The two independent OTA channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    Firmware,
    Website,
}

impl UploadTarget {
    pub fn path(self) -> &'static str {
        match self {
            Self::Firmware => "/api/system/OTA",
            Self::Website => "/api/system/OTAWWW",
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firmware => f.write_str("firmware"),
            Self::Website => f.write_str("website"),
        }
    }
}

/// File picked by the user; the shell keeps the bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed(String),
}

impl UploadStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadTask {
    pub selected_file: Option<UploadFile>,
    pub progress_percent: u8,
    pub status: UploadStatus,
}

impl UploadTask {
    pub fn select_file(&mut self, target: UploadTarget, file: UploadFile) -> Result<(), UploadError> {
        if self.status != UploadStatus::Idle {
            return Err(UploadError::NotIdle(target));
        }
        self.selected_file = Some(file);
        Ok(())
    }

    pub fn start(&mut self, target: UploadTarget) -> Result<UploadFile, UploadError> {
        if self.status != UploadStatus::Idle {
            return Err(UploadError::NotIdle(target));
        }
        let file = self
            .selected_file
            .clone()
            .ok_or(UploadError::NoFileSelected(target))?;
        self.status = UploadStatus::Uploading;
        self.progress_percent = 0;
        Ok(file)
    }

    /// Ignored unless an upload is running.
    pub fn progress(&mut self, bytes_sent: u64, bytes_total: u64) {
        if self.status != UploadStatus::Uploading {
            return;
        }
        self.progress_percent = percent(bytes_sent, bytes_total);
    }

    pub fn succeed(&mut self) {
        self.progress_percent = 100;
        self.status = UploadStatus::Succeeded;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.progress_percent = 0;
        self.status = UploadStatus::Failed(message.into());
    }

    /// Return a finished task to idle, keeping the selected file.
    pub fn reset(&mut self) -> Result<(), UploadError> {
        if self.status == UploadStatus::Uploading {
            return Err(UploadError::InProgress);
        }
        self.status = UploadStatus::Idle;
        self.progress_percent = 0;
        Ok(())
    }
}

fn percent(bytes_sent: u64, bytes_total: u64) -> u8 {
    let ratio = bytes_sent as f64 / bytes_total.max(1) as f64;
    (100.0 * ratio).round().clamp(0.0, 100.0) as u8
}
