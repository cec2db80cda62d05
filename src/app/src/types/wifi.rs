use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An access point reported by the device's scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiNetwork {
    pub ssid: String,
    /// Signal strength in dBm.
    pub rssi: i32,
    #[serde(default)]
    pub authmode: u8,
}

/// Scan payload; newer firmware wraps the list in an object.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WifiScanResponse {
    Wrapped { networks: Vec<WifiNetwork> },
    Bare(Vec<WifiNetwork>),
}

impl WifiScanResponse {
    pub fn into_networks(self) -> Vec<WifiNetwork> {
        match self {
            Self::Wrapped { networks } | Self::Bare(networks) => networks,
        }
    }
}

/// Drop blank and duplicate SSIDs (first seen wins), strongest signal first.
pub fn dedupe_and_sort(networks: Vec<WifiNetwork>) -> Vec<WifiNetwork> {
    let mut seen = HashSet::new();
    let mut unique: Vec<WifiNetwork> = networks
        .into_iter()
        .filter(|network| {
            let name = network.ssid.trim();
            !name.is_empty() && seen.insert(name.to_string())
        })
        .collect();

    unique.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    unique
}

/// Wi-Fi scan results plus the in-flight and debounce bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiScanState {
    pub networks: Vec<WifiNetwork>,
    pub in_flight: bool,
    /// Start time of the scan currently in flight, when the caller knew it.
    current_started_at_ms: Option<u64>,
    /// Start time of the most recent successful scan.
    last_success_started_at_ms: Option<u64>,
}

impl WifiScanState {
    /// Begin a scan. Returns `false` when one is already running.
    pub fn begin(&mut self, now_ms: Option<u64>) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.networks.clear();
        self.current_started_at_ms = now_ms;
        true
    }

    pub fn complete(&mut self, networks: Vec<WifiNetwork>) {
        self.networks = dedupe_and_sort(networks);
        self.in_flight = false;
        self.last_success_started_at_ms = self.current_started_at_ms.take();
    }

    /// The result list stays as it was left by `begin`.
    pub fn fail(&mut self) {
        self.in_flight = false;
        self.current_started_at_ms = None;
    }

    /// Opening the network selector rescans unless a scan is running or a
    /// non-empty result is younger than `debounce_ms`.
    pub fn should_scan_on_open(&self, now_ms: u64, debounce_ms: u64) -> bool {
        if self.in_flight {
            return false;
        }
        let fresh = self
            .last_success_started_at_ms
            .is_some_and(|started| now_ms.saturating_sub(started) < debounce_ms);
        !(fresh && !self.networks.is_empty())
    }
}
