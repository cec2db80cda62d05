use crux_core::{render::render, Command};

use crate::device_request;
use crate::error::Error;
use crate::events::{Event, UiEvent, WifiEvent};
use crate::model::Model;
use crate::types::{FormField, WifiScanResponse};
use crate::{Effect, ScheduleCmd};

const WIFI_SCAN_PATH: &str = "/api/system/wifi/scan";

/// Handle Wi-Fi scan and network selection events
pub fn handle(event: WifiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WifiEvent::Scan { now_ms } => start_scan(model, Some(now_ms)),

        WifiEvent::SelectorOpened { now_ms } => {
            if model
                .wifi
                .should_scan_on_open(now_ms, model.config.wifi_scan_debounce_ms)
            {
                start_scan(model, Some(now_ms))
            } else {
                log::debug!("network selector opened, keeping recent scan results");
                Command::done()
            }
        }

        WifiEvent::ScanResponse { generation, result } => {
            if !model.is_current(generation) {
                log::warn!("ignoring scan response from an earlier session");
                return Command::done();
            }
            if !model.wifi.in_flight {
                log::warn!("ignoring scan response without a pending scan");
                return Command::done();
            }
            match result {
                Ok(response) => {
                    model.wifi.complete(response.into_networks());
                    log::debug!("wifi scan found {} networks", model.wifi.networks.len());
                }
                Err(e) => {
                    model.wifi.fail();
                    model.report(Error::network("Wi-Fi scan", e));
                }
            }
            render()
        }

        WifiEvent::Select { ssid, explicit } => {
            let bounds = model.bounds;
            let Some(form) = model.form.as_mut() else {
                log::warn!("network selected before settings were loaded");
                return Command::done();
            };
            form.set_value(FormField::Ssid, ssid.into(), &bounds);

            if !explicit {
                return render();
            }

            // A newer selection supersedes a focus hand-off that has not run yet.
            let cancel = cancel_pending_focus(model);
            let id = model.allocate_schedule_id();
            model.pending_focus = Some(id);

            Command::all([
                cancel,
                render(),
                ScheduleCmd::next_tick(id)
                    .then_send(|output| Event::Ui(UiEvent::ScheduleResolved(output))),
            ])
        }
    }
}

/// Issue a scan unless one is already running. `now_ms` is `None` for scans
/// the core starts on its own, which then do not count for the debounce.
pub(super) fn start_scan(model: &mut Model, now_ms: Option<u64>) -> Command<Effect, Event> {
    if !model.wifi.begin(now_ms) {
        log::debug!("wifi scan already in flight");
        return Command::done();
    }
    log::debug!("starting wifi scan");

    Command::all([
        render(),
        device_request!(Wifi, WifiEvent, model, get, WIFI_SCAN_PATH, ScanResponse,
            expect_json: WifiScanResponse
        ),
    ])
}

/// Cancel the scheduled password focus, if any.
pub(super) fn cancel_pending_focus(model: &mut Model) -> Command<Effect, Event> {
    match model.pending_focus.take() {
        Some(id) => {
            log::debug!("cancelling focus hand-off {id}");
            ScheduleCmd::cancel(id).then_send(|output| Event::Ui(UiEvent::ScheduleResolved(output)))
        }
        None => Command::done(),
    }
}
