use super::*;
use crate::events::{FormEvent, SessionEvent, UiEvent, UploadEvent, WifiEvent};
use crux_core::Command;
use crux_http::protocol::HttpRequest;

const INFO_URL: &str = "https://relative/api/system/info";
const SCAN_URL: &str = "https://relative/api/system/wifi/scan";

fn create_test_device_info() -> DeviceInfo {
    DeviceInfo {
        hostname: "bitaxe".to_string(),
        ssid: "home".to_string(),
        wifi_pass: Some("wifi-secret".to_string()),
        stratum_url: "public-pool.io".to_string(),
        stratum_port: 21496,
        stratum_user: "bc1q.worker".to_string(),
        frequency: 485.0,
        core_voltage: 1200.0,
        job_interval: 1200,
        stratum_difficulty: 1000,
        autofanspeed: Some(1),
        fanspeed: 100,
        overheat_temp: 0,
        asic_model: HardwareVariant::Bm1366,
        default_frequency: Some(485.0),
        default_core_voltage: Some(1200.0),
        ..Default::default()
    }
}

fn send(event: Event, model: &mut Model) -> Command<Effect, Event> {
    update::update(event, model)
}

fn info_response(model: &Model, result: Result<DeviceInfo, String>) -> Event {
    Event::Session(SessionEvent::InfoResponse {
        generation: model.generation,
        result,
    })
}

fn create_loaded_model() -> Model {
    let mut model = Model::default();
    let _ = send(
        Event::Session(SessionEvent::Load {
            endpoint: String::new(),
        }),
        &mut model,
    );
    let _ = send(info_response(&model, Ok(create_test_device_info())), &mut model);
    model
}

fn set_field(model: &mut Model, field: FormField, value: impl Into<FieldValue>) {
    let _ = send(
        Event::Form(FormEvent::SetField {
            field,
            value: value.into(),
        }),
        model,
    );
}

fn http_requests(cmd: &mut Command<Effect, Event>) -> Vec<HttpRequest> {
    cmd.effects()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

fn has_header(request: &HttpRequest, name: &str, value: &str) -> bool {
    request
        .headers
        .iter()
        .any(|header| header.name.eq_ignore_ascii_case(name) && header.value == value)
}

mod session {
    use super::*;

    #[test]
    fn load_requests_device_info() {
        let mut model = Model::default();
        let mut cmd = send(
            Event::Session(SessionEvent::Load {
                endpoint: String::new(),
            }),
            &mut model,
        );

        assert!(model.is_loading);
        let requests = http_requests(&mut cmd);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, INFO_URL);
        assert!(!requests[0]
            .headers
            .iter()
            .any(|header| header.name.eq_ignore_ascii_case(TIMEOUT_HEADER)));
    }

    #[test]
    fn load_forwards_configured_timeout() {
        let mut model = Model::default();
        let _ = send(
            Event::Session(SessionEvent::Configure {
                config: r#"{"infoTimeoutMs": 5000}"#.to_string(),
            }),
            &mut model,
        );
        let mut cmd = send(
            Event::Session(SessionEvent::Load {
                endpoint: "http://10.0.0.5".to_string(),
            }),
            &mut model,
        );

        let requests = http_requests(&mut cmd);
        assert_eq!(requests[0].url, "http://10.0.0.5/api/system/info");
        assert!(has_header(&requests[0], TIMEOUT_HEADER, "5000"));
    }

    #[test]
    fn second_load_while_loading_is_ignored() {
        let mut model = Model::default();
        let load = || {
            Event::Session(SessionEvent::Load {
                endpoint: String::new(),
            })
        };
        let _ = send(load(), &mut model);
        let mut cmd = send(load(), &mut model);

        assert!(http_requests(&mut cmd).is_empty());
    }

    #[test]
    fn loaded_bm1366_device() {
        let mut model = Model::default();
        let _ = send(
            Event::Session(SessionEvent::Load {
                endpoint: String::new(),
            }),
            &mut model,
        );
        let mut cmd = send(info_response(&model, Ok(create_test_device_info())), &mut model);

        let view = model.view_model();
        assert!(view.is_loaded);
        assert!(!view.is_loading);
        assert_eq!(view.bounds.max_frequency, Some(690));
        assert_eq!(view.bounds.max_voltage, Some(1560));
        assert!(view
            .frequency_options
            .iter()
            .any(|option| option.label == "485 (default)" && option.value == 485.0));
        assert!(view.frequency_options.iter().all(|o| !o.label.contains("custom")));
        assert_eq!(
            model.form.as_ref().and_then(|f| f.value(FormField::OverheatTemp)),
            Some(&FieldValue::Number(70.0))
        );
        assert!(view.form_valid);
        assert!(!view.requires_reboot);

        // initial scan
        let requests = http_requests(&mut cmd);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, SCAN_URL);
        assert!(model.wifi.in_flight);
    }

    #[test]
    fn load_applies_fan_mode() {
        let model = create_loaded_model();
        let form = model.form.as_ref().unwrap();

        // auto-fixed
        assert!(!form.is_enabled(FormField::Fanspeed));
        assert!(!form.is_enabled(FormField::PidTargetTemp));
    }

    #[test]
    fn failed_load_leaves_no_session() {
        let mut model = Model::default();
        let _ = send(
            Event::Session(SessionEvent::Load {
                endpoint: String::new(),
            }),
            &mut model,
        );
        let mut cmd = send(info_response(&model, Err("HTTP 500".to_string())), &mut model);

        assert!(!model.is_loaded());
        assert!(!model.is_loading);
        assert_eq!(
            model.error_message.as_deref(),
            Some("Load device info failed: HTTP 500")
        );
        assert!(http_requests(&mut cmd).is_empty());
    }

    #[test]
    fn invalid_configuration_keeps_previous() {
        let mut model = Model::default();
        let _ = send(
            Event::Session(SessionEvent::Configure {
                config: r#"{"passwordMask": ""}"#.to_string(),
            }),
            &mut model,
        );

        assert_eq!(model.config, SessionConfig::default());
        assert!(model.error_message.is_some());
    }

    #[test]
    fn restart_is_not_resent_while_pending() {
        let mut model = create_loaded_model();

        let mut cmd = send(Event::Session(SessionEvent::Restart), &mut model);
        let requests = http_requests(&mut cmd);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "https://relative/api/system/restart");

        let mut cmd = send(Event::Session(SessionEvent::Restart), &mut model);
        assert!(http_requests(&mut cmd).is_empty());

        let _ = send(
            Event::Session(SessionEvent::RestartResponse {
                generation: model.generation,
                result: Err("timeout".to_string()),
            }),
            &mut model,
        );
        assert!(!model.restart_in_flight);
        assert_eq!(model.error_message.as_deref(), Some("Restart failed: timeout"));
    }

    fn load(endpoint: &str) -> Event {
        Event::Session(SessionEvent::Load {
            endpoint: endpoint.to_string(),
        })
    }

    #[test]
    fn info_from_a_previous_load_is_dropped() {
        let mut model = Model::default();
        let _ = send(load("http://10.0.0.1"), &mut model);
        let first = info_response(
            &model,
            Ok(DeviceInfo {
                hostname: "device-a".to_string(),
                ..create_test_device_info()
            }),
        );
        let _ = send(Event::Session(SessionEvent::Teardown), &mut model);
        let _ = send(load("http://10.0.0.2"), &mut model);

        let mut cmd = send(first, &mut model);

        assert!(http_requests(&mut cmd).is_empty());
        assert!(model.is_loading);
        assert!(!model.is_loaded());

        let _ = send(
            info_response(
                &model,
                Ok(DeviceInfo {
                    hostname: "device-b".to_string(),
                    ..create_test_device_info()
                }),
            ),
            &mut model,
        );
        assert_eq!(
            model.form.as_ref().and_then(|f| f.value(FormField::Hostname)),
            Some(&FieldValue::from("device-b"))
        );
    }

    #[test]
    fn save_response_from_a_previous_session_is_dropped() {
        let mut model = create_loaded_model();
        let _ = send(Event::Session(SessionEvent::Save), &mut model);
        let stale = model.generation;

        let _ = send(load(""), &mut model);
        let _ = send(info_response(&model, Ok(create_test_device_info())), &mut model);
        let _ = send(Event::Session(SessionEvent::Save), &mut model);
        assert!(model.save_in_flight);

        let _ = send(
            Event::Session(SessionEvent::SaveResponse {
                generation: stale,
                result: Ok(()),
            }),
            &mut model,
        );

        assert!(model.save_in_flight);
        assert_eq!(model.success_message, None);
    }
}

mod save {
    use super::*;

    fn payload(request: &HttpRequest) -> serde_json::Value {
        serde_json::from_slice(&request.body).unwrap()
    }

    #[test]
    fn sends_changed_settings_without_masked_secrets() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::Hostname, "miner-2");
        assert!(model.view_model().requires_reboot);

        let mut cmd = send(Event::Session(SessionEvent::Save), &mut model);
        let requests = http_requests(&mut cmd);

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(requests[0].url, "https://relative/api/system");

        let body = payload(&requests[0]);
        assert_eq!(body["hostname"], "miner-2");
        assert_eq!(body["frequency"], 485);
        assert!(body.get("wifiPass").is_none());
        assert!(body.get("stratumPassword").is_none());
        assert!(body.get("fallbackStratumPassword").is_none());
        // disabled fields are still sent
        assert_eq!(body["fanspeed"], 100);
    }

    #[test]
    fn edited_password_is_sent() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::StratumPassword, "x");

        let mut cmd = send(Event::Session(SessionEvent::Save), &mut model);
        let body = payload(&http_requests(&mut cmd)[0]);
        assert_eq!(body["stratumPassword"], "x");
    }

    #[test]
    fn second_save_while_pending_is_refused() {
        let mut model = create_loaded_model();
        let _ = send(Event::Session(SessionEvent::Save), &mut model);
        assert!(model.save_in_flight);

        let mut cmd = send(Event::Session(SessionEvent::Save), &mut model);
        assert!(http_requests(&mut cmd).is_empty());

        let _ = send(
            Event::Session(SessionEvent::SaveResponse {
                generation: model.generation,
                result: Ok(()),
            }),
            &mut model,
        );
        assert!(!model.save_in_flight);
        assert_eq!(model.success_message.as_deref(), Some("Settings saved"));
    }

    #[test]
    fn validation_errors_block_the_request() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::StratumUrl, "stratum+tcp://pool.io");

        let mut cmd = send(Event::Session(SessionEvent::Save), &mut model);

        assert!(http_requests(&mut cmd).is_empty());
        assert!(!model.save_in_flight);
        assert_eq!(
            model.error_message.as_deref(),
            Some("stratumURL must not contain \"stratum+tcp://\"")
        );
    }

    #[test]
    fn failure_keeps_the_form() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::Hostname, "miner-2");
        let _ = send(Event::Session(SessionEvent::Save), &mut model);
        let _ = send(
            Event::Session(SessionEvent::SaveResponse {
                generation: model.generation,
                result: Err("HTTP 500 (Empty body)".to_string()),
            }),
            &mut model,
        );

        assert_eq!(
            model.error_message.as_deref(),
            Some("Save settings failed: HTTP 500 (Empty body)")
        );
        assert_eq!(
            model.form.as_ref().and_then(|f| f.value(FormField::Hostname)),
            Some(&FieldValue::from("miner-2"))
        );
    }

    #[test]
    fn save_before_load_reports_error() {
        let mut model = Model::default();
        let mut cmd = send(Event::Session(SessionEvent::Save), &mut model);

        assert!(http_requests(&mut cmd).is_empty());
        assert_eq!(model.error_message.as_deref(), Some("No device settings loaded"));
    }
}

mod unsafe_warning {
    use super::*;

    fn preference_ops(cmd: &mut Command<Effect, Event>) -> Vec<PreferenceOperation> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Preferences(request) => Some(request.operation.clone()),
                _ => None,
            })
            .collect()
    }

    fn create_unsafe_model() -> Model {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::Frequency, 700u32);
        model
    }

    #[test]
    fn safe_settings_save_directly() {
        let mut model = create_loaded_model();
        let mut cmd = send(Event::Session(SessionEvent::ConfirmSave), &mut model);

        assert!(model.save_in_flight);
        assert_eq!(http_requests(&mut cmd).len(), 1);
    }

    #[test]
    fn unsafe_settings_consult_the_preference() {
        let mut model = create_unsafe_model();
        let view = model.view_model();
        assert!(view.frequency_too_high);
        assert!(view.form_valid);

        let mut cmd = send(Event::Session(SessionEvent::ConfirmSave), &mut model);

        assert_eq!(
            preference_ops(&mut cmd),
            vec![PreferenceOperation::GetBool {
                key: "hideUnsafeSettingsWarning".to_string()
            }]
        );
        assert!(!model.save_in_flight);
    }

    #[test]
    fn opted_out_operator_saves_without_warning() {
        let mut model = create_unsafe_model();
        let mut cmd = send(
            Event::Session(SessionEvent::UnsafeWarningPreference {
                generation: model.generation,
                output: PreferenceOutput::Bool {
                    key: "hideUnsafeSettingsWarning".to_string(),
                    value: true,
                },
            }),
            &mut model,
        );

        assert!(!model.unsafe_warning_visible);
        assert_eq!(http_requests(&mut cmd).len(), 1);
    }

    #[test]
    fn acknowledging_with_opt_out_persists_and_saves() {
        let mut model = create_unsafe_model();
        let _ = send(
            Event::Session(SessionEvent::UnsafeWarningPreference {
                generation: model.generation,
                output: PreferenceOutput::Bool {
                    key: "hideUnsafeSettingsWarning".to_string(),
                    value: false,
                },
            }),
            &mut model,
        );
        assert!(model.unsafe_warning_visible);

        let mut cmd = send(
            Event::Session(SessionEvent::AcknowledgeUnsafeWarning {
                dont_show_again: true,
            }),
            &mut model,
        );

        let mut preferences = Vec::new();
        let mut requests = Vec::new();
        for effect in cmd.effects() {
            match effect {
                Effect::Preferences(request) => preferences.push(request.operation.clone()),
                Effect::Http(request) => requests.push(request.operation.clone()),
                _ => {}
            }
        }

        assert_eq!(
            preferences,
            vec![PreferenceOperation::SetBool {
                key: "hideUnsafeSettingsWarning".to_string(),
                value: true
            }]
        );
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PATCH");
        assert!(!model.unsafe_warning_visible);
    }

    #[test]
    fn dismissing_does_not_save() {
        let mut model = create_unsafe_model();
        model.unsafe_warning_visible = true;

        let mut cmd = send(Event::Session(SessionEvent::DismissUnsafeWarning), &mut model);

        assert!(!model.unsafe_warning_visible);
        assert!(!model.save_in_flight);
        assert!(http_requests(&mut cmd).is_empty());
    }
}

mod form {
    use super::*;

    #[test]
    fn fan_mode_change_updates_enablement() {
        let mut model = create_loaded_model();

        set_field(&mut model, FormField::Autofanspeed, 2u8);
        let form = model.form.as_ref().unwrap();
        assert!(form.is_enabled(FormField::PidTargetTemp));
        assert!(!form.is_enabled(FormField::PidP));

        let _ = send(Event::Form(FormEvent::SetAdvancedMode(true)), &mut model);
        let form = model.form.as_ref().unwrap();
        assert!(form.is_enabled(FormField::PidP));
        assert!(form.is_enabled(FormField::PidI));
        assert!(form.is_enabled(FormField::PidD));

        set_field(&mut model, FormField::Autofanspeed, 0u8);
        let form = model.form.as_ref().unwrap();
        assert!(form.is_enabled(FormField::Fanspeed));
        assert!(!form.is_enabled(FormField::PidD));
    }

    #[test]
    fn custom_frequency_gets_one_option() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::Frequency, 512.5);

        let custom: Vec<_> = model
            .frequency_options
            .iter()
            .filter(|option| option.value == 512.5)
            .collect();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].label, "512.5 (custom)");
    }

    #[test]
    fn fanspeed_change_does_not_require_reboot() {
        let mut model = create_loaded_model();
        set_field(&mut model, FormField::Fanspeed, 40u32);
        assert!(!model.view_model().requires_reboot);
    }

    #[test]
    fn edits_before_load_are_ignored() {
        let mut model = Model::default();
        set_field(&mut model, FormField::Hostname, "x");
        assert!(model.form.is_none());
    }
}

mod wifi {
    use super::*;

    fn scan_response(model: &Model, networks: Vec<WifiNetwork>) -> Event {
        Event::Wifi(WifiEvent::ScanResponse {
            generation: model.generation,
            result: Ok(WifiScanResponse::Wrapped { networks }),
        })
    }

    fn network(ssid: &str, rssi: i32) -> WifiNetwork {
        WifiNetwork {
            ssid: ssid.to_string(),
            rssi,
            authmode: 3,
        }
    }

    fn schedule_ops(cmd: &mut Command<Effect, Event>) -> Vec<ScheduleOperation> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Schedule(request) => Some(request.operation.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scan_results_are_deduplicated_and_sorted() {
        let mut model = create_loaded_model();
        let _ = send(
            scan_response(&model, vec![network("A", -60), network("A", -40), network("B", -80)]),
            &mut model,
        );

        assert!(!model.wifi.in_flight);
        assert_eq!(
            model.view_model().wifi_networks,
            vec![network("A", -60), network("B", -80)]
        );
    }

    #[test]
    fn scan_while_scanning_is_a_no_op() {
        let mut model = create_loaded_model();
        assert!(model.wifi.in_flight);

        let mut cmd = send(Event::Wifi(WifiEvent::Scan { now_ms: 1_000 }), &mut model);
        assert!(http_requests(&mut cmd).is_empty());
    }

    #[test]
    fn failed_scan_can_be_retried() {
        let mut model = create_loaded_model();
        let _ = send(
            Event::Wifi(WifiEvent::ScanResponse {
                generation: model.generation,
                result: Err("HTTP 503".to_string()),
            }),
            &mut model,
        );
        assert!(!model.wifi.in_flight);
        assert_eq!(
            model.error_message.as_deref(),
            Some("Wi-Fi scan failed: HTTP 503")
        );

        let mut cmd = send(Event::Wifi(WifiEvent::Scan { now_ms: 2_000 }), &mut model);
        assert_eq!(http_requests(&mut cmd).len(), 1);
    }

    #[test]
    fn scan_from_a_previous_session_is_dropped() {
        let mut model = create_loaded_model();
        let stale = scan_response(&model, vec![network("OLD-NET", -40)]);

        let _ = send(
            Event::Session(SessionEvent::Load {
                endpoint: "http://10.0.0.2".to_string(),
            }),
            &mut model,
        );
        let _ = send(info_response(&model, Ok(create_test_device_info())), &mut model);
        assert!(model.wifi.in_flight);

        let _ = send(stale, &mut model);
        assert!(model.wifi.in_flight);
        assert!(model.wifi.networks.is_empty());

        let _ = send(scan_response(&model, vec![network("NEW-NET", -50)]), &mut model);
        assert!(!model.wifi.in_flight);
        assert_eq!(model.wifi.networks, vec![network("NEW-NET", -50)]);
    }

    #[test]
    fn opening_selector_debounces_recent_scan() {
        let mut model = create_loaded_model();
        let _ = send(scan_response(&model, vec![]), &mut model);

        let _ = send(Event::Wifi(WifiEvent::Scan { now_ms: 1_000 }), &mut model);
        let _ = send(scan_response(&model, vec![network("home", -50)]), &mut model);

        let mut cmd = send(
            Event::Wifi(WifiEvent::SelectorOpened { now_ms: 10_999 }),
            &mut model,
        );
        assert!(http_requests(&mut cmd).is_empty());

        let mut cmd = send(
            Event::Wifi(WifiEvent::SelectorOpened { now_ms: 11_000 }),
            &mut model,
        );
        assert_eq!(http_requests(&mut cmd).len(), 1);
    }

    #[test]
    fn explicit_selection_schedules_password_focus() {
        let mut model = create_loaded_model();
        let mut cmd = send(
            Event::Wifi(WifiEvent::Select {
                ssid: "office".to_string(),
                explicit: true,
            }),
            &mut model,
        );

        assert_eq!(
            model.form.as_ref().and_then(|f| f.value(FormField::Ssid)),
            Some(&FieldValue::from("office"))
        );
        let ops = schedule_ops(&mut cmd);
        assert_eq!(ops.len(), 1);
        let ScheduleOperation::NextTick { id } = ops[0] else {
            panic!("expected a next tick request");
        };
        // not focused synchronously
        assert_eq!(model.focus_target, None);

        let _ = send(
            Event::Ui(UiEvent::ScheduleResolved(ScheduleOutput::Fired { id })),
            &mut model,
        );
        assert_eq!(model.view_model().focus_target, Some(FormField::WifiPass));

        let _ = send(Event::Ui(UiEvent::FocusHandled), &mut model);
        assert_eq!(model.focus_target, None);
    }

    #[test]
    fn typed_ssid_does_not_move_focus() {
        let mut model = create_loaded_model();
        let mut cmd = send(
            Event::Wifi(WifiEvent::Select {
                ssid: "typed".to_string(),
                explicit: false,
            }),
            &mut model,
        );

        assert!(schedule_ops(&mut cmd).is_empty());
        assert_eq!(model.pending_focus, None);
    }

    #[test]
    fn teardown_cancels_pending_focus() {
        let mut model = create_loaded_model();
        let _ = send(
            Event::Wifi(WifiEvent::Select {
                ssid: "office".to_string(),
                explicit: true,
            }),
            &mut model,
        );
        let id = model.pending_focus.unwrap();

        let mut cmd = send(Event::Session(SessionEvent::Teardown), &mut model);

        assert_eq!(schedule_ops(&mut cmd), vec![ScheduleOperation::Cancel { id }]);
        assert!(!model.is_loaded());

        // a callback that fires anyway is ignored
        let _ = send(
            Event::Ui(UiEvent::ScheduleResolved(ScheduleOutput::Fired { id })),
            &mut model,
        );
        assert_eq!(model.focus_target, None);
    }
}

mod upload {
    use super::*;

    fn select_and_start(model: &mut Model, target: UploadTarget, name: &str) -> Vec<UploadOperation> {
        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file(name),
            }),
            model,
        );
        let mut cmd = send(Event::Upload(UploadEvent::Start { target }), model);
        upload_ops(&mut cmd)
    }

    fn upload_ops(cmd: &mut Command<Effect, Event>) -> Vec<UploadOperation> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Upload(request) => Some(request.operation.clone()),
                _ => None,
            })
            .collect()
    }

    fn create_test_file(name: &str) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            size: 200,
        }
    }

    fn progress(target: UploadTarget, bytes_sent: u64) -> Event {
        Event::Upload(UploadEvent::Progress {
            target,
            bytes_sent,
            bytes_total: 200,
        })
    }

    #[test]
    fn firmware_upload_reports_progress() {
        let mut model = create_loaded_model();
        let target = UploadTarget::Firmware;

        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file("esp-miner.bin"),
            }),
            &mut model,
        );
        assert_eq!(model.firmware_upload.status, UploadStatus::Idle);

        let mut cmd = send(Event::Upload(UploadEvent::Start { target }), &mut model);
        let ops = upload_ops(&mut cmd);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].url, "https://relative/api/system/OTA");
        assert_eq!(ops[0].file.name, "esp-miner.bin");

        let mut percents = vec![model.firmware_upload.progress_percent];
        let _ = send(progress(target, 50), &mut model);
        percents.push(model.firmware_upload.progress_percent);
        let _ = send(progress(target, 200), &mut model);
        percents.push(model.firmware_upload.progress_percent);
        let _ = send(
            Event::Upload(UploadEvent::Finished {
                target,
                output: UploadOutput::Succeeded,
            }),
            &mut model,
        );
        percents.push(model.firmware_upload.progress_percent);

        assert_eq!(percents, vec![0, 25, 100, 100]);
        assert_eq!(model.firmware_upload.status, UploadStatus::Succeeded);
        assert_eq!(model.website_upload, UploadTask::default());
    }

    #[test]
    fn website_upload_uses_its_own_endpoint() {
        let mut model = create_loaded_model();
        let target = UploadTarget::Website;
        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file("www.bin"),
            }),
            &mut model,
        );

        let mut cmd = send(Event::Upload(UploadEvent::Start { target }), &mut model);
        assert_eq!(upload_ops(&mut cmd)[0].url, "https://relative/api/system/OTAWWW");
        assert_eq!(model.firmware_upload.status, UploadStatus::Idle);
    }

    #[test]
    fn failure_is_reported_and_can_be_retried() {
        let mut model = create_loaded_model();
        let target = UploadTarget::Website;
        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file("www.bin"),
            }),
            &mut model,
        );
        let _ = send(Event::Upload(UploadEvent::Start { target }), &mut model);
        let _ = send(progress(target, 100), &mut model);
        let _ = send(
            Event::Upload(UploadEvent::Finished {
                target,
                output: UploadOutput::Failed {
                    message: "connection reset".to_string(),
                },
            }),
            &mut model,
        );

        assert_eq!(
            model.website_upload.status,
            UploadStatus::Failed("connection reset".to_string())
        );
        assert_eq!(model.website_upload.progress_percent, 0);
        assert_eq!(
            model.error_message.as_deref(),
            Some("Uploading website failed: connection reset")
        );

        let _ = send(Event::Upload(UploadEvent::Reset { target }), &mut model);
        let mut cmd = send(Event::Upload(UploadEvent::Start { target }), &mut model);
        assert_eq!(upload_ops(&mut cmd).len(), 1);
    }

    #[test]
    fn start_without_file_is_refused() {
        let mut model = create_loaded_model();
        let mut cmd = send(
            Event::Upload(UploadEvent::Start {
                target: UploadTarget::Firmware,
            }),
            &mut model,
        );

        assert!(upload_ops(&mut cmd).is_empty());
        assert_eq!(model.firmware_upload.status, UploadStatus::Idle);
        assert_eq!(
            model.error_message.as_deref(),
            Some("No firmware file selected")
        );
    }

    #[test]
    fn running_upload_cannot_be_aborted() {
        let mut model = create_loaded_model();
        let target = UploadTarget::Firmware;
        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file("esp-miner.bin"),
            }),
            &mut model,
        );
        let _ = send(Event::Upload(UploadEvent::Start { target }), &mut model);

        let _ = send(Event::Upload(UploadEvent::Reset { target }), &mut model);
        assert_eq!(model.firmware_upload.status, UploadStatus::Uploading);

        let _ = send(
            Event::Upload(UploadEvent::SelectFile {
                target,
                file: create_test_file("other.bin"),
            }),
            &mut model,
        );
        assert_eq!(
            model.firmware_upload.selected_file.as_ref().map(|f| f.name.as_str()),
            Some("esp-miner.bin")
        );
    }

    #[test]
    fn running_upload_survives_a_reload() {
        let mut model = create_loaded_model();
        let target = UploadTarget::Firmware;
        assert_eq!(select_and_start(&mut model, target, "esp-miner.bin").len(), 1);

        let _ = send(
            Event::Session(SessionEvent::Load {
                endpoint: String::new(),
            }),
            &mut model,
        );
        assert_eq!(model.firmware_upload.status, UploadStatus::Uploading);
        assert!(select_and_start(&mut model, target, "other.bin").is_empty());

        let _ = send(
            Event::Upload(UploadEvent::Finished {
                target,
                output: UploadOutput::Succeeded,
            }),
            &mut model,
        );
        assert_eq!(model.firmware_upload.status, UploadStatus::Succeeded);
        assert_eq!(
            model.firmware_upload.selected_file.as_ref().map(|f| f.name.as_str()),
            Some("esp-miner.bin")
        );
    }
}

#[test]
fn clear_messages() {
    let mut model = Model {
        error_message: Some("Some error".to_string()),
        success_message: Some("Done".to_string()),
        ..Default::default()
    };

    let _ = send(Event::Ui(UiEvent::ClearError), &mut model);
    let _ = send(Event::Ui(UiEvent::ClearSuccess), &mut model);

    assert_eq!(model.error_message, None);
    assert_eq!(model.success_message, None);
}
