use crux_core::{render::render, Command};

use crate::config::SessionConfig;
use crate::device_request;
use crate::error::Error;
use crate::events::{Event, SessionEvent};
use crate::model::Model;
use crate::types::{update_fan_fields, ConstraintBounds, DeviceInfo, EditableFormState};
use crate::update_field;
use crate::{
    build_url, process_json_response, Effect, HttpCmd, PreferenceOutput, PreferencesCmd,
    TIMEOUT_HEADER,
};

use super::wifi::{cancel_pending_focus, start_scan};

const INFO_PATH: &str = "/api/system/info";
const SYSTEM_PATH: &str = "/api/system";
const RESTART_PATH: &str = "/api/system/restart";

/// Handle session events (load, save, unsafe-settings confirmation, restart)
pub fn handle(event: SessionEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SessionEvent::Configure { config } => match SessionConfig::from_json(&config) {
            Ok(config) => {
                log::debug!("session configured: {config:?}");
                model.config = config;
                render()
            }
            Err(e) => model.report_and_render(e),
        },

        SessionEvent::Load { endpoint } => handle_load(endpoint, model),
        SessionEvent::InfoResponse { generation, result } => {
            if !model.is_current(generation) {
                log::warn!("ignoring device info from an earlier session");
                return Command::done();
            }
            handle_info_response(result, model)
        }

        SessionEvent::Save => handle_save(model),
        SessionEvent::SaveResponse { generation, result } => {
            if !model.is_current(generation) || !model.save_in_flight {
                log::warn!("ignoring save response without a pending save");
                return Command::done();
            }
            model.save_in_flight = false;
            match result {
                Ok(()) => {
                    let message = if model.requires_reboot() {
                        "Settings saved. Restart the device to apply them."
                    } else {
                        "Settings saved"
                    };
                    model.success_message = Some(message.to_string());
                }
                Err(e) => model.report(Error::network("Save settings", e)),
            }
            render()
        }

        SessionEvent::ConfirmSave => {
            if !model.has_unsafe_settings() {
                return handle_save(model);
            }
            let generation = model.generation;
            PreferencesCmd::get_bool(model.config.unsafe_warning_preference_key.clone())
                .build()
                .then_send(move |output| {
                    Event::Session(SessionEvent::UnsafeWarningPreference { generation, output })
                })
        }

        SessionEvent::UnsafeWarningPreference { generation, .. }
            if !model.is_current(generation) =>
        {
            log::warn!("ignoring warning preference from an earlier session");
            Command::done()
        }
        SessionEvent::UnsafeWarningPreference { output, .. } => match output {
            PreferenceOutput::Bool { value: true, .. } => handle_save(model),
            PreferenceOutput::Bool { value: false, .. } => {
                update_field!(model.unsafe_warning_visible, true)
            }
            PreferenceOutput::Error { message } => {
                log::error!("reading warning preference failed: {message}");
                update_field!(model.unsafe_warning_visible, true)
            }
            PreferenceOutput::Stored { key } => {
                log::warn!("unexpected store confirmation for {key}");
                Command::done()
            }
        },

        SessionEvent::AcknowledgeUnsafeWarning { dont_show_again } => {
            if !model.unsafe_warning_visible {
                log::warn!("unsafe settings warning is not showing");
                return Command::done();
            }
            model.unsafe_warning_visible = false;

            let persist = if dont_show_again {
                PreferencesCmd::set_bool(model.config.unsafe_warning_preference_key.clone(), true)
                    .build()
                    .then_send(|output| {
                        Event::Session(SessionEvent::UnsafeWarningPreferenceStored(output))
                    })
            } else {
                Command::done()
            };

            Command::all([persist, handle_save(model)])
        }

        SessionEvent::UnsafeWarningPreferenceStored(output) => {
            match output {
                PreferenceOutput::Error { message } => {
                    log::warn!("storing warning preference failed: {message}")
                }
                other => log::debug!("warning preference stored: {other:?}"),
            }
            Command::done()
        }

        SessionEvent::DismissUnsafeWarning => update_field!(model.unsafe_warning_visible, false),

        SessionEvent::Restart => {
            if model.restart_in_flight {
                log::warn!("restart already requested");
                return Command::done();
            }
            model.restart_in_flight = true;
            model.clear_error();
            model.success_message = None;
            Command::all([
                render(),
                device_request!(Session, SessionEvent, model, post, RESTART_PATH, RestartResponse),
            ])
        }

        SessionEvent::RestartResponse { generation, result } => {
            if !model.is_current(generation) || !model.restart_in_flight {
                log::warn!("ignoring restart response without a pending restart");
                return Command::done();
            }
            model.restart_in_flight = false;
            match result {
                Ok(()) => model.success_message = Some("Device restarted".to_string()),
                Err(e) => model.report(Error::network("Restart", e)),
            }
            render()
        }

        SessionEvent::Teardown => {
            let cancel = cancel_pending_focus(model);
            model.reset_session();
            Command::all([cancel, render()])
        }
    }
}

fn handle_load(endpoint: String, model: &mut Model) -> Command<Effect, Event> {
    if model.is_loading {
        log::warn!("device info is already loading");
        return Command::done();
    }

    let cancel = cancel_pending_focus(model);
    model.reset_session();
    model.endpoint = endpoint;
    model.start_loading();
    let generation = model.generation;

    let mut request = HttpCmd::get(build_url(&model.endpoint, INFO_PATH));
    if model.config.info_timeout_ms > 0 {
        request = request.header(TIMEOUT_HEADER, model.config.info_timeout_ms.to_string());
    }

    Command::all([
        cancel,
        render(),
        request.build().then_send(move |result| {
            Event::Session(SessionEvent::InfoResponse {
                generation,
                result: process_json_response(result),
            })
        }),
    ])
}

fn handle_info_response(
    result: Result<DeviceInfo, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !model.is_loading {
        log::warn!("ignoring device info for a closed session");
        return Command::done();
    }

    let info = match result {
        Ok(info) => info,
        Err(e) => {
            model.is_loading = false;
            return model.report_and_render(Error::network("Load device info", e));
        }
    };

    model.stop_loading();
    model.hardware_variant = info.asic_model;
    model.bounds = ConstraintBounds::compute(info.asic_model);

    let mut form = EditableFormState::from_device_info(&info, &model.config.password_mask);
    form.revalidate(&model.bounds);
    update_fan_fields(&mut form, model.advanced_mode);

    log::debug!(
        "loaded {:?} device, bounds {:?}",
        info.asic_model,
        model.bounds
    );
    model.original_settings = Some(info);
    model.form = Some(form);
    model.rebuild_options();

    Command::all([render(), start_scan(model, None)])
}

fn handle_save(model: &mut Model) -> Command<Effect, Event> {
    if model.save_in_flight {
        log::warn!("save already in progress");
        return Command::done();
    }

    let mask = &model.config.password_mask;
    let bounds = model.bounds;
    let checked = model.form.as_ref().map(|form| match form.first_blocking_error(&bounds) {
        Some(error) => Err(error),
        None => Ok(form.to_payload(mask)),
    });
    let payload = match checked {
        Some(Ok(payload)) => serde_json::Value::Object(payload).to_string(),
        Some(Err(error)) => return model.report_and_render(error),
        None => return model.report_and_render(Error::NotLoaded),
    };

    model.save_in_flight = true;
    model.clear_error();
    model.success_message = None;

    Command::all([
        render(),
        device_request!(Session, SessionEvent, model, patch, SYSTEM_PATH, SaveResponse,
            body_string: payload
        ),
    ])
}
