mod form;
mod session;
mod ui;
mod upload;
mod wifi;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Session(session_event) => session::handle(session_event, model),
        Event::Form(form_event) => form::handle(form_event, model),
        Event::Wifi(wifi_event) => wifi::handle(wifi_event, model),
        Event::Upload(upload_event) => upload::handle(upload_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}
