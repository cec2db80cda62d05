use crux_core::{render::render, Command};

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::types::FormField;
use crate::update_field;
use crate::{Effect, ScheduleOutput};

/// Handle UI-related events (clear messages, focus hand-off)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::ClearError => update_field!(model.error_message, None),
        UiEvent::ClearSuccess => update_field!(model.success_message, None),
        UiEvent::FocusHandled => update_field!(model.focus_target, None),

        UiEvent::ScheduleResolved(ScheduleOutput::Fired { id }) => {
            if model.pending_focus != Some(id) {
                log::warn!("stale focus hand-off {id}");
                return Command::done();
            }
            model.pending_focus = None;
            model.focus_target = Some(FormField::WifiPass);
            render()
        }

        UiEvent::ScheduleResolved(ScheduleOutput::Cancelled { id }) => {
            log::debug!("focus hand-off {id} cancelled");
            Command::done()
        }
    }
}
