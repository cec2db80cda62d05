use crux_core::{render::render, Command};

use crate::events::{Event, FormEvent};
use crate::model::Model;
use crate::types::{update_fan_fields, FormField};
use crate::Effect;

/// Handle operator edits
pub fn handle(event: FormEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        FormEvent::SetField { field, value } => {
            let bounds = model.bounds;
            let Some(form) = model.form.as_mut() else {
                log::warn!("edit of {field} before settings were loaded");
                return Command::done();
            };
            if !form.set_value(field, value, &bounds) {
                return Command::done();
            }

            match field {
                FormField::Autofanspeed => {
                    update_fan_fields(form, model.advanced_mode);
                }
                FormField::Frequency | FormField::CoreVoltage => model.rebuild_options(),
                _ => {}
            }
            render()
        }

        FormEvent::SetAdvancedMode(enabled) => {
            model.advanced_mode = enabled;
            if let Some(form) = model.form.as_mut() {
                update_fan_fields(form, enabled);
            }
            model.rebuild_options();
            render()
        }
    }
}
