pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod types;
pub mod update;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(test)]
mod tests;

use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::{
        preferences::{PreferenceOperation, PreferenceOutput},
        schedule::{ScheduleOperation, ScheduleOutput},
        upload::{UploadOperation, UploadOutput},
    },
    config::SessionConfig,
    error::{Error, UploadError, ValidationError},
    events::Event,
    http_helpers::{
        build_url, check_response_status, extract_error_message,
        is_response_success, map_http_error, parse_json_response, process_json_response,
        process_status_response, BASE_URL, TIMEOUT_HEADER,
    },
    model::{Model, ViewModel},
    types::*,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Upload(UploadOperation),
    Preferences(PreferenceOperation),
    Schedule(ScheduleOperation),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;
pub type UploadCmd = crate::commands::upload::Upload<Effect, Event>;
pub type PreferencesCmd = crate::commands::preferences::Preferences<Effect, Event>;
pub type ScheduleCmd = crate::commands::schedule::Schedule<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        model.view_model()
    }
}
