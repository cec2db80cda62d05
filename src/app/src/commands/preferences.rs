//! Persistent boolean preferences (browser local storage in the web shell).

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PreferenceOperation {
    GetBool { key: String },
    SetBool { key: String, value: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PreferenceOutput {
    /// Unset keys read as `false`.
    Bool { key: String, value: bool },
    Stored { key: String },
    Error { message: String },
}

impl Operation for PreferenceOperation {
    type Output = PreferenceOutput;
}

/// Command-based preferences API
pub struct Preferences<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Preferences<Effect, Event>
where
    Effect: Send + From<crux_core::Request<PreferenceOperation>> + 'static,
    Event: Send + 'static,
{
    pub fn get_bool(key: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(PreferenceOperation::GetBool { key: key.into() })
    }

    pub fn set_bool(key: impl Into<String>, value: bool) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(PreferenceOperation::SetBool {
            key: key.into(),
            value,
        })
    }
}

#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: PreferenceOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<PreferenceOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: PreferenceOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = PreferenceOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
