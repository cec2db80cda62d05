//! OTA upload command definitions.
//!
//! The shell streams the selected file to the device. Progress is reported
//! back as `UploadEvent::Progress` events; the request itself resolves once,
//! with the terminal outcome.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::types::{UploadFile, UploadTarget};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadOperation {
    pub target: UploadTarget,
    pub url: String,
    pub file: UploadFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadOutput {
    Succeeded,
    Failed { message: String },
}

impl Operation for UploadOperation {
    type Output = UploadOutput;
}

/// Command-based upload API
pub struct Upload<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Upload<Effect, Event>
where
    Effect: Send + From<crux_core::Request<UploadOperation>> + 'static,
    Event: Send + 'static,
{
    /// Upload `file` to `url` as a multipart request
    pub fn start(
        target: UploadTarget,
        url: impl Into<String>,
        file: UploadFile,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = UploadOutput>>
    {
        let operation = UploadOperation {
            target,
            url: url.into(),
            file,
        };
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(operation)
                .into_future(ctx)
                .await
        })
    }
}
