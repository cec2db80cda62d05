//! Deferred callbacks run by the shell on its next scheduling opportunity.
//!
//! Every callback carries an id so the core can cancel it, and can recognise
//! a stale one that fired after it was superseded.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleOperation {
    NextTick { id: u64 },
    Cancel { id: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScheduleOutput {
    Fired { id: u64 },
    Cancelled { id: u64 },
}

impl Operation for ScheduleOperation {
    type Output = ScheduleOutput;
}

/// Command-based scheduling API
pub struct Schedule<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Schedule<Effect, Event>
where
    Effect: Send + From<crux_core::Request<ScheduleOperation>> + 'static,
    Event: Send + 'static,
{
    pub fn next_tick(
        id: u64,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = ScheduleOutput>>
    {
        Self::request(ScheduleOperation::NextTick { id })
    }

    pub fn cancel(
        id: u64,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = ScheduleOutput>>
    {
        Self::request(ScheduleOperation::Cancel { id })
    }

    fn request(
        operation: ScheduleOperation,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = ScheduleOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(operation)
                .into_future(ctx)
                .await
        })
    }
}
