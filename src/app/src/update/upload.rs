use crux_core::{render::render, Command};

use crate::commands::upload::UploadOutput;
use crate::error::Error;
use crate::events::{Event, UploadEvent};
use crate::model::Model;
use crate::types::{UploadStatus, UploadTarget};
use crate::{build_url, Effect, UploadCmd};

/// Handle firmware and website upload events. The two tasks never share state.
pub fn handle(event: UploadEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UploadEvent::SelectFile { target, file } => {
            match model.upload_task_mut(target).select_file(target, file) {
                Ok(()) => render(),
                Err(e) => {
                    log::warn!("{e}");
                    model.report_and_render(e.into())
                }
            }
        }

        UploadEvent::Start { target } => match model.upload_task_mut(target).start(target) {
            Ok(file) => {
                log::debug!("uploading {target} image {} ({} bytes)", file.name, file.size);
                let url = build_url(&model.endpoint, target.path());
                model.clear_error();
                Command::all([
                    render(),
                    UploadCmd::start(target, url, file).then_send(move |output| {
                        Event::Upload(UploadEvent::Finished { target, output })
                    }),
                ])
            }
            Err(e) => model.report_and_render(e.into()),
        },

        UploadEvent::Progress {
            target,
            bytes_sent,
            bytes_total,
        } => {
            let task = model.upload_task_mut(target);
            let before = task.progress_percent;
            task.progress(bytes_sent, bytes_total);
            if task.progress_percent == before {
                Command::done()
            } else {
                render()
            }
        }

        UploadEvent::Finished { target, output } => handle_finished(target, output, model),

        UploadEvent::Reset { target } => match model.upload_task_mut(target).reset() {
            Ok(()) => render(),
            Err(e) => model.report_and_render(e.into()),
        },
    }
}

fn handle_finished(
    target: UploadTarget,
    output: UploadOutput,
    model: &mut Model,
) -> Command<Effect, Event> {
    let task = model.upload_task_mut(target);
    if task.status != UploadStatus::Uploading {
        log::warn!("ignoring {target} upload result, no upload running");
        return Command::done();
    }

    match output {
        UploadOutput::Succeeded => {
            task.succeed();
            log::debug!("{target} upload succeeded");
            let message = match target {
                UploadTarget::Firmware => "Firmware updated. The device will restart shortly.",
                UploadTarget::Website => "Website updated. The page will reload shortly.",
            };
            model.success_message = Some(message.to_string());
        }
        UploadOutput::Failed { message } => {
            task.fail(message.clone());
            model.report(Error::network(format!("Uploading {target}"), message));
        }
    }
    render()
}
