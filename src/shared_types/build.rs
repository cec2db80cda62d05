use anyhow::Result;
use axeos_core::{
    events::{FormEvent, SessionEvent, UiEvent, UploadEvent, WifiEvent},
    types::{FieldValidity, FieldValue, FormField, HardwareVariant, UploadStatus, UploadTarget},
    App, PreferenceOutput, ScheduleOutput, UploadOutput, ValidationError,
};
use crux_core::typegen::TypeGen;
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Domain event enums, so every variant is traced
    gen.register_type::<SessionEvent>()?;
    gen.register_type::<FormEvent>()?;
    gen.register_type::<WifiEvent>()?;
    gen.register_type::<UploadEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Enums reachable from the view model and the shell operations
    gen.register_type::<FormField>()?;
    gen.register_type::<FieldValue>()?;
    gen.register_type::<FieldValidity>()?;
    gen.register_type::<ValidationError>()?;
    gen.register_type::<HardwareVariant>()?;
    gen.register_type::<UploadTarget>()?;
    gen.register_type::<UploadStatus>()?;
    gen.register_type::<UploadOutput>()?;
    gen.register_type::<PreferenceOutput>()?;
    gen.register_type::<ScheduleOutput>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
