//! Generated shell bindings live in `generated/`; see `build.rs`.
