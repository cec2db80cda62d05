//! Domain types and the pure logic operating on them.
//!
//! - device: device snapshot and hardware variant
//! - constraints: predefined tables and safe operating bounds
//! - options: dropdown option assembly
//! - form: editable form state and the validation table
//! - reboot: reboot-required detection
//! - fan: fan-mode dependent field enablement
//! - wifi: scan results and scan bookkeeping
//! - upload: OTA upload tasks

pub mod constraints;
pub mod device;
pub mod fan;
pub mod form;
pub mod options;
pub mod reboot;
pub mod upload;
pub mod wifi;

pub use constraints::*;
pub use device::*;
pub use fan::*;
pub use form::*;
pub use options::*;
pub use reboot::*;
pub use upload::*;
pub use wifi::*;
