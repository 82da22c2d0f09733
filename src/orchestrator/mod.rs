//! Application-level orchestration.
//!
//! This module owns request lifecycle control: it validates form input,
//! issues HTTP calls, and emits events for presentation layers. UI/CLI
//! layers call into this module to keep responsibilities separated.

mod controller;

pub(crate) use controller::{run_controller, UiCommand, INVALID_IDS_MSG, MISSING_STATUS_ID_MSG};
