// core/src/flow/mod.rs

//! A small named-step engine. Each step runs its handlers in order over a shared
//! [`FlowData`]; handlers can stop the run early or fail it.

pub mod control;
pub mod data;
pub mod definition;
pub mod execution;

pub use control::{FlowControl, FlowOutcome};
pub use data::FlowData;
pub use definition::{Flow, StepDef, StepHandler};
