// core/src/flow/control.rs

//! Signals returned by step handlers and the outcome of a whole flow run.

/// What a handler wants the flow to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Run the remaining handlers and steps.
  Continue,
  /// Halt immediately; no further handlers or steps run.
  Stop,
}

/// How a flow run ended when no error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  Stopped,
}
