// core/src/flow/execution.rs

use super::control::{FlowControl, FlowOutcome};
use super::data::FlowData;
use super::definition::Flow;
use crate::error::FlowError;
use tracing::{event, instrument, span, Instrument, Level};

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every declared step in order against `data`.
  ///
  /// A handler error aborts the run, unless the step is optional, in which case
  /// the error is logged and the next step starts. A required step without any
  /// handler fails with [`FlowError::HandlerMissing`].
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(flow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, data: FlowData<T>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow starting.");

    for (step_index, step) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_name = step.name.as_str(),
        step_index,
        optional = step.optional
      );

      let handlers = match self.handlers.get(&step.name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step.optional => {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(parent: &step_span, Level::ERROR, "Required step has no handlers.");
          return Err(Err::from(FlowError::HandlerMissing {
            step_name: step.name.clone(),
          }));
        }
      };

      for (handler_index, handler) in handlers.iter().enumerate() {
        let result = handler(data.clone()).instrument(step_span.clone()).await;
        match result {
          Ok(FlowControl::Continue) => {}
          Ok(FlowControl::Stop) => {
            event!(parent: &step_span, Level::INFO, handler_index, "Flow stopped by handler.");
            return Ok(FlowOutcome::Stopped);
          }
          Err(e) if step.optional => {
            event!(parent: &step_span, Level::WARN, handler_index, error = %e, "Optional step failed; continuing.");
            break;
          }
          Err(e) => {
            event!(parent: &step_span, Level::ERROR, handler_index, error = %e, "Step failed.");
            return Err(e);
          }
        }
      }
      event!(parent: &step_span, Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Flow completed.");
    Ok(FlowOutcome::Completed)
  }
}
