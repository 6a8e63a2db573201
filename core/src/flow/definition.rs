// core/src/flow/definition.rs

//! The `Flow<T, Err>` definition: declared steps and the handlers bound to them.

use super::control::FlowControl;
use super::data::FlowData;
use crate::error::FlowError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A boxed async step handler operating on the flow's shared data.
pub type StepHandler<T, Err> =
  Box<dyn Fn(FlowData<T>) -> Pin<Box<dyn Future<Output = Result<FlowControl, Err>> + Send>> + Send + Sync>;

/// A declared step. Failures in an optional step are logged and skipped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  pub optional: bool,
}

/// An ordered sequence of named steps over shared data `T`.
///
/// Steps are declared up front; handlers are attached afterwards with [`Flow::on`].
/// Declaring the same step twice, or attaching a handler to an undeclared step,
/// is a setup bug and panics.
pub struct Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef>,
  pub(crate) handlers: HashMap<String, Vec<StepHandler<T, Err>>>,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Declares a flow from `(step_name, optional)` pairs.
  pub fn new(name: &str, steps: &[(&str, bool)]) -> Self {
    let mut flow = Self {
      name: name.to_string(),
      steps: Vec::with_capacity(steps.len()),
      handlers: HashMap::new(),
    };
    for (step_name, optional) in steps {
      if flow.has_step(step_name) {
        panic!("Flow '{}' setup error: step '{}' declared twice.", name, step_name);
      }
      flow.steps.push(StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
      });
    }
    flow
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn steps(&self) -> &[StepDef] {
    &self.steps
  }

  pub fn has_step(&self, step_name: &str) -> bool {
    self.steps.iter().any(|s| s.name == step_name)
  }

  fn ensure_step_exists(&self, step_name: &str) {
    if !self.has_step(step_name) {
      panic!(
        "Flow '{}' setup error: step '{}' is not declared.",
        self.name, step_name
      );
    }
  }

  /// Attaches a handler to `step_name`. Handlers of one step run in
  /// registration order. The handler's own error type only needs to convert
  /// into the flow's `Err`.
  pub fn on<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowData<T>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<FlowControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + 'static,
  {
    self.ensure_step_exists(step_name);
    let boxed: StepHandler<T, Err> = Box::new(move |data| {
      let fut = handler_fn(data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    self.handlers.entry(step_name.to_string()).or_default().push(boxed);
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    self.ensure_step_exists(step_name);
    if let Some(step) = self.steps.iter_mut().find(|s| s.name == step_name) {
      step.optional = optional;
    }
  }
}
