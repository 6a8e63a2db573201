// tests/flow_tests.rs
mod common;
use common::setup_tracing;
use pharaoh::{Flow, FlowControl, FlowData, FlowError, FlowOutcome};
use serial_test::serial;

#[derive(Debug, Default, Clone)]
struct Trace {
  steps: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum TestError {
  #[error("flow: {0}")]
  Flow(#[from] FlowError),
  #[error("handler failed: {0}")]
  Handler(String),
}

fn record(step: &'static str, control: FlowControl) -> impl Fn(FlowData<Trace>) -> std::future::Ready<Result<FlowControl, TestError>> {
  move |ctx: FlowData<Trace>| {
    ctx.write().steps.push(step.to_string());
    std::future::ready(Ok(control))
  }
}

fn fail(step: &'static str) -> impl Fn(FlowData<Trace>) -> std::future::Ready<Result<FlowControl, TestError>> {
  move |ctx: FlowData<Trace>| {
    ctx.write().steps.push(step.to_string());
    std::future::ready(Err(TestError::Handler(step.to_string())))
  }
}

#[tokio::test]
#[serial]
async fn steps_run_in_declared_order() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("ordered", &[("a", false), ("b", false), ("c", false)]);
  flow.on("c", record("c", FlowControl::Continue));
  flow.on("a", record("a1", FlowControl::Continue));
  flow.on("b", record("b", FlowControl::Continue));
  flow.on("a", record("a2", FlowControl::Continue));

  let ctx = FlowData::new(Trace::default());
  let outcome = flow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, FlowOutcome::Completed);
  assert_eq!(ctx.read().steps, ["a1", "a2", "b", "c"]);
}

#[tokio::test]
#[serial]
async fn stop_halts_remaining_handlers_and_steps() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("stopping", &[("a", false), ("b", false)]);
  flow.on("a", record("a1", FlowControl::Stop));
  flow.on("a", record("a2", FlowControl::Continue));
  flow.on("b", record("b", FlowControl::Continue));

  let ctx = FlowData::new(Trace::default());
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Stopped);
  assert_eq!(ctx.read().steps, ["a1"]);
}

#[tokio::test]
#[serial]
async fn required_step_error_aborts_the_run() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("failing", &[("a", false), ("b", false)]);
  flow.on("a", fail("a"));
  flow.on("b", record("b", FlowControl::Continue));

  let ctx = FlowData::new(Trace::default());
  let err = flow.run(ctx.clone()).await.unwrap_err();

  assert!(matches!(err, TestError::Handler(ref s) if s == "a"));
  assert_eq!(ctx.read().steps, ["a"]);
}

#[tokio::test]
#[serial]
async fn optional_step_error_is_skipped() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("tolerant", &[("a", true), ("b", false)]);
  flow.on("a", fail("a1"));
  flow.on("a", record("a2", FlowControl::Continue));
  flow.on("b", record("b", FlowControl::Continue));

  let ctx = FlowData::new(Trace::default());
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Completed);
  assert_eq!(ctx.read().steps, ["a1", "b"]);
}

#[tokio::test]
#[serial]
async fn required_step_without_handler_is_reported() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("incomplete", &[("a", false), ("missing", false)]);
  flow.on("a", record("a", FlowControl::Continue));

  let err = flow.run(FlowData::new(Trace::default())).await.unwrap_err();
  match err {
    TestError::Flow(FlowError::HandlerMissing { step_name }) => assert_eq!(step_name, "missing"),
    other => panic!("Expected HandlerMissing, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn optional_step_without_handler_is_skipped() {
  setup_tracing();
  let mut flow = Flow::<Trace, TestError>::new("sparse", &[("maybe", true), ("b", false)]);
  flow.on("b", record("b", FlowControl::Continue));

  let ctx = FlowData::new(Trace::default());
  assert_eq!(flow.run(ctx.clone()).await.unwrap(), FlowOutcome::Completed);
  assert_eq!(ctx.read().steps, ["b"]);
}

#[test]
fn set_optional_marks_the_step() {
  let mut flow = Flow::<Trace, TestError>::new("toggle", &[("a", false)]);
  flow.set_optional("a", true);
  assert!(flow.steps()[0].optional);
  assert!(flow.has_step("a"));
  assert!(!flow.has_step("z"));
}

#[test]
#[should_panic(expected = "not declared")]
fn handler_for_undeclared_step_panics() {
  let mut flow = Flow::<Trace, TestError>::new("strict", &[("a", false)]);
  flow.on("nope", record("nope", FlowControl::Continue));
}

#[test]
#[should_panic(expected = "declared twice")]
fn duplicate_step_declaration_panics() {
  let _ = Flow::<Trace, TestError>::new("dupes", &[("a", false), ("a", true)]);
}
