// core/src/booking/submission.rs

//! The order submission flow: validate, check for a duplicate, store, relay.

use super::duplicate::DuplicateChecker;
use super::notifier::{NotificationPolicy, OrderNotification, OrderNotifier};
use crate::error::{BookingError, StoreError};
use crate::flow::{Flow, FlowControl, FlowData, FlowOutcome};
use crate::locale::Locale;
use crate::model::{Order, OrderDraft, OrderStatus};
use crate::store::OrderStore;
use anyhow::anyhow;
use serde::Serialize;
use std::sync::Arc;
use tracing::{event, info, instrument, warn, Level};

pub const STEP_VALIDATE: &str = "validate_draft";
pub const STEP_CHECK_DUPLICATE: &str = "check_duplicate";
pub const STEP_PERSIST: &str = "persist_order";
pub const STEP_NOTIFY: &str = "notify_webhook";

/// State shared by the submission steps.
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
  pub draft: OrderDraft,
  pub order: Option<Order>,
  pub notified: bool,
}

impl SubmissionCtx {
  pub fn new(draft: OrderDraft) -> Self {
    Self {
      draft,
      order: None,
      notified: false,
    }
  }
}

/// What the booking form receives back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<Order>,
}

impl SubmissionOutcome {
  pub fn render(result: &Result<Order, BookingError>, locale: Locale) -> Self {
    match result {
      Ok(order) => Self {
        success: true,
        error: None,
        data: Some(order.clone()),
      },
      Err(err) => Self {
        success: false,
        error: Some(locale.booking_message(err)),
        data: None,
      },
    }
  }
}

/// Accepts booking drafts and turns them into stored, relayed orders.
pub struct SubmissionService {
  flow: Flow<SubmissionCtx, BookingError>,
}

impl SubmissionService {
  pub fn new(orders: Arc<dyn OrderStore>, notifier: Arc<dyn OrderNotifier>, policy: NotificationPolicy) -> Self {
    let checker = DuplicateChecker::new(orders.clone());
    let mut flow = Flow::new(
      "order_submission",
      &[
        (STEP_VALIDATE, false),
        (STEP_CHECK_DUPLICATE, false),
        (STEP_PERSIST, false),
        (STEP_NOTIFY, policy == NotificationPolicy::BestEffort),
      ],
    );

    flow.on(STEP_VALIDATE, |ctx: FlowData<SubmissionCtx>| async move {
      let verdict = ctx.read().draft.validate();
      if let Err(detail) = verdict {
        event!(Level::DEBUG, %detail, "Rejecting invalid booking draft.");
        return Err(BookingError::Validation(detail));
      }
      Ok(FlowControl::Continue)
    });

    let pre_check = checker.clone();
    flow.on(STEP_CHECK_DUPLICATE, move |ctx: FlowData<SubmissionCtx>| {
      let checker = pre_check.clone();
      async move {
        let key = ctx.read().draft.key();
        let found = checker.check(&key).await;
        if found.is_duplicate {
          info!(%key, "Booking already submitted.");
          return Err(BookingError::DuplicateConflict {
            key,
            existing: found.existing,
          });
        }
        Ok(FlowControl::Continue)
      }
    });

    let store = orders.clone();
    let conflict_check = checker;
    flow.on(STEP_PERSIST, move |ctx: FlowData<SubmissionCtx>| {
      let store = store.clone();
      let checker = conflict_check.clone();
      async move {
        let draft = ctx.read().draft.clone();
        match store.insert(&draft, OrderStatus::Pending).await {
          Ok(order) => {
            info!(order_id = %order.id, "Order stored.");
            ctx.write().order = Some(order);
            Ok(FlowControl::Continue)
          }
          Err(StoreError::Conflict { constraint }) => {
            // Lost a race with an identical submission, or the pre-check failed open.
            warn!(%constraint, "Insert hit the booking uniqueness constraint.");
            let key = draft.key();
            let found = checker.check(&key).await;
            Err(BookingError::DuplicateConflict {
              key,
              existing: found.existing,
            })
          }
          Err(e) => {
            event!(Level::ERROR, error = %e, "Failed to store order.");
            Err(BookingError::Persistence(e))
          }
        }
      }
    });

    flow.on(STEP_NOTIFY, move |ctx: FlowData<SubmissionCtx>| {
      let notifier = notifier.clone();
      async move {
        let stored = ctx.read().order.clone();
        let order = stored.ok_or_else(|| BookingError::Unknown(anyhow!("no stored order to relay")))?;
        let notification = OrderNotification::for_order(&order);
        notifier
          .notify(&notification)
          .await
          .map_err(|failure| BookingError::Delivery {
            order_id: order.id,
            failure,
          })?;
        ctx.write().notified = true;
        Ok::<_, BookingError>(FlowControl::Continue)
      }
    });

    Self { flow }
  }

  /// Runs the whole submission for one draft.
  #[instrument(
    name = "SubmissionService::submit",
    skip(self, draft),
    fields(source_page = %draft.source_page, source_id = %draft.source_id, date = %draft.date),
    err(Display)
  )]
  pub async fn submit(&self, draft: OrderDraft) -> Result<Order, BookingError> {
    let ctx = FlowData::new(SubmissionCtx::new(draft));
    if self.flow.run(ctx.clone()).await? == FlowOutcome::Stopped {
      return Err(BookingError::Unknown(anyhow!("submission flow stopped before completion")));
    }

    let (order, notified) = {
      let guard = ctx.read();
      (guard.order.clone(), guard.notified)
    };
    let order = order.ok_or_else(|| BookingError::Unknown(anyhow!("submission finished without a stored order")))?;
    if !notified {
      warn!(order_id = %order.id, "Order stored but the notification was not delivered.");
    }
    Ok(order)
  }

  /// [`submit`](Self::submit), rendered for the booking form.
  pub async fn submit_for_display(&self, draft: OrderDraft, locale: Locale) -> (SubmissionOutcome, Option<BookingError>) {
    let result = self.submit(draft).await;
    let outcome = SubmissionOutcome::render(&result, locale);
    (outcome, result.err())
  }
}
