// site/src/services/webhook.rs

//! Relays newly stored orders to the configured webhook as JSON.

use async_trait::async_trait;
use pharaoh::{DeliveryFailure, OrderNotification, OrderNotifier};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub struct WebhookNotifier {
  client: reqwest::Client,
  url: String,
}

impl WebhookNotifier {
  /// Without a timeout the client waits as long as the connection allows.
  pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    Ok(Self {
      client: builder.build()?,
      url: url.into(),
    })
  }
}

fn transport_failure(err: reqwest::Error) -> DeliveryFailure {
  DeliveryFailure::Transport {
    timed_out: err.is_timeout(),
    detail: err.to_string(),
  }
}

#[async_trait]
impl OrderNotifier for WebhookNotifier {
  #[instrument(name = "WebhookNotifier::notify", skip_all, fields(order_id = %notification.id), err(Display))]
  async fn notify(&self, notification: &OrderNotification) -> Result<(), DeliveryFailure> {
    let response = self
      .client
      .post(&self.url)
      .json(notification)
      .send()
      .await
      .map_err(transport_failure)?;

    let status = response.status();
    if status.is_success() {
      debug!(status = status.as_u16(), "Webhook accepted order.");
      return Ok(());
    }
    warn!(status = status.as_u16(), "Webhook rejected order.");
    Err(DeliveryFailure::Status {
      code: status.as_u16(),
      text: status.canonical_reason().unwrap_or("").to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{NaiveDate, Utc};
  use pharaoh::model::{OrderDraft, SourcePage};
  use uuid::Uuid;
  use wiremock::matchers::{body_partial_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn notification() -> OrderNotification {
    OrderNotification {
      details: OrderDraft {
        name: "Mona Adel".to_string(),
        email: "mona@example.com".to_string(),
        phone: "+20 111 222 3333".to_string(),
        address: None,
        notes: None,
        date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        people: 3,
        source_page: SourcePage::Trip,
        source_id: "12".to_string(),
        source_name: "Siwa Oasis".to_string(),
        price: Some(300.0),
      },
      id: Uuid::new_v4(),
      created_at: Utc::now(),
    }
  }

  #[tokio::test]
  async fn posts_the_order_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/orders"))
      .and(body_partial_json(serde_json::json!({
        "email": "mona@example.com",
        "source_page": "trip",
        "people": 3
      })))
      .respond_with(ResponseTemplate::new(200))
      .expect(1)
      .mount(&server)
      .await;

    let notifier = WebhookNotifier::new(format!("{}/orders", server.uri()), None).unwrap();
    notifier.notify(&notification()).await.unwrap();
  }

  #[tokio::test]
  async fn non_success_status_is_reported_with_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let notifier = WebhookNotifier::new(server.uri(), None).unwrap();
    let failure = notifier.notify(&notification()).await.unwrap_err();
    assert_eq!(
      failure,
      DeliveryFailure::Status {
        code: 500,
        text: "Internal Server Error".to_string()
      }
    );
  }

  #[tokio::test]
  async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
      .mount(&server)
      .await;

    let notifier = WebhookNotifier::new(server.uri(), Some(Duration::from_millis(100))).unwrap();
    let failure = notifier.notify(&notification()).await.unwrap_err();
    assert!(matches!(failure, DeliveryFailure::Transport { timed_out: true, .. }));
  }
}
