// core/src/locale.rs

//! Customer- and admin-facing text in Arabic and English.
//!
//! Messages are chosen from the structured error kinds, never by inspecting
//! error strings. The locale is passed in by the caller.

use crate::error::{BookingError, DeliveryFailure, StoreError};
use crate::model::{DuplicateKey, ExistingOrder, OrderStatus, SourcePage};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const AR_MONTHS: [&str; 12] = [
  "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  Ar,
  En,
}

impl FromStr for Locale {
  type Err = String;

  /// Accepts bare or regional tags (`ar`, `ar-EG`, `en_US`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let tag = s.trim().to_ascii_lowercase();
    let primary = tag.split(['-', '_']).next().unwrap_or_default();
    match primary {
      "ar" => Ok(Locale::Ar),
      "en" => Ok(Locale::En),
      _ => Err(format!("unsupported locale '{}'", s.trim())),
    }
  }
}

impl Locale {
  /// First supported language in an `Accept-Language` header, by listed order.
  pub fn from_accept_language(header: &str) -> Option<Locale> {
    header
      .split(',')
      .filter_map(|part| part.split(';').next())
      .find_map(|tag| tag.parse().ok())
  }

  /// The message shown to a visitor whose booking failed.
  pub fn booking_message(self, err: &BookingError) -> String {
    match err {
      BookingError::Validation(detail) => match self {
        Locale::Ar => format!("بيانات الحجز غير صالحة: {}", detail),
        Locale::En => format!("The booking details are invalid: {}", detail),
      },
      BookingError::DuplicateConflict {
        key,
        existing: Some(existing),
      } => self.duplicate_message(key, existing),
      BookingError::DuplicateConflict { existing: None, .. } => match self {
        Locale::Ar => "لقد قمت بالفعل بإرسال طلب بنفس البريد الإلكتروني لهذه الباقة/التجربة في نفس التاريخ. يرجى اختيار تاريخ آخر أو استخدام بريد إلكتروني مختلف.".to_string(),
        Locale::En => "You have already submitted a request with this email for this package/experience on the same date. Please choose another date or use a different email.".to_string(),
      },
      BookingError::Persistence(store_err) => self.store_message(store_err),
      BookingError::Delivery { failure, .. } => self.delivery_message(failure),
      BookingError::Unknown(e) => match self {
        Locale::Ar => format!("حدث خطأ أثناء إرسال البيانات: {}", e),
        Locale::En => format!("An error occurred while sending your request: {}", e),
      },
    }
  }

  fn duplicate_message(self, key: &DuplicateKey, existing: &ExistingOrder) -> String {
    let submitted_at = self.format_timestamp(existing.created_at);
    let status = self.review_status(existing.status);
    match self {
      Locale::Ar => {
        let noun = match key.source_page {
          SourcePage::Package => "الباقة",
          _ => "التجربة",
        };
        format!(
          "لقد قمت بالفعل بإرسال طلب بنفس البريد الإلكتروني لهذه {} في نفس التاريخ ({}).\nتم إرسال الطلب السابق في {} وحالته الحالية: {}.\nيرجى اختيار تاريخ آخر أو استخدام بريد إلكتروني مختلف.",
          noun,
          key.date.format("%Y-%m-%d"),
          submitted_at,
          status
        )
      }
      Locale::En => {
        let noun = match key.source_page {
          SourcePage::Package => "package",
          _ => "experience",
        };
        format!(
          "You have already submitted a request with this email for this {} on the same date ({}).\nThe previous request was sent on {} and its current status is: {}.\nPlease choose another date or use a different email.",
          noun,
          key.date.format("%Y-%m-%d"),
          submitted_at,
          status
        )
      }
    }
  }

  /// Status wording used in the duplicate message. Only the review-era
  /// statuses have a translation; anything else reads as unknown.
  fn review_status(self, status: OrderStatus) -> &'static str {
    match (self, status) {
      (Locale::Ar, OrderStatus::Pending) => "قيد المراجعة",
      (Locale::Ar, OrderStatus::Approved) => "تمت الموافقة عليه",
      (Locale::Ar, OrderStatus::Rejected) => "تم رفضه",
      (Locale::Ar, _) => "غير معروف",
      (Locale::En, OrderStatus::Pending) => "under review",
      (Locale::En, OrderStatus::Approved) => "approved",
      (Locale::En, OrderStatus::Rejected) => "rejected",
      (Locale::En, _) => "unknown",
    }
  }

  fn store_message(self, err: &StoreError) -> String {
    match err {
      StoreError::PermissionDenied(_) => self.permission_message().to_string(),
      StoreError::Unavailable { timed_out: true, .. } => self.timeout_message().to_string(),
      StoreError::Unavailable { timed_out: false, .. } => self.network_message().to_string(),
      other => {
        let detail = match other {
          StoreError::Backend(detail) => detail.clone(),
          other => other.to_string(),
        };
        match self {
          Locale::Ar => format!("خطأ في قاعدة البيانات: {}", detail),
          Locale::En => format!("Database error: {}", detail),
        }
      }
    }
  }

  fn delivery_message(self, failure: &DeliveryFailure) -> String {
    match failure {
      DeliveryFailure::Status { code, text } => match self {
        Locale::Ar => format!(
          "حدث خطأ أثناء إرسال البيانات إلى نظام المتابعة. الرجاء المحاولة مرة أخرى لاحقًا أو التواصل مع الدعم الفني. ({}: {})",
          code, text
        ),
        Locale::En => format!(
          "An error occurred while sending your request to our follow-up system. Please try again later or contact support. ({}: {})",
          code, text
        ),
      },
      DeliveryFailure::Transport { timed_out: true, .. } => self.timeout_message().to_string(),
      DeliveryFailure::Transport { timed_out: false, .. } => self.network_message().to_string(),
    }
  }

  fn timeout_message(self) -> &'static str {
    match self {
      Locale::Ar => "انتهت مهلة الاتصال بالخادم. يرجى المحاولة مرة أخرى لاحقًا.",
      Locale::En => "The connection to the server timed out. Please try again later.",
    }
  }

  fn network_message(self) -> &'static str {
    match self {
      Locale::Ar => "حدث خطأ في الاتصال بالخادم. يرجى التحقق من اتصالك بالإنترنت والمحاولة مرة أخرى.",
      Locale::En => "Could not reach the server. Please check your internet connection and try again.",
    }
  }

  fn permission_message(self) -> &'static str {
    match self {
      Locale::Ar => "ليس لديك صلاحية للقيام بهذه العملية. يرجى تسجيل الدخول أو التواصل مع الدعم الفني.",
      Locale::En => "You are not allowed to perform this action. Please sign in or contact support.",
    }
  }

  /// Badge text for an order status in the admin view.
  pub fn status_label(self, status: OrderStatus) -> &'static str {
    match (self, status) {
      (Locale::Ar, OrderStatus::Pending) => "قيد الانتظار",
      (Locale::Ar, OrderStatus::Confirmed) => "مؤكد",
      (Locale::Ar, OrderStatus::Cancelled) => "ملغي",
      (Locale::Ar, OrderStatus::Approved) => "تمت الموافقة",
      (Locale::Ar, OrderStatus::Rejected) => "مرفوض",
      (Locale::En, OrderStatus::Pending) => "Pending",
      (Locale::En, OrderStatus::Confirmed) => "Confirmed",
      (Locale::En, OrderStatus::Cancelled) => "Cancelled",
      (Locale::En, OrderStatus::Approved) => "Approved",
      (Locale::En, OrderStatus::Rejected) => "Rejected",
    }
  }

  /// Confirmation shown after an admin changes an order's status.
  pub fn status_changed_message(self, status: OrderStatus) -> &'static str {
    match (self, status) {
      (Locale::Ar, OrderStatus::Pending) => "تم تعليق الطلب",
      (Locale::Ar, OrderStatus::Confirmed) => "تم تأكيد الطلب",
      (Locale::Ar, OrderStatus::Cancelled) => "تم إلغاء الطلب",
      (Locale::Ar, _) => "تم تحديث حالة الطلب",
      (Locale::En, OrderStatus::Pending) => "Order put on hold",
      (Locale::En, OrderStatus::Confirmed) => "Order confirmed",
      (Locale::En, OrderStatus::Cancelled) => "Order cancelled",
      (Locale::En, _) => "Order status updated",
    }
  }

  pub fn status_update_failed_message(self) -> &'static str {
    match self {
      Locale::Ar => "حدث خطأ أثناء تحديث حالة الطلب. يرجى المحاولة مرة أخرى.",
      Locale::En => "Something went wrong while updating the order status. Please try again.",
    }
  }

  /// Long-form date and time, in UTC.
  pub fn format_timestamp(self, at: DateTime<Utc>) -> String {
    let (is_pm, hour12) = at.hour12();
    match self {
      Locale::Ar => {
        let month = AR_MONTHS[at.month0() as usize];
        let text = format!(
          "{} {} {} في {:02}:{:02} {}",
          at.day(),
          month,
          at.year(),
          hour12,
          at.minute(),
          if is_pm { "م" } else { "ص" }
        );
        arabic_digits(&text)
      }
      Locale::En => at.format("%B %-d, %Y at %I:%M %p").to_string(),
    }
  }
}

/// Replaces ASCII digits with Arabic-Indic digits.
fn arabic_digits(text: &str) -> String {
  text
    .chars()
    .map(|c| match c.to_digit(10) {
      Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
      None => c,
    })
    .collect()
}
