// core/src/money.rs

/// Formats an amount as whole US dollars with thousands separators, e.g.
/// `1200.0` becomes `$1,200`. Non-finite input renders as `$0`.
pub fn format_usd(amount: f64) -> String {
  if !amount.is_finite() {
    return "$0".to_string();
  }
  let rounded = amount.round();
  let digits = format!("{}", rounded.abs() as u64);
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }
  if rounded < 0.0 {
    format!("-${}", grouped)
  } else {
    format!("${}", grouped)
  }
}
