use chrono::NaiveDate;
use rust_decimal::Decimal;

/// pt-BR currency with two decimals: `R$ 1.850,00`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}R$ {},{}", sign, group_thousands(int_part), frac_part)
}

/// pt-BR currency without forced decimals: `R$ 1.850`, `R$ 1.850,5`.
pub fn format_brl_compact(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    let text = normalized.abs().to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}R$ {},{}", sign, group_thousands(int_part), frac_part)
        }
        None => format!("{}R$ {}", sign, group_thousands(&text)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}
