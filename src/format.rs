//! 화면 표시용 숫자 형식. 통화 코드는 라벨일 뿐 환산하지 않는다.

use crate::i18n::{keys, Translator};

fn currency_symbol(code: &str) -> Option<&'static str> {
    Some(match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "CAD" => "CA$",
        "AUD" => "A$",
        _ => return None,
    })
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

/// 정수부에 천 단위 구분자를 넣는다.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 금액을 통화 라벨과 함께 표시한다.
///
/// 세 글자 영문 코드는 `$1,234.56` / `MAD 1,234.56` 형태, 그 밖의 라벨은 `1235 라벨`.
pub fn format_currency(value: f64, code: &str) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return format!("{value:.0} {code}");
    }
    let formatted = format!("{:.*}", fraction_digits(&code), value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut body = group_thousands(int_part);
    if let Some(frac) = frac_part {
        body.push('.');
        body.push_str(frac);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{code} {body}"),
    }
}

/// 회수기간 표시. 기간 안에 회수하지 못하면 "> Horizon".
pub fn format_payback(payback_years: Option<f64>, tr: &Translator) -> String {
    match payback_years {
        Some(years) => format!("{years:.2} {}", tr.t(keys::VALUE_YEARS_SUFFIX)),
        None => tr.t(keys::VALUE_BEYOND_HORIZON).to_string(),
    }
}

/// IRR 표시. 계산 불가면 "N/A".
pub fn format_irr(irr: Option<f64>, tr: &Translator) -> String {
    match irr {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => tr.t(keys::VALUE_UNAVAILABLE).to_string(),
    }
}

/// 입력값 표시. 정수면 소수점 없이 쓴다.
pub fn format_plain(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbol_with_grouping() {
        assert_eq!(format_currency(1_234_567.891, "usd"), "$1,234,567.89");
        assert_eq!(format_currency(-43_600.0, "EUR"), "-€43,600.00");
        assert_eq!(format_currency(999.0, "USD"), "$999.00");
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(format_currency(1_500_000.4, "KRW"), "₩1,500,000");
    }

    #[test]
    fn unknown_valid_code_uses_code_prefix() {
        assert_eq!(format_currency(83_760.0, "MAD"), "MAD 83,760.00");
    }

    #[test]
    fn invalid_code_falls_back_to_plain_number() {
        assert_eq!(format_currency(1234.6, "DOLLARS"), "1235 DOLLARS");
        assert_eq!(format_currency(10.0, "U1"), "10 U1");
    }

    #[test]
    fn non_finite_is_unavailable() {
        assert_eq!(format_currency(f64::NAN, "USD"), "N/A");
    }

    #[test]
    fn payback_and_irr_strings() {
        let tr = Translator::new("en");
        assert_eq!(format_payback(Some(29.0 / 12.0), &tr), "2.42 yrs");
        assert_eq!(format_payback(None, &tr), "> Horizon");
        assert_eq!(format_irr(Some(0.4157), &tr), "41.6%");
        assert_eq!(format_irr(Some(0.0), &tr), "0.0%");
        assert_eq!(format_irr(None, &tr), "N/A");
    }

    #[test]
    fn plain_numbers_drop_trailing_zero() {
        assert_eq!(format_plain(12.0), "12");
        assert_eq!(format_plain(7.5), "7.5");
    }
}
