//! Russian display names and number formatting used by the Mini App UI

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Category, Condition, Rarity, ReportReason};

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Main => "Мейн",
            Category::Custom => "Кастомки",
            Category::Premium => "Премки",
            Category::Special => "Спецки",
            Category::Sets => "Наборы",
        }
    }
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Stg => "STG",
            Rarity::Th => "TH",
            Rarity::Main => "Мейн",
            Rarity::Rare => "Редкий",
            Rarity::SuperTreasure => "Супер сокровище",
        }
    }
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::NewInBox => "Новый в коробке",
            Condition::Excellent => "Отличное",
            Condition::Good => "Хорошее",
            Condition::Used => "Б/у",
            Condition::Damaged => "Поврежденный",
        }
    }
}

impl ReportReason {
    pub fn label(&self) -> &'static str {
        match self {
            ReportReason::Scam => "Мошенничество",
            ReportReason::FakeProduct => "Поддельный товар",
            ReportReason::WrongDescription => "Несоответствие описанию",
            ReportReason::BadBehavior => "Грубое поведение",
            ReportReason::Spam => "Спам",
            ReportReason::Other => "Другое",
        }
    }
}

/// Thousands separator of the ru-RU number format (no-break space)
const GROUP_SEPARATOR: char = '\u{a0}';

/// Format a price the ru-RU way: `1 234 567,5`
///
/// At most three fraction digits are kept and trailing zeros are dropped.
pub fn format_price(price: Decimal) -> String {
    let rounded = price
        .round_dp_with_strategy(3, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{}{},{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Five-character star bar: `★` full, `½` half, `☆` empty
pub fn stars(rating: Decimal) -> String {
    let rating = rating.to_f64().unwrap_or(0.0).clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;

    (0..5)
        .map(|i| {
            if i < full {
                '★'
            } else if i == full && half {
                '½'
            } else {
                '☆'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(dec("45.00")), "45");
        assert_eq!(format_price(dec("1500")), "1\u{a0}500");
        assert_eq!(format_price(dec("1234567.5")), "1\u{a0}234\u{a0}567,5");
        assert_eq!(format_price(dec("999.999")), "999,999");
        assert_eq!(format_price(dec("0.1234")), "0,123");
        assert_eq!(format_price(dec("0")), "0");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(dec("5.00")), "★★★★★");
        assert_eq!(stars(dec("4.50")), "★★★★½");
        assert_eq!(stars(dec("4.33")), "★★★★☆");
        assert_eq!(stars(dec("0")), "☆☆☆☆☆");
        assert_eq!(stars(dec("2.5")), "★★½☆☆");
    }

    #[test]
    fn test_every_variant_has_a_label() {
        assert!(Category::ALL.iter().all(|c| !c.label().is_empty()));
        assert!(Rarity::ALL.iter().all(|r| !r.label().is_empty()));
        assert!(Condition::ALL.iter().all(|c| !c.label().is_empty()));
        assert!(ReportReason::ALL.iter().all(|r| !r.label().is_empty()));
        assert_eq!(Rarity::SuperTreasure.label(), "Супер сокровище");
    }
}
