//! Fixed-locale number and date formatting.
//!
//! Invoices are printed in one locale only (Bangladeshi Bengali, taka). The
//! formatting rules are data in a [`Locale`] value; [`BN_BD`] is the one the
//! renderer uses.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number, currency and calendar conventions of one locale.
#[derive(Debug)]
pub struct Locale {
    pub tag: &'static str,
    digits: [char; 10],
    decimal_separator: char,
    group_separator: char,
    currency_symbol: &'static str,
    months: [&'static str; 12],
}

/// Bengali (Bangladesh), Bangladeshi taka.
pub static BN_BD: Locale = Locale {
    tag: "bn-BD",
    digits: ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'],
    decimal_separator: '.',
    group_separator: ',',
    currency_symbol: "৳",
    months: [
        "জানুয়ারি",
        "ফেব্রুয়ারি",
        "মার্চ",
        "এপ্রিল",
        "মে",
        "জুন",
        "জুলাই",
        "আগস্ট",
        "সেপ্টেম্বর",
        "অক্টোবর",
        "নভেম্বর",
        "ডিসেম্বর",
    ],
};

impl Locale {
    /// Replace ASCII digits with the locale's digits, leaving everything else.
    pub fn localize_digits(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => self.digits[d as usize],
                _ => c,
            })
            .collect()
    }

    /// Money with exactly two decimals, South Asian grouping and a trailing
    /// currency symbol: `1234567.5` → `১২,৩৪,৫৬৭.৫০৳`. Non-finite amounts
    /// print as zero.
    pub fn format_money(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let fixed = two_decimals(amount.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let mut out = String::with_capacity(fixed.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.localize_digits(&self.group(int_part)));
        out.push(self.decimal_separator);
        out.push_str(&self.localize_digits(frac_part));
        out.push_str(self.currency_symbol);
        out
    }

    /// Quantity as typed: whole numbers without decimals, otherwise up to two
    /// decimals with trailing zeros dropped.
    pub fn format_quantity(&self, quantity: f64) -> String {
        let quantity = if quantity.is_finite() { quantity } else { 0.0 };
        let text = if quantity == quantity.trunc() {
            format!("{quantity:.0}")
        } else {
            let fixed = two_decimals(quantity);
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        };
        self.localize_digits(&text)
    }

    /// Long date, `d MMMM, y`: `১৬ অক্টোবর, ২০২৬`.
    pub fn format_date_long(&self, date: NaiveDate) -> String {
        let month = self.months[date.month0() as usize];
        self.localize_digits(&format!("{} {}, {}", date.day(), month, date.year()))
    }

    /// Last three digits, then groups of two: `1234567` → `12,34,567`.
    fn group(&self, digits: &str) -> String {
        if digits.len() <= 3 {
            return digits.to_string();
        }
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (front, pair) = rest.split_at(rest.len() - 2);
            groups.push(pair);
            rest = front;
        }
        groups.push(rest);
        groups.reverse();

        let sep = self.group_separator.to_string();
        let mut out = groups.join(&sep);
        out.push(self.group_separator);
        out.push_str(tail);
        out
    }
}

/// `value` with exactly two decimals, ties rounded away from zero on the
/// shortest decimal form of the float: `2.625` → `2.63`, `1.005` → `1.01`.
fn two_decimals(value: f64) -> String {
    match Decimal::from_str(&value.to_string()) {
        Ok(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        // Outside Decimal's range.
        Err(_) => format!("{value:.2}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn money_uses_bengali_digits_and_taka_suffix() {
        assert_eq!(BN_BD.format_money(0.0), "০.০০৳");
        assert_eq!(BN_BD.format_money(250.0), "২৫০.০০৳");
        assert_eq!(BN_BD.format_money(1234.5), "১,২৩৪.৫০৳");
        assert_eq!(BN_BD.format_money(1_234_567.0), "১২,৩৪,৫৬৭.০০৳");
        assert_eq!(BN_BD.format_money(123_456_789.5), "১২,৩৪,৫৬,৭৮৯.৫০৳");
    }

    #[test]
    fn money_handles_signs_and_garbage() {
        assert_eq!(BN_BD.format_money(-60.0), "-৬০.০০৳");
        assert_eq!(BN_BD.format_money(-0.001), "০.০০৳");
        assert_eq!(BN_BD.format_money(f64::NAN), "০.০০৳");
        assert_eq!(BN_BD.format_money(f64::INFINITY), "০.০০৳");
    }

    #[test]
    fn money_ties_round_away_from_zero() {
        assert_eq!(BN_BD.format_money(0.25 * 10.50), "২.৬৩৳");
        assert_eq!(BN_BD.format_money(0.125), "০.১৩৳");
        assert_eq!(BN_BD.format_money(1.005), "১.০১৳");
        assert_eq!(BN_BD.format_money(-2.625), "-২.৬৩৳");

        let huge = BN_BD.format_money(1e30);
        assert!(huge.starts_with('১'));
        assert!(huge.ends_with(".০০৳"));
    }

    #[test]
    fn quantities_drop_needless_decimals() {
        assert_eq!(BN_BD.format_quantity(2.0), "২");
        assert_eq!(BN_BD.format_quantity(0.5), "০.৫");
        assert_eq!(BN_BD.format_quantity(1.25), "১.২৫");
        assert_eq!(BN_BD.format_quantity(f64::NAN), "০");
    }

    #[test]
    fn long_dates_spell_the_month() {
        assert_eq!(BN_BD.format_date_long(date(2026, 10, 16)), "১৬ অক্টোবর, ২০২৬");
        assert_eq!(BN_BD.format_date_long(date(2025, 1, 5)), "৫ জানুয়ারি, ২০২৫");
        assert_eq!(BN_BD.format_date_long(date(2024, 2, 29)), "২৯ ফেব্রুয়ারি, ২০২৪");
    }

    #[test]
    fn non_digits_pass_through() {
        assert_eq!(BN_BD.localize_digits("ID 4K7Q"), "ID ৪K৭Q");
    }

    proptest! {
        /// Property: stripping the formatting gives back the rounded amount.
        #[test]
        fn money_round_trips_through_ascii(cents in 0u64..10_000_000_000u64) {
            let amount = cents as f64 / 100.0;
            let formatted = BN_BD.format_money(amount);
            prop_assert!(formatted.ends_with('৳'));

            let ascii: String = formatted
                .chars()
                .filter_map(|c| match c {
                    '০'..='৯' => char::from_digit(c as u32 - '০' as u32, 10),
                    '.' => Some('.'),
                    _ => None,
                })
                .collect();
            prop_assert_eq!(ascii, format!("{amount:.2}"));
        }
    }
}
