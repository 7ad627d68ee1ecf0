//! Currency generator.
//!
//! The template grows with the number of digits typed: two cents slots are
//! always present, the integer part gets the remaining digits (at least one)
//! grouped by thousands. The transform normalizes whatever the walk produced
//! into a canonical amount, so typing shifts digits in from the right.

use crate::generator::MaskGenerator;
use crate::rules::{Rule, RuleSet};

/// Placeholder used by currency templates. Prefixes must not contain it.
/// Other digits in a prefix are literals and never count toward the amount.
const DIGIT_SLOT: char = '9';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyOptions {
    pub prefix: String,
    pub thousand_separator: char,
    pub cents_separator: char,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            thousand_separator: ',',
            cents_separator: '.',
        }
    }
}

impl CurrencyOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_thousand_separator(mut self, separator: char) -> Self {
        self.thousand_separator = separator;
        self
    }

    pub fn with_cents_separator(mut self, separator: char) -> Self {
        self.cents_separator = separator;
        self
    }
}

impl MaskGenerator {
    /// Currency amounts with fixed two-digit cents.
    ///
    /// ```
    /// use mask_core::{CurrencyOptions, MaskGenerator, mask};
    ///
    /// let brl = MaskGenerator::currency(
    ///     CurrencyOptions::default()
    ///         .with_prefix("$ ")
    ///         .with_thousand_separator('.')
    ///         .with_cents_separator(','),
    /// );
    /// assert_eq!(mask("1", &brl).value, "$ 0,01");
    /// assert_eq!(mask("123456", &brl).value, "$ 1.234,56");
    /// ```
    pub fn currency(options: CurrencyOptions) -> Self {
        debug_assert!(
            !options.prefix.contains(DIGIT_SLOT),
            "currency prefix {:?} contains the digit placeholder '{DIGIT_SLOT}'",
            options.prefix
        );
        let rules = RuleSet::new().with(DIGIT_SLOT, Rule::ascii_digit());
        let for_template = options.clone();
        Self::new(rules, move |value| currency_template(value, &for_template))
            .with_transform(move |masked| currency_transform(masked, &options))
    }
}

/// The part of `value` after the leading run it shares with the prefix.
///
/// A partially erased prefix (`"R1"` for `"R1 "`) is skipped as well, so its
/// digits never leak into the amount.
fn amount_part<'a>(value: &'a str, prefix: &str) -> &'a str {
    let shared: usize = value
        .chars()
        .zip(prefix.chars())
        .take_while(|(v, p)| v == p)
        .map(|(v, _)| v.len_utf8())
        .sum();
    &value[shared..]
}

fn currency_template(value: &str, options: &CurrencyOptions) -> String {
    let digits = amount_part(value, &options.prefix)
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    let integer_len = digits.saturating_sub(2).max(1);
    let mut out = options.prefix.clone();
    push_grouped(&mut out, &vec![DIGIT_SLOT; integer_len], options.thousand_separator);
    out.push(options.cents_separator);
    out.push(DIGIT_SLOT);
    out.push(DIGIT_SLOT);
    out
}

fn currency_transform(masked: &str, options: &CurrencyOptions) -> String {
    let digits: String = amount_part(masked, &options.prefix)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return masked.to_owned();
    }
    let padded = format!("{:0>3}", digits.trim_start_matches('0'));
    let (integer, cents) = padded.split_at(padded.len() - 2);
    let mut out = options.prefix.clone();
    let integer: Vec<char> = integer.chars().collect();
    push_grouped(&mut out, &integer, options.thousand_separator);
    out.push(options.cents_separator);
    out.push_str(cents);
    out
}

fn push_grouped(out: &mut String, digits: &[char], separator: char) {
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(*d);
    }
}
