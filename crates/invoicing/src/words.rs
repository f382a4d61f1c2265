//! Currency amounts written out in English words.
//!
//! `710.01` under `en_IN` reads "Indian Rupees Seven Hundred Ten and One Paise Only".

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use taxinvoice_core::round_money;

use crate::config::CurrencyLocale;

const CURRENCY: &str = "Indian Rupees";
const SUBUNIT: &str = "Paise";

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Write `amount` as a currency phrase, rounded to paise first.
pub fn amount_in_words(amount: Decimal, locale: CurrencyLocale) -> String {
    let rounded = round_money(amount.abs());
    let whole = rounded.trunc();
    let rupees = whole.to_u128().unwrap_or_default();
    let paise = ((rounded - whole) * Decimal::ONE_HUNDRED).to_u128().unwrap_or_default();

    let mut phrase = String::new();
    if amount < Decimal::ZERO && !rounded.is_zero() {
        phrase.push_str("Minus ");
    }
    phrase.push_str(CURRENCY);
    phrase.push(' ');
    phrase.push_str(&number_in_words(rupees, locale));
    if paise > 0 {
        phrase.push_str(" and ");
        phrase.push_str(&number_in_words(paise, locale));
        phrase.push(' ');
        phrase.push_str(SUBUNIT);
    }
    phrase.push_str(" Only");
    phrase
}

/// Cardinal number in title-cased words, grouped per `locale`.
pub fn number_in_words(n: u128, locale: CurrencyLocale) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }
    let mut words = Vec::new();
    match locale {
        CurrencyLocale::EnIn => push_indian(n, &mut words),
        CurrencyLocale::En => push_international(n, &mut words),
    }
    words.join(" ")
}

// 1,23,45,678 -> crore / lakh / thousand / hundreds; crores above 99 recurse.
fn push_indian(n: u128, words: &mut Vec<&'static str>) {
    let crore = n / 10_000_000;
    let lakh = (n / 100_000) % 100;
    let thousand = (n / 1_000) % 100;
    let rest = n % 1_000;

    if crore > 0 {
        push_indian(crore, words);
        words.push("Crore");
    }
    if lakh > 0 {
        push_below_thousand(lakh, words);
        words.push("Lakh");
    }
    if thousand > 0 {
        push_below_thousand(thousand, words);
        words.push("Thousand");
    }
    if rest > 0 {
        push_below_thousand(rest, words);
    }
}

fn push_international(n: u128, words: &mut Vec<&'static str>) {
    const SCALES: [(u128, &str); 4] = [
        (1_000_000_000_000, "Trillion"),
        (1_000_000_000, "Billion"),
        (1_000_000, "Million"),
        (1_000, "Thousand"),
    ];

    let mut rest = n;
    for (i, (scale, name)) in SCALES.iter().enumerate() {
        let count = rest / scale;
        if count == 0 {
            continue;
        }
        // Only the largest scale can exceed 999.
        if i == 0 && count >= 1_000 {
            push_international(count, words);
        } else {
            push_below_thousand(count, words);
        }
        words.push(*name);
        rest %= scale;
    }
    if rest > 0 {
        push_below_thousand(rest, words);
    }
}

fn push_below_thousand(n: u128, words: &mut Vec<&'static str>) {
    debug_assert!(n < 1_000);
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("Hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        words.push(ONES[rest]);
    }
}
