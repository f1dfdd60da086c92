//! Spoken numerals
//!
//! Converts integers in `0..=999` into the words a listener expects to hear.
//! Anything outside that range is spoken as plain digits.

use domain::Language;

/// Word tables for one language
#[derive(Debug)]
struct NumeralTable {
    zero: &'static str,
    /// Index 0 is unused
    ones: [&'static str; 10],
    /// 10 through 19
    teens: [&'static str; 10],
    /// Indices 0 and 1 are unused
    tens: [&'static str; 10],
    hundred: &'static str,
}

const TELUGU: NumeralTable = NumeralTable {
    zero: "సున్నా",
    ones: [
        "", "ఒకటి", "రెండు", "మూడు", "నాలుగు", "ఐదు", "ఆరు", "ఏడు", "ఎనిమిది", "తొమ్మిది",
    ],
    teens: [
        "పది",
        "పదకొండు",
        "పన్నెండు",
        "పదమూడు",
        "పద్నాలుగు",
        "పదిహేను",
        "పదహారు",
        "పదిహేడు",
        "పద్దెనిమిది",
        "పంతొమ్మిది",
    ],
    tens: [
        "", "", "ఇరవై", "ముప్పై", "నలభై", "యాభై", "అరవై", "డెబ్బై", "ఎనభై", "తొంభై",
    ],
    hundred: "వందల",
};

const ENGLISH: NumeralTable = NumeralTable {
    zero: "zero",
    ones: [
        "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ],
    teens: [
        "ten",
        "eleven",
        "twelve",
        "thirteen",
        "fourteen",
        "fifteen",
        "sixteen",
        "seventeen",
        "eighteen",
        "nineteen",
    ],
    tens: [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ],
    hundred: "hundred",
};

impl NumeralTable {
    const fn for_language(language: Language) -> &'static Self {
        match language {
            Language::English => &ENGLISH,
            Language::Telugu => &TELUGU,
        }
    }

    /// Words for `n` in `0..=999`
    fn compose(&self, n: usize) -> String {
        match n {
            0 => self.zero.to_string(),
            1..=9 => self.ones[n].to_string(),
            10..=19 => self.teens[n - 10].to_string(),
            20..=99 => {
                let tens = self.tens[n / 10];
                match n % 10 {
                    0 => tens.to_string(),
                    rest => format!("{tens} {}", self.ones[rest]),
                }
            },
            _ => {
                let hundreds = format!("{} {}", self.ones[n / 100], self.hundred);
                match n % 100 {
                    0 => hundreds,
                    rest => format!("{hundreds} {}", self.compose(rest)),
                }
            },
        }
    }
}

/// Spoken form of `n` for a BCP-47 language tag
///
/// Tags are resolved by primary subtag (`te`, `te-IN` and `TE_in` all mean
/// Telugu). Unknown tags, negative numbers and `n >= 1000` yield the decimal
/// string. Never fails.
#[must_use]
pub fn localize(n: i64, language_tag: &str) -> String {
    Language::from_tag(language_tag).map_or_else(|| n.to_string(), |language| localize_in(n, language))
}

/// Spoken form of `n` in `language`
#[must_use]
pub fn localize_in(n: i64, language: Language) -> String {
    match usize::try_from(n) {
        Ok(value) if value < 1000 => NumeralTable::for_language(language).compose(value),
        _ => n.to_string(),
    }
}
