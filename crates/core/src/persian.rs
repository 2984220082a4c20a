//! Number to Persian-word conversion.
//!
//! A small table supplies the atomic word forms (units, teens, tens,
//! hundreds, and the word for one thousand); everything else is composed
//! algorithmically, thousands first, with the conjunction " و " between
//! non-empty segments.

/// Largest absolute value the converter can render.
pub const ABS_COUNTING_LIMIT: i64 = 999_999;

const ZERO_WORD: &str = "صفر";
const NEGATIVE_PREFIX: &str = "منفی";
const THOUSAND_WORD: &str = "هزار";
const CONJUNCTION: &str = " و ";
const OUT_OF_RANGE_TEXT: &str =
    "خطا: عدد خارج از محدوده پشتیبانی شده (-999,999 تا +999,999)";

/// Atomic word forms: 1 through 19, the tens, the hundreds, and 1000.
fn atomic_word(n: i64) -> Option<&'static str> {
    let word = match n {
        1 => "یک",
        2 => "دو",
        3 => "سه",
        4 => "چهار",
        5 => "پنج",
        6 => "شش",
        7 => "هفت",
        8 => "هشت",
        9 => "نه",
        10 => "ده",
        11 => "یازده",
        12 => "دوازده",
        13 => "سیزده",
        14 => "چهارده",
        15 => "پانزده",
        16 => "شانزده",
        17 => "هفده",
        18 => "هجده",
        19 => "نوزده",
        20 => "بیست",
        30 => "سی",
        40 => "چهل",
        50 => "پنجاه",
        60 => "شصت",
        70 => "هفتاد",
        80 => "هشتاد",
        90 => "نود",
        100 => "صد",
        200 => "دویست",
        300 => "سیصد",
        400 => "چهارصد",
        500 => "پانصد",
        600 => "ششصد",
        700 => "هفتصد",
        800 => "هشتصد",
        900 => "نهصد",
        1000 => THOUSAND_WORD,
        _ => return None,
    };
    Some(word)
}

/// Convert a number to its Persian word form.
///
/// Total over `-999,999..=999,999`. Values outside that range render as a
/// Persian error message instead of failing, so callers treat the result as
/// "cannot render", never as a crash.
pub fn to_persian_words(n: i64) -> String {
    if !is_supported(n) {
        return OUT_OF_RANGE_TEXT.to_string();
    }

    if n == 0 {
        return ZERO_WORD.to_string();
    }

    if let Some(word) = atomic_word(n) {
        return word.to_string();
    }

    if n < 0 {
        return format!("{NEGATIVE_PREFIX} {}", to_persian_words(-n));
    }

    if n < 20 {
        // The table covers 1..=19 exhaustively; render digits instead of
        // failing if that ever stops being true.
        return n.to_string();
    }

    let mut result = String::new();
    let mut n = n;

    if n >= 1000 {
        let thousands = n / 1000;
        if thousands == 1 {
            // "one thousand" collapses to the bare thousand word.
            result.push_str(THOUSAND_WORD);
        } else {
            result.push_str(&to_persian_words(thousands));
            result.push(' ');
            result.push_str(THOUSAND_WORD);
        }
        n %= 1000;
        if n > 0 {
            result.push_str(CONJUNCTION);
        }
    }

    if n >= 100 {
        if let Some(word) = atomic_word((n / 100) * 100) {
            result.push_str(word);
        }
        n %= 100;
        if n > 0 {
            result.push_str(CONJUNCTION);
        }
    }

    if n >= 20 {
        if let Some(word) = atomic_word((n / 10) * 10) {
            result.push_str(word);
        }
        n %= 10;
        if n > 0 {
            result.push_str(CONJUNCTION);
        }
    }

    if n > 0 {
        match atomic_word(n) {
            Some(word) => result.push_str(word),
            None => result.push_str(&n.to_string()),
        }
    }

    result
}

/// Inclusive range of values [`to_persian_words`] can render.
pub fn supported_range() -> (i64, i64) {
    (-ABS_COUNTING_LIMIT, ABS_COUNTING_LIMIT)
}

/// Whether `n` is inside the supported range.
pub fn is_supported(n: i64) -> bool {
    (-ABS_COUNTING_LIMIT..=ABS_COUNTING_LIMIT).contains(&n)
}
