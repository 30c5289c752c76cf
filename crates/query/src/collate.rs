//! Natural, human-oriented string ordering.
//!
//! Punctuation and whitespace are ignored, letters compare case- and
//! accent-insensitively, and runs of ASCII digits compare by numeric value,
//! so `"2 files"` sorts before `"10 files"`.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Unit<'a> {
    /// Digit run with leading zeros stripped.
    Digits(&'a str),
    Letter(char),
}

impl Ord for Unit<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Digits(a), Self::Digits(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            // digits sort before letters
            (Self::Digits(_), Self::Letter(_)) => Ordering::Less,
            (Self::Letter(_), Self::Digits(_)) => Ordering::Greater,
            (Self::Letter(a), Self::Letter(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Unit<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn units(s: &str) -> Vec<Unit<'_>> {
    let mut out = Vec::with_capacity(s.len());
    let mut rest = s;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(rest.len());
            let digits = rest[..end].trim_start_matches('0');
            out.push(Unit::Digits(digits));
            rest = &rest[end..];
            continue;
        }

        if c.is_alphanumeric() {
            out.extend(c.to_lowercase().map(|l| Unit::Letter(fold_accent(l))));
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Base letter for common Latin accented lowercase letters.
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è'..='ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì'..='ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ù'..='ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    units(a).cmp(&units(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(natural_cmp("2 files", "10 files"), Ordering::Less);
        assert_eq!(natural_cmp("Season 10", "Season 9"), Ordering::Greater);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("921600", "2073600"), Ordering::Less);
    }

    #[test]
    fn case_punctuation_and_accents_are_ignored() {
        assert_eq!(natural_cmp("WEB-DL", "webdl"), Ordering::Equal);
        assert_eq!(natural_cmp("Amélie", "amelie"), Ordering::Equal);
        assert_eq!(natural_cmp("The.Office", "the office"), Ordering::Equal);
    }

    #[test]
    fn empty_sorts_first() {
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
        assert_eq!(natural_cmp("", "0"), Ordering::Less);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn digits_before_letters() {
        assert_eq!(natural_cmp("1080p", "SD"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
    }
}
