//! Text normalization shared by the library index, the matcher and the
//! corrections store.
//!
//! All comparisons happen on case-folded, punctuation-stripped,
//! whitespace-collapsed text. `_`, `-` and `/` act as word separators and a
//! lower-to-upper case change starts a new word, so `click_login_button`,
//! `clickLoginButton`, `Click-Login-Button` and `Click Login Button` all
//! normalize to `click login button`.

use std::collections::BTreeSet;

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | '/')
}

/// Normalizes free text for comparison. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut prev_lower = false;
    for c in text.chars() {
        if c.is_whitespace() || is_separator(c) {
            cleaned.push(' ');
        } else if c.is_alphanumeric() {
            if prev_lower && c.is_uppercase() {
                cleaned.push(' ');
            }
            cleaned.extend(c.to_lowercase());
        }
        prev_lower = c.is_lowercase();
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word tokens of the normalized text, as a set.
pub fn tokens(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word tokens of the normalized text, keeping order and duplicates.
pub fn tokens_in_order(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts number-like tokens (ASCII digit runs) in already normalized text.
pub fn count_number_tokens(normalized: &str) -> usize {
    normalized
        .split(' ')
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
        .count()
}

/// Jaccard ratio `|a ∩ b| / |a ∪ b|`; two empty sets score 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_and_punctuation() {
        assert_eq!(normalize("  Click the 'Login' Button!  "), "click the login button");
        assert_eq!(normalize("click_login_button"), "click login button");
        assert_eq!(normalize("Sign-in\tnow"), "sign in now");
        assert_eq!(normalize("clickLoginButton"), "click login button");
        assert_eq!(normalize("ATG Login"), "atg login");
        assert_eq!(normalize("Enter 3.5 kg"), "enter 35 kg");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Open  Browser_To Login-Page.");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_jaccard() {
        let a = tokens("click login button");
        let b = tokens("Click Login Button");
        assert_eq!(jaccard(&a, &b), 1.0);

        let c = tokens("press the sign in button");
        // {button} / {click, login, button, press, the, sign, in}
        assert!((jaccard(&a, &c) - 1.0 / 7.0).abs() < 1e-9);

        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }

    #[test]
    fn test_count_number_tokens() {
        assert_eq!(count_number_tokens("add 2 items with 15 euro"), 2);
        assert_eq!(count_number_tokens("add item 2b"), 0);
        assert_eq!(count_number_tokens(""), 0);
    }
}
