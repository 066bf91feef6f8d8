use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARENTHESIZED: Regex = Regex::new(r"\([^)]*\)").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref PREPARATION_WORDS: Regex = Regex::new(r"(?-u:\b)(?:raw|cooked|boiled|grilled)(?-u:\b)").unwrap();
}

/// Canonical lookup key for a food name.
///
/// Lower-cases, drops every parenthesized group, turns commas into spaces and
/// collapses whitespace runs.
pub fn normalize_food_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let without_parens = PARENTHESIZED.replace_all(&lower, "");
    let without_commas = without_parens.replace(',', " ");
    collapse_whitespace(&without_commas)
}

/// Removes the whole words "raw", "cooked", "boiled" and "grilled" from an
/// already normalized key. Word boundaries are ASCII: a non-ASCII letter
/// does not join a word.
pub fn strip_preparation_words(key: &str) -> String {
    collapse_whitespace(&PREPARATION_WORDS.replace_all(key, ""))
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_parentheses_and_case() {
        assert_eq!(normalize_food_name("Paneer (cottage cheese)"), "paneer");
        assert_eq!(normalize_food_name("Sweet Potato (boiled) (small)"), "sweet potato");
    }

    #[test]
    fn commas_and_whitespace_collapse() {
        assert_eq!(normalize_food_name("  Brown Rice,cooked  "), "brown rice cooked");
        assert_eq!(normalize_food_name("Lentils,\t boiled"), "lentils boiled");
    }

    #[test]
    fn unbalanced_parenthesis_is_kept() {
        assert_eq!(normalize_food_name("Oats (rolled"), "oats (rolled");
    }

    #[test]
    fn strips_only_whole_words() {
        assert_eq!(strip_preparation_words("grilled chicken breast"), "chicken breast");
        assert_eq!(strip_preparation_words("spinach raw"), "spinach");
        assert_eq!(strip_preparation_words("raw boiled cooked grilled"), "");
        assert_eq!(strip_preparation_words("rawa upma"), "rawa upma");
        assert_eq!(strip_preparation_words("ungrilled tofu"), "ungrilled tofu");
        assert_eq!(strip_preparation_words("parboiled rice"), "parboiled rice");
    }

    #[test]
    fn non_ascii_letters_end_a_word() {
        assert_eq!(strip_preparation_words("rawé"), "é");
        assert_eq!(strip_preparation_words("purée cooked"), "purée");
    }
}
