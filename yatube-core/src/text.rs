use lazy_static::lazy_static;
use regex::Regex;

const MAX_PREVIEW_LEN: usize = 200;

lazy_static! {
    static ref NON_SLUG_CHARS_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref SLUG_SEPARATORS_REGEX: Regex = Regex::new(r"[-\s_]+").unwrap();
}

/// Shortened text of a post for listings.
///
/// Long texts are cut after 200 characters, shorter
/// texts are cut in half.
pub fn text_preview(text: &str) -> String {
    let len = text.chars().count();
    let cut = if len > MAX_PREVIEW_LEN {
        MAX_PREVIEW_LEN
    } else {
        len / 2
    };
    let mut preview: String = text.chars().take(cut).collect();
    preview.push_str("...");
    preview
}

/// Derive a URL-friendly identifier from a title.
pub fn slugify(title: &str) -> String {
    let lowercase = title.to_lowercase();
    let cleaned = NON_SLUG_CHARS_REGEX.replace_all(lowercase.trim(), "");
    SLUG_SEPARATORS_REGEX
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_of_short_text_is_the_first_half() {
        assert_eq!("Hello...", text_preview("Hello World!!!!!"));
        assert_eq!("...", text_preview("x"));
    }

    #[test]
    fn preview_of_long_text_is_cut() {
        let text = "a".repeat(201);
        let preview = text_preview(&text);
        assert_eq!(203, preview.chars().count());
        assert!(preview.ends_with("..."));
        // exactly 200 chars are not cut after 200
        assert_eq!(103, text_preview(&"b".repeat(200)).chars().count());
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        assert_eq!("При...", text_preview("Привет"));
    }

    #[test]
    fn should_slugify_titles() {
        assert_eq!("cats-dogs", slugify("  Cats & Dogs! "));
        assert_eq!("rust-lang", slugify("rust_lang"));
        assert_eq!("a-b", slugify("-a - b-"));
        assert_eq!("котики", slugify("Котики"));
    }
}
