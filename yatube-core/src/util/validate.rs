use lazy_static::lazy_static;
use regex::Regex;

pub use fast_chemail::is_valid_email;

const MAX_USERNAME_LEN: usize = 150;

const MAX_SLUG_LEN: usize = 100;

lazy_static! {
    static ref USERNAME_REGEX: Regex =
        Regex::new(&format!(r"^[\w.@+-]{{1,{MAX_USERNAME_LEN}}}$")).unwrap();
    static ref SLUG_REGEX: Regex = Regex::new(&format!(r"^[-\w]{{1,{MAX_SLUG_LEN}}}$")).unwrap();
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

pub fn is_valid_title(title: &str, max_len: usize) -> bool {
    let title = title.trim();
    !title.is_empty() && title.chars().count() <= max_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_validation() {
        assert!(is_valid_username("leo"));
        assert!(is_valid_username("leo.tolstoy+1@ya_ru-x"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("leo tolstoy"));
        assert!(!is_valid_username("leo/"));
        assert!(!is_valid_username(&"x".repeat(151)));
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("cats-and-dogs"));
        assert!(is_valid_slug("котики_2"));
        assert!(!is_valid_slug("cats and dogs"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn title_validation() {
        assert!(is_valid_title("Cats", 50));
        assert!(!is_valid_title("  ", 50));
        assert!(!is_valid_title(&"x".repeat(51), 50));
    }
}
