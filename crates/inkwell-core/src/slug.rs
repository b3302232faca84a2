use inkwell_db::Database;
use inkwell_types::Result;
use rand::Rng;

const SUFFIX_LEN: usize = 6;
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Derive a URL-safe slug candidate from a title: lower-cased, whitespace
/// collapsed to single hyphens, non-word characters stripped, no leading,
/// trailing, or doubled hyphens.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !out.ends_with('-') {
            out.push('-');
        }
        // Anything else is stripped
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        // Titles with no usable characters still need a slug
        "post".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Slug for a new post. On collision with an existing slug a short random
/// suffix is appended and used without re-checking; at six hex characters
/// the residual collision probability is negligible, and the UNIQUE
/// constraint still backstops the race.
pub fn assign(db: &Database, title: &str) -> Result<String> {
    let base = slugify(title);
    if db.slug_exists(&base)? {
        Ok(format!("{}-{}", base, random_suffix()))
    } else {
        Ok(base)
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("My First Post!"), "my-first-post");
    }

    #[test]
    fn collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slugify("a   b\t\tc"), "a-b-c");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("  padded  title  "), "padded-title");
    }

    #[test]
    fn strips_non_word_characters() {
        assert_eq!(slugify("C'est l'été, déjà?"), "cest-lété-déjà");
        assert_eq!(slugify("100% true!!!"), "100-true");
    }

    #[test]
    fn symbol_only_title_falls_back() {
        assert_eq!(slugify("!!!"), "post");
    }

    #[test]
    fn suffix_is_six_lowercase_hex() {
        let s = random_suffix();
        assert_eq!(s.len(), 6);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn identical_titles_get_distinct_slugs() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("u1", "a@x.com", "alice", "hash").unwrap();
        let first = assign(&db, "Hello World").unwrap();
        db.create_post("p1", "Hello World", &first, "c", "u1").unwrap();
        let second = assign(&db, "Hello World").unwrap();
        assert_eq!(first, "hello-world");
        assert_ne!(first, second);
        assert!(second.starts_with("hello-world-"));
        assert_eq!(second.len(), "hello-world-".len() + 6);
    }
}
