/// Lowercases and trims an utterance. Every predicate is evaluated against this form.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  What Are Your SKILLS?\n"), "what are your skills?");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Hello", "  ÉCOLE ", "👋 Hi", "ПРИВЕТ", "mixed Case\tTabs  "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
