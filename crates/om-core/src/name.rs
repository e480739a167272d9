// crates/om-core/src/name.rs - Alias normalization

/// Canonicalize an alias for case/whitespace-insensitive lookup.
///
/// This defines the equality relation used for every alias lookup in both
/// keyspaces: two aliases are "the same" iff their normalized forms are
/// identical. An empty result is invalid and rejected by all callers before
/// it can reach the store.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  API "), "api");
        assert_eq!(normalize("My-Project"), "my-project");
        assert_eq!(normalize("web"), "web");
    }

    #[test]
    fn empty_and_whitespace_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn idempotent() {
        for raw in ["  Api ", "WEB", "a b", ""] {
            assert_eq!(normalize(raw), normalize(&normalize(raw)));
        }
    }
}
