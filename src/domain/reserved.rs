//! Aliases reserved for system routes.

use std::collections::HashSet;

/// Aliases reserved by default.
pub const DEFAULT_RESERVED_ALIASES: &[&str] = &[
    "docs", "api", "v1", "v2", "v3", "admin", "login", "register",
];

/// Set of aliases that can never be registered or unregistered.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedAliases {
    aliases: HashSet<String>,
}

impl ReservedAliases {
    /// Builds a reserved set from arbitrary aliases. Blank entries are skipped.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|a| a.as_ref().trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// An empty set; every well-formed alias is assignable.
    pub fn none() -> Self {
        Self {
            aliases: HashSet::new(),
        }
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Reserved aliases in sorted order.
    pub fn to_sorted_vec(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.aliases.iter().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}

impl Default for ReservedAliases {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_ALIASES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contains_system_routes() {
        let reserved = ReservedAliases::default();

        for &alias in DEFAULT_RESERVED_ALIASES {
            assert!(reserved.contains(alias), "'{}' should be reserved", alias);
        }
        assert_eq!(reserved.len(), 8);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let reserved = ReservedAliases::default();

        assert!(reserved.contains("admin"));
        assert!(!reserved.contains("Admin"));
        assert!(!reserved.contains("admin2"));
    }

    #[test]
    fn test_custom_set_trims_and_skips_blanks() {
        let reserved = ReservedAliases::new([" status ", "", "health"]);

        assert_eq!(reserved.to_sorted_vec(), vec!["health", "status"]);
        assert!(!reserved.contains("admin"));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(ReservedAliases::none().is_empty());
    }
}
