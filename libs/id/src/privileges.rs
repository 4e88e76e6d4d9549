//! Ordered privilege lists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::IdError;

const PRIVILEGE_SEPARATOR: char = ',';

/// Characters that would break the unquoted privilege segment.
const RESERVED: &[char] = &[PRIVILEGE_SEPARATOR, crate::SEPARATOR, '"'];

/// An ordered list of privilege names, e.g. `CREATE SCHEMA,USAGE`.
///
/// Order is kept so the encoded identifier round-trips exactly; use
/// [`Privileges::is_equivalent`] for order-insensitive comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Privileges(Vec<String>);

impl Privileges {
    /// Creates a list from privilege names, keeping their order.
    pub fn new<I, S>(privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(privileges.into_iter().map(Into::into).collect())
    }

    /// Parses a comma-joined privilege segment. Case is preserved.
    pub fn parse(segment: &str) -> Result<Self, IdError> {
        let privileges: Vec<String> = segment
            .split(PRIVILEGE_SEPARATOR)
            .map(str::to_string)
            .collect();

        if privileges.iter().any(String::is_empty) {
            return Err(IdError::EmptyPrivileges(segment.to_string()));
        }

        Ok(Self(privileges))
    }

    /// Checks that the list can be encoded as a single segment.
    pub fn validate(&self) -> Result<(), IdError> {
        if self.0.is_empty() {
            return Err(IdError::invalid_state("privilege list is empty"));
        }

        for privilege in &self.0 {
            if privilege.is_empty() {
                return Err(IdError::invalid_state("privilege list has an empty entry"));
            }
            if privilege.contains(RESERVED) {
                return Err(IdError::invalid_state(format!(
                    "privilege '{}' contains a reserved character",
                    privilege
                )));
            }
        }

        Ok(())
    }

    /// Returns true if both lists hold the same privileges, ignoring order
    /// and duplicates.
    pub fn is_equivalent(&self, other: &Privileges) -> bool {
        let ours: BTreeSet<&str> = self.iter().collect();
        let theirs: BTreeSet<&str> = other.iter().collect();
        ours == theirs
    }

    /// Returns true if the list holds `privilege` (case-sensitive).
    pub fn contains(&self, privilege: &str) -> bool {
        self.0.iter().any(|p| p == privilege)
    }

    /// Iterates privileges in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the privileges as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of privileges.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Privileges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl<S: Into<String>> FromIterator<S> for Privileges {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Privileges> for Vec<String> {
    fn from(privileges: Privileges) -> Self {
        privileges.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_case() {
        let privileges = Privileges::parse("CREATE SCHEMA,usage,MONITOR").unwrap();
        assert_eq!(privileges.as_slice(), &["CREATE SCHEMA", "usage", "MONITOR"]);
        assert_eq!(privileges.to_string(), "CREATE SCHEMA,usage,MONITOR");
    }

    #[test]
    fn test_parse_rejects_empty_entries() {
        assert!(matches!(
            Privileges::parse("").unwrap_err(),
            IdError::EmptyPrivileges(_)
        ));
        assert!(Privileges::parse("USAGE,,MONITOR").is_err());
        assert!(Privileges::parse("USAGE,").is_err());
    }

    #[test]
    fn test_is_equivalent_ignores_order() {
        let a = Privileges::new(["USAGE", "MONITOR"]);
        let b = Privileges::new(["MONITOR", "USAGE"]);
        let c = Privileges::new(["usage", "MONITOR"]);
        assert_ne!(a, b);
        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn test_validate() {
        assert!(Privileges::new(["USAGE"]).validate().is_ok());
        assert!(Privileges::default().validate().is_err());
        assert!(Privileges::new(["US|AGE"]).validate().is_err());
        assert!(Privileges::new(["A,B"]).validate().is_err());
    }

    #[test]
    fn test_json_is_a_list() {
        let privileges = Privileges::new(["USAGE", "MONITOR"]);
        let json = serde_json::to_string(&privileges).unwrap();
        assert_eq!(json, r#"["USAGE","MONITOR"]"#);
    }
}
