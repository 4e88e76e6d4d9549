//! Structured object names.
//!
//! Warehouse objects are addressed by one to three dot-separated parts:
//! `"db"` for account objects, `"db"."schema"` for database objects and
//! `"db"."schema"."object"` for schema objects. The canonical form quotes
//! every part and doubles embedded quotes.

use crate::IdError;

const QUOTE: char = '"';
const DOT: char = '.';

/// A dot-separated, possibly qualified object name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectName {
    parts: Vec<String>,
}

impl ObjectName {
    /// Creates a name from raw (unquoted) parts.
    ///
    /// Parts are taken as-is; emptiness is checked by [`ObjectName::validate`]
    /// and by the identifier encoder.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of an account-level object, such as a database.
    pub fn account_object(name: impl Into<String>) -> Self {
        Self::new([name.into()])
    }

    /// Name of a database-level object, such as a schema or database role.
    pub fn database_object(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new([database.into(), name.into()])
    }

    /// Name of a schema-level object, such as a table.
    pub fn schema_object(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new([database.into(), schema.into(), name.into()])
    }

    /// Parses the canonical quoted form, e.g. `"db"."schema"."table"`.
    pub fn parse_quoted(input: &str) -> Result<Self, IdError> {
        if input.is_empty() {
            return Err(IdError::malformed(input, "name cannot be empty"));
        }

        let mut parts = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            match chars.next() {
                Some(QUOTE) => {}
                Some(c) => {
                    return Err(IdError::malformed(
                        input,
                        format!("expected '\"' at start of part, found '{c}'"),
                    ))
                }
                None => return Err(IdError::malformed(input, "trailing '.' without a part")),
            }

            let mut part = String::new();
            loop {
                match chars.next() {
                    Some(QUOTE) if chars.peek() == Some(&QUOTE) => {
                        chars.next();
                        part.push(QUOTE);
                    }
                    Some(QUOTE) => break,
                    Some(c) => part.push(c),
                    None => return Err(IdError::malformed(input, "unterminated quote")),
                }
            }

            if part.is_empty() {
                return Err(IdError::malformed(input, "name parts cannot be empty"));
            }
            parts.push(part);

            match chars.next() {
                None => break,
                Some(DOT) => continue,
                Some(c) => {
                    return Err(IdError::malformed(
                        input,
                        format!("expected '.' between parts, found '{c}'"),
                    ))
                }
            }
        }

        Ok(Self { parts })
    }

    /// Parses the loose unquoted form, e.g. `db.schema.table`.
    ///
    /// Parts cannot contain dots or quotes in this form.
    pub fn parse_unquoted(input: &str) -> Result<Self, IdError> {
        if input.is_empty() {
            return Err(IdError::malformed(input, "name cannot be empty"));
        }
        if input.contains(QUOTE) {
            return Err(IdError::malformed(input, "unquoted name cannot contain '\"'"));
        }

        let parts: Vec<String> = input.split(DOT).map(str::to_string).collect();
        if parts.iter().any(String::is_empty) {
            return Err(IdError::malformed(input, "name parts cannot be empty"));
        }

        Ok(Self { parts })
    }

    /// Parses either form, choosing by the leading character.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        if input.starts_with(QUOTE) {
            Self::parse_quoted(input)
        } else {
            Self::parse_unquoted(input)
        }
    }

    /// Consumes the name, checking it has exactly `expected` parts.
    pub fn require_parts(self, expected: usize) -> Result<Self, IdError> {
        if self.parts.len() != expected {
            return Err(IdError::InvalidNameParts {
                input: self.fully_qualified_name(),
                expected,
                actual: self.parts.len(),
            });
        }
        Ok(self)
    }

    /// Checks that the name is non-empty with non-empty parts.
    pub fn validate(&self) -> Result<(), IdError> {
        if self.parts.is_empty() {
            return Err(IdError::invalid_state("object name has no parts"));
        }
        if self.parts.iter().any(String::is_empty) {
            return Err(IdError::invalid_state(format!(
                "object name {} has an empty part",
                self.fully_qualified_name()
            )));
        }
        Ok(())
    }

    /// Returns the raw parts.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns the number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the name has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The database part (first part).
    pub fn database(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    /// The schema part, present for two- and three-part names.
    pub fn schema(&self) -> Option<&str> {
        if self.parts.len() >= 2 {
            self.parts.get(1).map(String::as_str)
        } else {
            None
        }
    }

    /// The innermost part.
    pub fn name(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Canonical quoted form.
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DOT)?;
            }
            write!(f, "{}{}{}", QUOTE, part.replace(QUOTE, "\"\""), QUOTE)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ObjectName {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ObjectName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.fully_qualified_name())
    }
}

impl<'de> serde::Deserialize<'de> for ObjectName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
