//! Macros for defining the closed tag enums of the identifier grammar.

/// Macro to define a tag enum whose variants map one-to-one onto wire literals.
///
/// This generates a fieldless enum with:
/// - An `ALL` constant listing every variant
/// - `as_str()` returning the wire literal
/// - `parse()` mapping a literal back, failing with the given `IdError` variant
/// - `Display` and `FromStr` implementations
/// - `Copy`, `Ord`, `Hash`, and other standard traits
///
/// # Example
///
/// ```ignore
/// define_kind! {
///     /// Scope of a bulk grant.
///     BulkScopeKind, InvalidBulkScope {
///         InDatabase => "InDatabase",
///         InSchema => "InSchema",
///     }
/// }
///
/// let scope: BulkScopeKind = "InSchema".parse()?;
/// ```
#[macro_export]
macro_rules! define_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident {
            $($(#[$vmeta:meta])* $variant:ident => $literal:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire literal for this tag.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }

            /// Parses a tag from its wire literal.
            ///
            /// Matching is exact and case-sensitive.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                match s {
                    $($literal => Ok($name::$variant),)+
                    other => Err($crate::IdError::$error(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}
