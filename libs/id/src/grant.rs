//! Composite grant identifiers.
//!
//! A grant resource has no natural id of its own, so its identity is encoded
//! from who receives the grant, what is granted and where it applies:
//!
//! ```text
//! identifier     = principal "|" bool "|" privileges "|" target
//! target         = "OnDatabase" "|" name
//!                / "OnSchema" "|" schema-kind "|" name
//!                / "OnSchemaObject" "|" obj-kind "|" obj-body
//! obj-body       = object-type "|" name                   ; OnObject
//!                / plural-name [ "|" scope "|" name ]     ; OnAll / OnFuture
//! ```
//!
//! The plain schema case carries the tag twice (`OnSchema|OnSchema|...`);
//! existing persisted ids use that form, so the encoder keeps it.

use tracing::trace;

use crate::{define_kind, split_segments, IdError, ObjectName, ObjectType, Privileges, SEPARATOR};

// =============================================================================
// Tags
// =============================================================================

define_kind! {
    /// Top-level grant target kind.
    TargetKind, InvalidTargetKind {
        OnDatabase => "OnDatabase",
        OnSchema => "OnSchema",
        OnSchemaObject => "OnSchemaObject",
    }
}

define_kind! {
    /// Sub-kind of an `OnSchema` target.
    SchemaGrantKind, InvalidSchemaGrantKind {
        OnSchema => "OnSchema",
        OnAllSchemasInDatabase => "OnAllSchemasInDatabase",
        OnFutureSchemasInDatabase => "OnFutureSchemasInDatabase",
    }
}

define_kind! {
    /// Sub-kind of an `OnSchemaObject` target.
    SchemaObjectGrantKind, InvalidSchemaObjectGrantKind {
        OnObject => "OnObject",
        OnAll => "OnAll",
        OnFuture => "OnFuture",
    }
}

define_kind! {
    /// Container kind narrowing a bulk grant.
    BulkScopeKind, InvalidBulkScope {
        InDatabase => "InDatabase",
        InSchema => "InSchema",
    }
}

// =============================================================================
// Segment counts
// =============================================================================

/// Segments every identifier starts with.
pub const MIN_SEGMENTS: usize = 4;
const ON_DATABASE_SEGMENTS: usize = 5;
const ON_SCHEMA_SEGMENTS: usize = 6;
const ON_OBJECT_SEGMENTS: usize = 7;
const BULK_SEGMENTS: usize = 6;
const BULK_SCOPED_SEGMENTS: usize = 8;

// =============================================================================
// Targets
// =============================================================================

/// Where a grant applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrantTarget {
    /// A single database.
    OnDatabase(ObjectName),
    /// A schema, or all/future schemas of a database.
    OnSchema(OnSchemaTarget),
    /// A schema object, or all/future objects of a class.
    OnSchemaObject(OnSchemaObjectTarget),
}

impl GrantTarget {
    /// Returns the tag written at the target kind position.
    pub fn kind(&self) -> TargetKind {
        match self {
            GrantTarget::OnDatabase(_) => TargetKind::OnDatabase,
            GrantTarget::OnSchema(_) => TargetKind::OnSchema,
            GrantTarget::OnSchemaObject(_) => TargetKind::OnSchemaObject,
        }
    }

    fn validate(&self) -> Result<(), IdError> {
        match self {
            GrantTarget::OnDatabase(database) => validate_name(database, 1, "database"),
            GrantTarget::OnSchema(target) => target.validate(),
            GrantTarget::OnSchemaObject(target) => target.validate(),
        }
    }

    fn push_segments(&self, segments: &mut Vec<String>) {
        match self {
            GrantTarget::OnDatabase(database) => segments.push(database.to_string()),
            GrantTarget::OnSchema(target) => target.push_segments(segments),
            GrantTarget::OnSchemaObject(target) => target.push_segments(segments),
        }
    }
}

/// Target of an `OnSchema` grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OnSchemaTarget {
    /// One schema (`"db"."schema"`).
    Schema(ObjectName),
    /// Every existing schema in the database.
    AllSchemasInDatabase(ObjectName),
    /// Schemas created in the database later.
    FutureSchemasInDatabase(ObjectName),
}

impl OnSchemaTarget {
    pub fn kind(&self) -> SchemaGrantKind {
        match self {
            OnSchemaTarget::Schema(_) => SchemaGrantKind::OnSchema,
            OnSchemaTarget::AllSchemasInDatabase(_) => SchemaGrantKind::OnAllSchemasInDatabase,
            OnSchemaTarget::FutureSchemasInDatabase(_) => {
                SchemaGrantKind::OnFutureSchemasInDatabase
            }
        }
    }

    /// The schema or database this target refers to.
    pub fn name(&self) -> &ObjectName {
        match self {
            OnSchemaTarget::Schema(name)
            | OnSchemaTarget::AllSchemasInDatabase(name)
            | OnSchemaTarget::FutureSchemasInDatabase(name) => name,
        }
    }

    fn validate(&self) -> Result<(), IdError> {
        match self {
            OnSchemaTarget::Schema(schema) => validate_name(schema, 2, "schema"),
            OnSchemaTarget::AllSchemasInDatabase(database)
            | OnSchemaTarget::FutureSchemasInDatabase(database) => {
                validate_name(database, 1, "database")
            }
        }
    }

    fn push_segments(&self, segments: &mut Vec<String>) {
        segments.push(self.kind().to_string());
        segments.push(self.name().to_string());
    }

    fn decode(segments: &[String]) -> Result<Self, IdError> {
        require_at_least(segments, ON_SCHEMA_SEGMENTS)?;
        let kind = SchemaGrantKind::parse(&segments[4])?;
        require_exactly(segments, ON_SCHEMA_SEGMENTS)?;

        Ok(match kind {
            SchemaGrantKind::OnSchema => OnSchemaTarget::Schema(decode_name(&segments[5], 2)?),
            SchemaGrantKind::OnAllSchemasInDatabase => {
                OnSchemaTarget::AllSchemasInDatabase(decode_name(&segments[5], 1)?)
            }
            SchemaGrantKind::OnFutureSchemasInDatabase => {
                OnSchemaTarget::FutureSchemasInDatabase(decode_name(&segments[5], 1)?)
            }
        })
    }
}

/// Target of an `OnSchemaObject` grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OnSchemaObjectTarget {
    /// One named object (`"db"."schema"."object"`).
    Object {
        object_type: ObjectType,
        object_name: ObjectName,
    },
    /// Every existing object of a class.
    All(BulkTarget),
    /// Objects of a class created later.
    Future(BulkTarget),
}

impl OnSchemaObjectTarget {
    pub fn kind(&self) -> SchemaObjectGrantKind {
        match self {
            OnSchemaObjectTarget::Object { .. } => SchemaObjectGrantKind::OnObject,
            OnSchemaObjectTarget::All(_) => SchemaObjectGrantKind::OnAll,
            OnSchemaObjectTarget::Future(_) => SchemaObjectGrantKind::OnFuture,
        }
    }

    fn validate(&self) -> Result<(), IdError> {
        match self {
            OnSchemaObjectTarget::Object { object_name, .. } => {
                validate_name(object_name, 3, "schema object")
            }
            OnSchemaObjectTarget::All(bulk) | OnSchemaObjectTarget::Future(bulk) => {
                bulk.validate()
            }
        }
    }

    fn push_segments(&self, segments: &mut Vec<String>) {
        segments.push(self.kind().to_string());
        match self {
            OnSchemaObjectTarget::Object {
                object_type,
                object_name,
            } => {
                segments.push(object_type.to_string());
                segments.push(object_name.to_string());
            }
            OnSchemaObjectTarget::All(bulk) | OnSchemaObjectTarget::Future(bulk) => {
                bulk.push_segments(segments)
            }
        }
    }

    fn decode(segments: &[String]) -> Result<Self, IdError> {
        require_at_least(segments, BULK_SEGMENTS)?;
        let kind = SchemaObjectGrantKind::parse(&segments[4])?;

        match kind {
            SchemaObjectGrantKind::OnObject => {
                require_at_least(segments, ON_OBJECT_SEGMENTS)?;
                require_exactly(segments, ON_OBJECT_SEGMENTS)?;
                Ok(OnSchemaObjectTarget::Object {
                    object_type: ObjectType::parse(&segments[5])?,
                    object_name: decode_name(&segments[6], 3)?,
                })
            }
            SchemaObjectGrantKind::OnAll => {
                Ok(OnSchemaObjectTarget::All(BulkTarget::decode(segments)?))
            }
            SchemaObjectGrantKind::OnFuture => {
                Ok(OnSchemaObjectTarget::Future(BulkTarget::decode(segments)?))
            }
        }
    }
}

/// Object class of an `OnAll`/`OnFuture` grant, optionally narrowed to a
/// container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BulkTarget {
    /// Plural object type name, e.g. `TABLES`.
    pub object_type_plural: String,
    pub scope: Option<BulkScope>,
}

impl BulkTarget {
    pub fn new(object_type_plural: impl Into<String>, scope: Option<BulkScope>) -> Self {
        Self {
            object_type_plural: object_type_plural.into(),
            scope,
        }
    }

    /// Bulk target for a known object type.
    pub fn of(object_type: ObjectType, scope: Option<BulkScope>) -> Self {
        Self::new(object_type.plural(), scope)
    }

    /// Resolves the plural name to an [`ObjectType`], if it is a known one.
    pub fn object_type(&self) -> Result<ObjectType, IdError> {
        ObjectType::from_plural(&self.object_type_plural)
    }

    fn validate(&self) -> Result<(), IdError> {
        if self.object_type_plural.is_empty() {
            return Err(IdError::invalid_state("bulk grant object type is empty"));
        }
        if self.object_type_plural.contains([SEPARATOR, '"']) {
            return Err(IdError::invalid_state(format!(
                "bulk grant object type '{}' contains a reserved character",
                self.object_type_plural
            )));
        }
        match &self.scope {
            Some(scope) => scope.validate(),
            None => Ok(()),
        }
    }

    fn push_segments(&self, segments: &mut Vec<String>) {
        segments.push(self.object_type_plural.clone());
        if let Some(scope) = &self.scope {
            segments.push(scope.kind().to_string());
            segments.push(scope.name().to_string());
        }
    }

    fn decode(segments: &[String]) -> Result<Self, IdError> {
        let object_type_plural = segments[5].clone();
        if object_type_plural.is_empty() {
            return Err(IdError::InvalidObjectType(object_type_plural));
        }

        if segments.len() == BULK_SEGMENTS {
            return Ok(Self::new(object_type_plural, None));
        }

        require_at_least(segments, BULK_SCOPED_SEGMENTS)?;
        require_exactly(segments, BULK_SCOPED_SEGMENTS)?;

        let scope = match BulkScopeKind::parse(&segments[6])? {
            BulkScopeKind::InDatabase => BulkScope::InDatabase(decode_name(&segments[7], 1)?),
            BulkScopeKind::InSchema => BulkScope::InSchema(decode_name(&segments[7], 2)?),
        };

        Ok(Self::new(object_type_plural, Some(scope)))
    }
}

/// Container narrowing a bulk grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BulkScope {
    InDatabase(ObjectName),
    InSchema(ObjectName),
}

impl BulkScope {
    pub fn kind(&self) -> BulkScopeKind {
        match self {
            BulkScope::InDatabase(_) => BulkScopeKind::InDatabase,
            BulkScope::InSchema(_) => BulkScopeKind::InSchema,
        }
    }

    /// The container name.
    pub fn name(&self) -> &ObjectName {
        match self {
            BulkScope::InDatabase(name) | BulkScope::InSchema(name) => name,
        }
    }

    fn validate(&self) -> Result<(), IdError> {
        match self {
            BulkScope::InDatabase(database) => validate_name(database, 1, "InDatabase scope"),
            BulkScope::InSchema(schema) => validate_name(schema, 2, "InSchema scope"),
        }
    }
}

// =============================================================================
// Identifier
// =============================================================================

/// Identity of a grant of privileges to a principal on a target.
///
/// Values are immutable: build a new one and re-encode it to change the
/// persisted id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeGrantIdentifier {
    principal_name: ObjectName,
    with_grant_option: bool,
    privileges: Privileges,
    target: GrantTarget,
}

impl CompositeGrantIdentifier {
    /// Creates an identifier. Structural checks run at [`encode`](Self::encode).
    pub fn new(
        principal_name: ObjectName,
        with_grant_option: bool,
        privileges: Privileges,
        target: GrantTarget,
    ) -> Self {
        Self {
            principal_name,
            with_grant_option,
            privileges,
            target,
        }
    }

    /// The role receiving the grant.
    pub fn principal_name(&self) -> &ObjectName {
        &self.principal_name
    }

    pub fn with_grant_option(&self) -> bool {
        self.with_grant_option
    }

    pub fn privileges(&self) -> &Privileges {
        &self.privileges
    }

    pub fn target(&self) -> &GrantTarget {
        &self.target
    }

    pub fn target_kind(&self) -> TargetKind {
        self.target.kind()
    }

    /// Returns a copy with a different privilege list.
    #[must_use]
    pub fn with_privileges(&self, privileges: Privileges) -> Self {
        Self {
            privileges,
            ..self.clone()
        }
    }

    /// Checks every constraint the encoder relies on.
    pub fn validate(&self) -> Result<(), IdError> {
        self.principal_name
            .validate()
            .map_err(|e| IdError::invalid_state(format!("principal: {e}")))?;
        self.privileges.validate()?;
        self.target.validate()
    }

    /// Encodes the canonical identifier string.
    ///
    /// Fails with [`IdError::InvalidState`] if the value was built with
    /// names of the wrong shape; this is a bug in the caller.
    pub fn encode(&self) -> Result<String, IdError> {
        self.validate()?;
        Ok(self.to_string())
    }

    /// Decodes an identifier string.
    pub fn decode(input: &str) -> Result<Self, IdError> {
        if input.is_empty() {
            return Err(IdError::Empty);
        }

        let segments = split_segments(input)?;
        trace!(segments = segments.len(), "decoding grant identifier");
        require_at_least(&segments, MIN_SEGMENTS)?;

        let principal_name = ObjectName::parse_quoted(&segments[0])?;
        let with_grant_option = decode_bool(&segments[1])?;
        let privileges = Privileges::parse(&segments[2])?;

        let target = match TargetKind::parse(&segments[3])? {
            TargetKind::OnDatabase => {
                require_at_least(&segments, ON_DATABASE_SEGMENTS)?;
                require_exactly(&segments, ON_DATABASE_SEGMENTS)?;
                GrantTarget::OnDatabase(decode_name(&segments[4], 1)?)
            }
            TargetKind::OnSchema => GrantTarget::OnSchema(OnSchemaTarget::decode(&segments)?),
            TargetKind::OnSchemaObject => {
                GrantTarget::OnSchemaObject(OnSchemaObjectTarget::decode(&segments)?)
            }
        };

        Ok(Self {
            principal_name,
            with_grant_option,
            privileges,
            target,
        })
    }
}

/// Canonical encoding. Use [`CompositeGrantIdentifier::encode`] when the value
/// has not been validated.
impl std::fmt::Display for CompositeGrantIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut segments = vec![
            self.principal_name.to_string(),
            self.with_grant_option.to_string(),
            self.privileges.to_string(),
            self.target.kind().to_string(),
        ];
        self.target.push_segments(&mut segments);

        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for CompositeGrantIdentifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl serde::Serialize for CompositeGrantIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let encoded = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}

impl<'de> serde::Deserialize<'de> for CompositeGrantIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn require_at_least(segments: &[String], required: usize) -> Result<(), IdError> {
    if segments.len() < required {
        return Err(IdError::InsufficientSegments {
            required,
            actual: segments.len(),
        });
    }
    Ok(())
}

fn require_exactly(segments: &[String], expected: usize) -> Result<(), IdError> {
    if segments.len() != expected {
        return Err(IdError::UnexpectedSegments {
            expected,
            actual: segments.len(),
        });
    }
    Ok(())
}

fn decode_bool(segment: &str) -> Result<bool, IdError> {
    match segment {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(IdError::InvalidBool(other.to_string())),
    }
}

fn decode_name(segment: &str, parts: usize) -> Result<ObjectName, IdError> {
    ObjectName::parse_quoted(segment)?.require_parts(parts)
}

fn validate_name(name: &ObjectName, parts: usize, what: &str) -> Result<(), IdError> {
    name.validate()
        .map_err(|e| IdError::invalid_state(format!("{what}: {e}")))?;
    if name.len() != parts {
        return Err(IdError::invalid_state(format!(
            "{what} name {name} should have {parts} part(s), has {}",
            name.len()
        )));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn decode(s: &str) -> Result<CompositeGrantIdentifier, IdError> {
        s.parse()
    }

    #[test]
    fn test_decode_on_database() {
        let id = decode(r#""db"|false|CREATE SCHEMA,USAGE,MONITOR|OnDatabase|"on-db""#).unwrap();
        assert_eq!(id.principal_name(), &ObjectName::account_object("db"));
        assert!(!id.with_grant_option());
        assert_eq!(
            id.privileges(),
            &Privileges::new(["CREATE SCHEMA", "USAGE", "MONITOR"])
        );
        assert_eq!(id.target_kind(), TargetKind::OnDatabase);
        assert_eq!(
            id.target(),
            &GrantTarget::OnDatabase(ObjectName::account_object("on-db"))
        );
    }

    #[test]
    fn test_decode_on_schema() {
        let id = decode(r#""db"."role"|true|USAGE|OnSchema|OnSchema|"db"."sch""#).unwrap();
        assert!(id.with_grant_option());
        assert_eq!(
            id.target(),
            &GrantTarget::OnSchema(OnSchemaTarget::Schema(ObjectName::database_object(
                "db", "sch"
            )))
        );
    }

    #[test]
    fn test_decode_on_all_schemas_in_database() {
        let id = decode(r#""db"|false|P|OnSchema|OnAllSchemasInDatabase|"db-123""#).unwrap();
        let GrantTarget::OnSchema(target) = id.target() else {
            panic!("expected OnSchema target, got {:?}", id.target());
        };
        assert_eq!(target.kind(), SchemaGrantKind::OnAllSchemasInDatabase);
        assert_eq!(target.name(), &ObjectName::account_object("db-123"));
    }

    #[test]
    fn test_decode_on_future_schemas_in_database() {
        let id = decode(r#""db"|false|P|OnSchema|OnFutureSchemasInDatabase|"db-123""#).unwrap();
        assert_eq!(
            id.target(),
            &GrantTarget::OnSchema(OnSchemaTarget::FutureSchemasInDatabase(
                ObjectName::account_object("db-123")
            ))
        );
    }

    #[test]
    fn test_decode_on_object() {
        let id =
            decode(r#""db"|false|P|OnSchemaObject|OnObject|TABLE|"db"."sch"."tbl""#).unwrap();
        assert_eq!(
            id.target(),
            &GrantTarget::OnSchemaObject(OnSchemaObjectTarget::Object {
                object_type: ObjectType::Table,
                object_name: ObjectName::schema_object("db", "sch", "tbl"),
            })
        );
    }

    #[test]
    fn test_decode_on_object_missing_name() {
        let err = decode(r#""db"|false|P|OnSchemaObject|OnObject|TABLE"#).unwrap_err();
        assert_eq!(
            err,
            IdError::InsufficientSegments {
                required: 7,
                actual: 6
            }
        );
        assert!(err.to_string().contains("7 parts"));
    }

    #[test]
    fn test_decode_on_all_in_database() {
        let id = decode(r#""db"|false|P|OnSchemaObject|OnAll|TABLES|InDatabase|"db-123""#)
            .unwrap();
        assert_eq!(
            id.target(),
            &GrantTarget::OnSchemaObject(OnSchemaObjectTarget::All(BulkTarget::new(
                "TABLES",
                Some(BulkScope::InDatabase(ObjectName::account_object("db-123")))
            )))
        );
    }

    #[test]
    fn test_decode_on_all_without_scope() {
        let id = decode(r#""db"|false|P|OnSchemaObject|OnAll|TABLES"#).unwrap();
        let GrantTarget::OnSchemaObject(OnSchemaObjectTarget::All(bulk)) = id.target() else {
            panic!("expected OnAll target, got {:?}", id.target());
        };
        assert_eq!(bulk.object_type_plural, "TABLES");
        assert_eq!(bulk.scope, None);
        assert_eq!(bulk.object_type().unwrap(), ObjectType::Table);
    }

    #[test]
    fn test_decode_on_future_in_schema() {
        let id = decode(
            r#""db"."role"|false|SELECT|OnSchemaObject|OnFuture|MATERIALIZED VIEWS|InSchema|"db"."sch""#,
        )
        .unwrap();
        assert_eq!(
            id.target(),
            &GrantTarget::OnSchemaObject(OnSchemaObjectTarget::Future(BulkTarget::of(
                ObjectType::MaterializedView,
                Some(BulkScope::InSchema(ObjectName::database_object("db", "sch")))
            )))
        );
    }

    #[test]
    fn test_decode_invalid_target_kind() {
        let err = decode(r#""db"|false|P|some-kind|x"#).unwrap_err();
        assert_eq!(err, IdError::InvalidTargetKind("some-kind".to_string()));
        assert_eq!(err.to_string(), "invalid DatabaseRoleGrantKind: some-kind");
    }

    #[rstest]
    #[case::empty("", IdError::Empty)]
    #[case::one_part(r#""db""#, IdError::InsufficientSegments { required: 4, actual: 1 })]
    #[case::three_parts(r#""db"|false|USAGE"#, IdError::InsufficientSegments { required: 4, actual: 3 })]
    #[case::database_missing_ref(
        r#""db"|false|USAGE|OnDatabase"#,
        IdError::InsufficientSegments { required: 5, actual: 4 }
    )]
    #[case::database_extra(
        r#""db"|false|USAGE|OnDatabase|"a"|"b""#,
        IdError::UnexpectedSegments { expected: 5, actual: 6 }
    )]
    #[case::schema_short(
        r#""db"|false|USAGE|OnSchema|OnSchema"#,
        IdError::InsufficientSegments { required: 6, actual: 5 }
    )]
    #[case::schema_kind(
        r#""db"|false|USAGE|OnSchema|OnSomething|"db""#,
        IdError::InvalidSchemaGrantKind("OnSomething".to_string())
    )]
    #[case::object_kind(
        r#""db"|false|USAGE|OnSchemaObject|OnSomething|TABLE"#,
        IdError::InvalidSchemaObjectGrantKind("OnSomething".to_string())
    )]
    #[case::object_type(
        r#""db"|false|USAGE|OnSchemaObject|OnObject|TABLEZ|"a"."b"."c""#,
        IdError::InvalidObjectType("TABLEZ".to_string())
    )]
    #[case::object_extra(
        r#""db"|false|USAGE|OnSchemaObject|OnObject|TABLE|"a"."b"."c"|x"#,
        IdError::UnexpectedSegments { expected: 7, actual: 8 }
    )]
    #[case::bulk_scope_missing_name(
        r#""db"|false|USAGE|OnSchemaObject|OnAll|TABLES|InDatabase"#,
        IdError::InsufficientSegments { required: 8, actual: 7 }
    )]
    #[case::bulk_scope_kind(
        r#""db"|false|USAGE|OnSchemaObject|OnFuture|TABLES|InAccount|"db""#,
        IdError::InvalidBulkScope("InAccount".to_string())
    )]
    #[case::bool_literal(
        r#""db"|yes|USAGE|OnDatabase|"db""#,
        IdError::InvalidBool("yes".to_string())
    )]
    #[case::privileges(
        r#""db"|false||OnDatabase|"db""#,
        IdError::EmptyPrivileges(String::new())
    )]
    #[case::name_parts(
        r#""db"|false|USAGE|OnSchema|OnSchema|"db""#,
        IdError::InvalidNameParts { input: r#""db""#.to_string(), expected: 2, actual: 1 }
    )]
    fn test_decode_errors(#[case] input: &str, #[case] expected: IdError) {
        assert_eq!(decode(input).unwrap_err(), expected);
    }

    #[test]
    fn test_decode_malformed_names() {
        for input in [
            r#"db|false|USAGE|OnDatabase|"db""#,
            r#""db"|false|USAGE|OnDatabase|db"#,
            r#""db"|false|USAGE|OnDatabase|"db"#,
            r#""db"|false|USAGE|OnSchemaObject|OnObject|TABLE|"a".b."c""#,
        ] {
            let result = decode(input);
            assert!(
                matches!(result, Err(IdError::MalformedQuotedName { .. })),
                "expected malformed name error for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_encode_keeps_double_on_schema_tag() {
        let id = CompositeGrantIdentifier::new(
            ObjectName::database_object("db", "role"),
            false,
            Privileges::new(["USAGE"]),
            GrantTarget::OnSchema(OnSchemaTarget::Schema(ObjectName::database_object(
                "db", "sch",
            ))),
        );
        assert_eq!(
            id.encode().unwrap(),
            r#""db"."role"|false|USAGE|OnSchema|OnSchema|"db"."sch""#
        );
    }

    #[test]
    fn test_encode_quotes_structural_characters() {
        let id = CompositeGrantIdentifier::new(
            ObjectName::database_object("d|b", r#"ro"le"#),
            true,
            Privileges::new(["SELECT"]),
            GrantTarget::OnSchemaObject(OnSchemaObjectTarget::Object {
                object_type: ObjectType::View,
                object_name: ObjectName::schema_object("a.b", "c", "d"),
            }),
        );
        let encoded = id.encode().unwrap();
        assert_eq!(
            encoded,
            r#""d|b"."ro""le"|true|SELECT|OnSchemaObject|OnObject|VIEW|"a.b"."c"."d""#
        );
        assert_eq!(decode(&encoded).unwrap(), id);
    }

    #[test]
    fn test_encode_rejects_mismatched_names() {
        let id = CompositeGrantIdentifier::new(
            ObjectName::account_object("role"),
            false,
            Privileges::new(["USAGE"]),
            GrantTarget::OnSchema(OnSchemaTarget::Schema(ObjectName::account_object("db"))),
        );
        assert!(matches!(
            id.encode().unwrap_err(),
            IdError::InvalidState { .. }
        ));

        let id = CompositeGrantIdentifier::new(
            ObjectName::account_object("role"),
            false,
            Privileges::new(["USAGE"]),
            GrantTarget::OnSchemaObject(OnSchemaObjectTarget::All(BulkTarget::new(
                "TABLES",
                Some(BulkScope::InDatabase(ObjectName::database_object("db", "sch"))),
            ))),
        );
        assert!(matches!(
            id.encode().unwrap_err(),
            IdError::InvalidState { .. }
        ));
    }

    #[test]
    fn test_encode_rejects_empty_principal_and_privileges() {
        let target = GrantTarget::OnDatabase(ObjectName::account_object("db"));
        let id = CompositeGrantIdentifier::new(
            ObjectName::new(Vec::<String>::new()),
            false,
            Privileges::new(["USAGE"]),
            target.clone(),
        );
        assert!(id.encode().is_err());

        let id = CompositeGrantIdentifier::new(
            ObjectName::account_object("role"),
            false,
            Privileges::default(),
            target,
        );
        assert!(id.encode().is_err());
    }

    #[test]
    fn test_with_privileges_returns_new_value() {
        let id = decode(r#""db"|false|USAGE|OnDatabase|"db""#).unwrap();
        let changed = id.with_privileges(Privileges::new(["USAGE", "MONITOR"]));
        assert_eq!(id.privileges().len(), 1);
        assert_eq!(
            changed.encode().unwrap(),
            r#""db"|false|USAGE,MONITOR|OnDatabase|"db""#
        );
    }

    #[test]
    fn test_kind_tags_roundtrip() {
        for kind in TargetKind::ALL {
            assert_eq!(TargetKind::parse(kind.as_str()).unwrap(), *kind);
        }
        for kind in SchemaGrantKind::ALL {
            assert_eq!(kind.as_str().parse::<SchemaGrantKind>().unwrap(), *kind);
        }
        for kind in SchemaObjectGrantKind::ALL {
            assert_eq!(kind.to_string().parse::<SchemaObjectGrantKind>().unwrap(), *kind);
        }
        for kind in BulkScopeKind::ALL {
            assert_eq!(BulkScopeKind::parse(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let id = decode(r#""db"."role"|true|USAGE|OnSchemaObject|OnFuture|TABLES"#).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: CompositeGrantIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
