//! Schema object types that can be the target of a grant.

use crate::IdError;

/// A schema-level object type.
///
/// The singular spelling appears in `OnObject` identifiers; the plural
/// spelling names the object class of `OnAll`/`OnFuture` bulk grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    Table,
    View,
    MaterializedView,
    ExternalTable,
    DynamicTable,
    EventTable,
    IcebergTable,
    HybridTable,
    Sequence,
    Stage,
    FileFormat,
    Stream,
    Task,
    Pipe,
    Function,
    Procedure,
    Alert,
    Secret,
    NetworkRule,
    Streamlit,
    Model,
    Tag,
    MaskingPolicy,
    RowAccessPolicy,
    AggregationPolicy,
    ProjectionPolicy,
    PasswordPolicy,
    SessionPolicy,
}

impl ObjectType {
    /// Every object type, in declaration order.
    pub const ALL: &'static [ObjectType] = &[
        ObjectType::Table,
        ObjectType::View,
        ObjectType::MaterializedView,
        ObjectType::ExternalTable,
        ObjectType::DynamicTable,
        ObjectType::EventTable,
        ObjectType::IcebergTable,
        ObjectType::HybridTable,
        ObjectType::Sequence,
        ObjectType::Stage,
        ObjectType::FileFormat,
        ObjectType::Stream,
        ObjectType::Task,
        ObjectType::Pipe,
        ObjectType::Function,
        ObjectType::Procedure,
        ObjectType::Alert,
        ObjectType::Secret,
        ObjectType::NetworkRule,
        ObjectType::Streamlit,
        ObjectType::Model,
        ObjectType::Tag,
        ObjectType::MaskingPolicy,
        ObjectType::RowAccessPolicy,
        ObjectType::AggregationPolicy,
        ObjectType::ProjectionPolicy,
        ObjectType::PasswordPolicy,
        ObjectType::SessionPolicy,
    ];

    /// Singular SQL spelling, e.g. `MATERIALIZED VIEW`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Table => "TABLE",
            ObjectType::View => "VIEW",
            ObjectType::MaterializedView => "MATERIALIZED VIEW",
            ObjectType::ExternalTable => "EXTERNAL TABLE",
            ObjectType::DynamicTable => "DYNAMIC TABLE",
            ObjectType::EventTable => "EVENT TABLE",
            ObjectType::IcebergTable => "ICEBERG TABLE",
            ObjectType::HybridTable => "HYBRID TABLE",
            ObjectType::Sequence => "SEQUENCE",
            ObjectType::Stage => "STAGE",
            ObjectType::FileFormat => "FILE FORMAT",
            ObjectType::Stream => "STREAM",
            ObjectType::Task => "TASK",
            ObjectType::Pipe => "PIPE",
            ObjectType::Function => "FUNCTION",
            ObjectType::Procedure => "PROCEDURE",
            ObjectType::Alert => "ALERT",
            ObjectType::Secret => "SECRET",
            ObjectType::NetworkRule => "NETWORK RULE",
            ObjectType::Streamlit => "STREAMLIT",
            ObjectType::Model => "MODEL",
            ObjectType::Tag => "TAG",
            ObjectType::MaskingPolicy => "MASKING POLICY",
            ObjectType::RowAccessPolicy => "ROW ACCESS POLICY",
            ObjectType::AggregationPolicy => "AGGREGATION POLICY",
            ObjectType::ProjectionPolicy => "PROJECTION POLICY",
            ObjectType::PasswordPolicy => "PASSWORD POLICY",
            ObjectType::SessionPolicy => "SESSION POLICY",
        }
    }

    /// Plural SQL spelling, e.g. `MATERIALIZED VIEWS`.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            ObjectType::Table => "TABLES",
            ObjectType::View => "VIEWS",
            ObjectType::MaterializedView => "MATERIALIZED VIEWS",
            ObjectType::ExternalTable => "EXTERNAL TABLES",
            ObjectType::DynamicTable => "DYNAMIC TABLES",
            ObjectType::EventTable => "EVENT TABLES",
            ObjectType::IcebergTable => "ICEBERG TABLES",
            ObjectType::HybridTable => "HYBRID TABLES",
            ObjectType::Sequence => "SEQUENCES",
            ObjectType::Stage => "STAGES",
            ObjectType::FileFormat => "FILE FORMATS",
            ObjectType::Stream => "STREAMS",
            ObjectType::Task => "TASKS",
            ObjectType::Pipe => "PIPES",
            ObjectType::Function => "FUNCTIONS",
            ObjectType::Procedure => "PROCEDURES",
            ObjectType::Alert => "ALERTS",
            ObjectType::Secret => "SECRETS",
            ObjectType::NetworkRule => "NETWORK RULES",
            ObjectType::Streamlit => "STREAMLITS",
            ObjectType::Model => "MODELS",
            ObjectType::Tag => "TAGS",
            ObjectType::MaskingPolicy => "MASKING POLICIES",
            ObjectType::RowAccessPolicy => "ROW ACCESS POLICIES",
            ObjectType::AggregationPolicy => "AGGREGATION POLICIES",
            ObjectType::ProjectionPolicy => "PROJECTION POLICIES",
            ObjectType::PasswordPolicy => "PASSWORD POLICIES",
            ObjectType::SessionPolicy => "SESSION POLICIES",
        }
    }

    /// Parses the singular spelling. Matching is exact.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| IdError::InvalidObjectType(s.to_string()))
    }

    /// Parses the plural spelling. Matching is exact.
    pub fn from_plural(s: &str) -> Result<Self, IdError> {
        Self::ALL
            .iter()
            .find(|t| t.plural() == s)
            .copied()
            .ok_or_else(|| IdError::InvalidObjectType(s.to_string()))
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
