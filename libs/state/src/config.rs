//! Declarative configuration of a database role grant.
//!
//! Names may be written quoted (`"db"."role"`) or unquoted (`db.role`); the
//! state always stores the canonical quoted form. Privileges and bulk object
//! type plurals are taken verbatim, the same way the identifier decoder reads
//! them, so importing an id and applying its configuration yields that id.

use serde::{Deserialize, Serialize};
use snowgrant_id::{
    BulkScope, BulkTarget, CompositeGrantIdentifier, GrantTarget, ObjectName, ObjectType,
    OnSchemaObjectTarget, OnSchemaTarget, Privileges,
};

use tracing::debug;

use crate::StateError;

/// The configuration block of a grant resource.
///
/// Exactly one of `on_database`, `on_schema` and `on_schema_object` must be
/// set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Role receiving the privileges.
    pub database_role_name: String,

    /// Privileges to grant, in declaration order.
    pub privileges: Vec<String>,

    #[serde(default)]
    pub with_grant_option: bool,

    /// Database the privileges are granted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_schema: Option<OnSchemaConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_schema_object: Option<OnSchemaObjectConfig>,
}

/// `on_schema` block. Exactly one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnSchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_schemas_in_database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_schemas_in_database: Option<String>,
}

/// `on_schema_object` block.
///
/// Either `object_type` together with `object_name`, or exactly one of
/// `all` / `future`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnSchemaObjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<BulkConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future: Option<BulkConfig>,
}

/// `all` / `future` block. At most one of `in_database` and `in_schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Plural object type, e.g. `TABLES`.
    pub object_type_plural: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_schema: Option<String>,
}

impl GrantConfig {
    /// Validates the block and builds the grant identifier.
    pub fn to_identifier(&self) -> Result<CompositeGrantIdentifier, StateError> {
        let principal = parse_name("database_role_name", &self.database_role_name, None)?;

        if self.privileges.is_empty() {
            return Err(StateError::config(
                "privileges",
                "at least one privilege must be set",
            ));
        }
        let privileges: Privileges = self.privileges.iter().cloned().collect();
        privileges
            .validate()
            .map_err(|e| StateError::config("privileges", e.to_string()))?;

        let target = match (&self.on_database, &self.on_schema, &self.on_schema_object) {
            (Some(database), None, None) => {
                GrantTarget::OnDatabase(parse_name("on_database", database, Some(1))?)
            }
            (None, Some(on_schema), None) => GrantTarget::OnSchema(on_schema.to_target()?),
            (None, None, Some(on_schema_object)) => {
                GrantTarget::OnSchemaObject(on_schema_object.to_target()?)
            }
            _ => {
                return Err(StateError::config(
                    "on_database",
                    "exactly one of on_database, on_schema, on_schema_object must be set",
                ))
            }
        };

        let identifier =
            CompositeGrantIdentifier::new(principal, self.with_grant_option, privileges, target);
        identifier.validate()?;
        Ok(identifier)
    }

    /// Projects an identifier back into the configuration shape.
    pub fn from_identifier(identifier: &CompositeGrantIdentifier) -> Self {
        let mut config = GrantConfig {
            database_role_name: identifier.principal_name().to_string(),
            privileges: identifier.privileges().as_slice().to_vec(),
            with_grant_option: identifier.with_grant_option(),
            ..Default::default()
        };

        match identifier.target() {
            GrantTarget::OnDatabase(database) => config.on_database = Some(database.to_string()),
            GrantTarget::OnSchema(target) => {
                config.on_schema = Some(OnSchemaConfig::from_target(target))
            }
            GrantTarget::OnSchemaObject(target) => {
                config.on_schema_object = Some(OnSchemaObjectConfig::from_target(target))
            }
        }

        config
    }
}

impl OnSchemaConfig {
    fn to_target(&self) -> Result<OnSchemaTarget, StateError> {
        match (
            &self.schema_name,
            &self.all_schemas_in_database,
            &self.future_schemas_in_database,
        ) {
            (Some(schema), None, None) => Ok(OnSchemaTarget::Schema(parse_name(
                "on_schema.schema_name",
                schema,
                Some(2),
            )?)),
            (None, Some(database), None) => Ok(OnSchemaTarget::AllSchemasInDatabase(parse_name(
                "on_schema.all_schemas_in_database",
                database,
                Some(1),
            )?)),
            (None, None, Some(database)) => Ok(OnSchemaTarget::FutureSchemasInDatabase(
                parse_name("on_schema.future_schemas_in_database", database, Some(1))?,
            )),
            _ => Err(StateError::config(
                "on_schema",
                "exactly one of schema_name, all_schemas_in_database, future_schemas_in_database must be set",
            )),
        }
    }

    fn from_target(target: &OnSchemaTarget) -> Self {
        let mut config = OnSchemaConfig::default();
        let name = Some(target.name().to_string());
        match target {
            OnSchemaTarget::Schema(_) => config.schema_name = name,
            OnSchemaTarget::AllSchemasInDatabase(_) => config.all_schemas_in_database = name,
            OnSchemaTarget::FutureSchemasInDatabase(_) => config.future_schemas_in_database = name,
        }
        config
    }
}

impl OnSchemaObjectConfig {
    fn to_target(&self) -> Result<OnSchemaObjectTarget, StateError> {
        match (
            &self.object_type,
            &self.object_name,
            &self.all,
            &self.future,
        ) {
            (Some(object_type), Some(object_name), None, None) => {
                let object_type = ObjectType::parse(&object_type.trim().to_uppercase())
                    .map_err(|e| StateError::config("on_schema_object.object_type", e.to_string()))?;
                Ok(OnSchemaObjectTarget::Object {
                    object_type,
                    object_name: parse_name("on_schema_object.object_name", object_name, Some(3))?,
                })
            }
            (Some(_), None, None, None) | (None, Some(_), None, None) => Err(StateError::config(
                "on_schema_object",
                "object_type and object_name must be set together",
            )),
            (None, None, Some(all), None) => Ok(OnSchemaObjectTarget::All(
                all.to_target("on_schema_object.all")?,
            )),
            (None, None, None, Some(future)) => Ok(OnSchemaObjectTarget::Future(
                future.to_target("on_schema_object.future")?,
            )),
            _ => Err(StateError::config(
                "on_schema_object",
                "exactly one of object_type/object_name, all, future must be set",
            )),
        }
    }

    fn from_target(target: &OnSchemaObjectTarget) -> Self {
        match target {
            OnSchemaObjectTarget::Object {
                object_type,
                object_name,
            } => OnSchemaObjectConfig {
                object_type: Some(object_type.to_string()),
                object_name: Some(object_name.to_string()),
                ..Default::default()
            },
            OnSchemaObjectTarget::All(bulk) => OnSchemaObjectConfig {
                all: Some(BulkConfig::from_target(bulk)),
                ..Default::default()
            },
            OnSchemaObjectTarget::Future(bulk) => OnSchemaObjectConfig {
                future: Some(BulkConfig::from_target(bulk)),
                ..Default::default()
            },
        }
    }
}

impl BulkConfig {
    fn to_target(&self, field: &str) -> Result<BulkTarget, StateError> {
        // Kept exactly as written so an imported id re-creates byte for byte.
        let plural = &self.object_type_plural;
        if plural.is_empty() {
            return Err(StateError::config(
                format!("{field}.object_type_plural"),
                "object type plural cannot be empty",
            ));
        }
        if ObjectType::from_plural(plural).is_err() {
            debug!(plural = %plural, "bulk grant on an unknown object type plural");
        }

        let scope = match (&self.in_database, &self.in_schema) {
            (None, None) => None,
            (Some(database), None) => Some(BulkScope::InDatabase(parse_name(
                &format!("{field}.in_database"),
                database,
                Some(1),
            )?)),
            (None, Some(schema)) => Some(BulkScope::InSchema(parse_name(
                &format!("{field}.in_schema"),
                schema,
                Some(2),
            )?)),
            (Some(_), Some(_)) => {
                return Err(StateError::config(
                    field,
                    "in_database and in_schema cannot both be set",
                ))
            }
        };

        Ok(BulkTarget::new(plural.clone(), scope))
    }

    fn from_target(target: &BulkTarget) -> Self {
        let mut config = BulkConfig {
            object_type_plural: target.object_type_plural.clone(),
            ..Default::default()
        };
        match &target.scope {
            Some(BulkScope::InDatabase(database)) => config.in_database = Some(database.to_string()),
            Some(BulkScope::InSchema(schema)) => config.in_schema = Some(schema.to_string()),
            None => {}
        }
        config
    }
}

fn parse_name(field: &str, value: &str, parts: Option<usize>) -> Result<ObjectName, StateError> {
    let name = ObjectName::parse(value.trim())
        .map_err(|e| StateError::config(field, e.to_string()))?;
    match parts {
        Some(parts) => name
            .require_parts(parts)
            .map_err(|e| StateError::config(field, e.to_string())),
        None => Ok(name),
    }
}
