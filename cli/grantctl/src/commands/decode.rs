//! Decode command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use snowgrant_id::{CompositeGrantIdentifier, GrantTarget, OnSchemaObjectTarget};
use tracing::debug;

use crate::output::{print_single, FieldRow};

use super::CommandContext;

/// Decode an identifier and show its parts.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Identifier to decode. Quote it for the shell.
    id: String,
}

impl DecodeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let identifier = CompositeGrantIdentifier::decode(&self.id)
            .with_context(|| format!("Failed to decode '{}'", self.id))?;
        debug!(target_kind = %identifier.target_kind(), "decoded identifier");

        let view = DecodedGrant::from_identifier(&identifier);
        print_single(&view, &view.rows(), ctx.format);
        Ok(())
    }
}

/// Flattened view of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DecodedGrant {
    pub id: String,
    pub principal_name: String,
    pub with_grant_option: bool,
    pub privileges: Vec<String>,
    pub target_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_name: Option<String>,
}

impl DecodedGrant {
    pub fn from_identifier(identifier: &CompositeGrantIdentifier) -> Self {
        let mut view = Self {
            id: identifier.to_string(),
            principal_name: identifier.principal_name().to_string(),
            with_grant_option: identifier.with_grant_option(),
            privileges: identifier.privileges().iter().map(str::to_string).collect(),
            target_kind: identifier.target_kind().to_string(),
            grant_kind: None,
            object_type: None,
            target_name: None,
            scope: None,
            scope_name: None,
        };

        match identifier.target() {
            GrantTarget::OnDatabase(database) => {
                view.target_name = Some(database.to_string());
            }
            GrantTarget::OnSchema(target) => {
                view.grant_kind = Some(target.kind().to_string());
                view.target_name = Some(target.name().to_string());
            }
            GrantTarget::OnSchemaObject(target) => {
                view.grant_kind = Some(target.kind().to_string());
                match target {
                    OnSchemaObjectTarget::Object {
                        object_type,
                        object_name,
                    } => {
                        view.object_type = Some(object_type.to_string());
                        view.target_name = Some(object_name.to_string());
                    }
                    OnSchemaObjectTarget::All(bulk) | OnSchemaObjectTarget::Future(bulk) => {
                        view.object_type = Some(bulk.object_type_plural.clone());
                        if let Some(scope) = &bulk.scope {
                            view.scope = Some(scope.kind().to_string());
                            view.scope_name = Some(scope.name().to_string());
                        }
                    }
                }
            }
        }

        view
    }

    pub fn rows(&self) -> Vec<FieldRow> {
        let mut rows = vec![
            FieldRow::new("principal_name", &self.principal_name),
            FieldRow::new("with_grant_option", self.with_grant_option.to_string()),
            FieldRow::new("privileges", self.privileges.join(", ")),
            FieldRow::new("target_kind", &self.target_kind),
        ];

        let optional = [
            ("grant_kind", &self.grant_kind),
            ("object_type", &self.object_type),
            ("target_name", &self.target_name),
            ("scope", &self.scope),
            ("scope_name", &self.scope_name),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                rows.push(FieldRow::new(field, value));
            }
        }

        rows
    }
}
