//! Persisted resource state.

use serde::{Deserialize, Serialize};
use snowgrant_id::CompositeGrantIdentifier;
use tracing::debug;

use crate::{GrantConfig, StateError, SCHEMA_VERSION};

/// State of a grant resource as persisted by the host.
///
/// `id` is the encoded [`CompositeGrantIdentifier`]; the flattened
/// configuration attributes are derived from it on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantState {
    pub id: String,

    /// Missing in state written before versioning, which reads as 0 and
    /// must go through [`upgrade_state`](crate::upgrade_state).
    #[serde(default)]
    pub schema_version: u64,

    #[serde(flatten)]
    pub config: GrantConfig,
}

impl GrantState {
    /// Builds the state for a resource being created from `config`.
    pub fn create(config: &GrantConfig) -> Result<Self, StateError> {
        let identifier = config.to_identifier()?;
        Self::from_identifier(&identifier)
    }

    /// Projects an identifier into state.
    pub fn from_identifier(identifier: &CompositeGrantIdentifier) -> Result<Self, StateError> {
        Ok(Self {
            id: identifier.encode()?,
            schema_version: SCHEMA_VERSION,
            config: GrantConfig::from_identifier(identifier),
        })
    }

    /// Imports a resource by id.
    pub fn import(id: &str) -> Result<Self, StateError> {
        let identifier = CompositeGrantIdentifier::decode(id)?;
        debug!(
            id = %id,
            target_kind = %identifier.target_kind(),
            privileges = identifier.privileges().len(),
            "importing grant"
        );
        Self::from_identifier(&identifier)
    }

    /// Decodes the persisted id.
    pub fn identifier(&self) -> Result<CompositeGrantIdentifier, StateError> {
        Ok(CompositeGrantIdentifier::decode(&self.id)?)
    }

    /// Returns true if `config` grants a different set of privileges.
    ///
    /// Reordering privileges in the configuration is not a change.
    pub fn privileges_changed(&self, config: &GrantConfig) -> Result<bool, StateError> {
        let current = self.identifier()?;
        let desired = config.to_identifier()?;
        Ok(!current.privileges().is_equivalent(desired.privileges()))
    }

    /// Returns true if `config` targets a different grant, which cannot be
    /// updated in place.
    pub fn requires_replacement(&self, config: &GrantConfig) -> Result<bool, StateError> {
        let current = self.identifier()?;
        let desired = config.to_identifier()?;
        Ok(current.principal_name() != desired.principal_name()
            || current.target() != desired.target()
            || current.with_grant_option() != desired.with_grant_option())
    }
}
