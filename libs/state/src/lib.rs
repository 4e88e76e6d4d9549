//! # snowgrant-state
//!
//! Local state for the database role grant resource.
//!
//! ## Lifecycle
//!
//! - Create: a [`GrantConfig`] block is validated and turned into a
//!   [`CompositeGrantIdentifier`](snowgrant_id::CompositeGrantIdentifier),
//!   whose encoding becomes the resource id
//! - Read / import: the persisted id is decoded and projected back into the
//!   configuration shape ([`GrantState::import`])
//! - Upgrade: state written by older schema versions is migrated before use
//!   ([`upgrade_state`], [`upgrade_legacy_id`])
//!
//! The id is the only source of truth; every other attribute in
//! [`GrantState`] is derived from it.

mod config;
mod error;
mod state;
mod upgrade;

pub use config::*;
pub use error::StateError;
pub use state::GrantState;
pub use upgrade::{upgrade_legacy_id, upgrade_state, SCHEMA_VERSION};
