//! # snowgrant-id
//!
//! Object names and the composite grant identifier used as the persisted id
//! of grant-style warehouse resources.
//!
//! ## Design Principles
//!
//! - Every grant identity has exactly one canonical string form
//! - Parsing is strict: unknown tags and wrong segment counts are errors
//! - Identifiers support roundtrip serialization (decode → encode → decode)
//! - The grant target is a closed sum type, so the kind tag and its payload
//!   can never disagree
//!
//! ## Identifier Format
//!
//! Segments are separated by `|`; object names are double-quoted per part:
//!
//! ```text
//! principal|with_grant_option|privileges|target_kind|<target segments>
//! ```
//!
//! Examples:
//! - `"db"."analyst"|false|USAGE,MONITOR|OnDatabase|"sales"`
//! - `"db"."analyst"|true|USAGE|OnSchema|OnSchema|"sales"."raw"`
//! - `"db"."analyst"|false|SELECT|OnSchemaObject|OnObject|TABLE|"sales"."raw"."orders"`
//! - `"db"."analyst"|false|SELECT|OnSchemaObject|OnFuture|TABLES|InSchema|"sales"."raw"`

mod error;
mod grant;
mod macros;
mod name;
mod object_type;
mod privileges;
mod scanner;

pub use error::IdError;
pub use grant::*;
pub use name::ObjectName;
pub use object_type::ObjectType;
pub use privileges::Privileges;
pub use scanner::{split_segments, SEPARATOR};
