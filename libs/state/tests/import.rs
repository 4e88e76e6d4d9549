//! Import-by-id flow: decode a user-supplied id and rebuild state from it.

use rstest::rstest;
use snowgrant_state::{GrantConfig, GrantState, StateError};

#[rstest]
#[case::on_database(r#""db"|false|CREATE SCHEMA,USAGE,MONITOR|OnDatabase|"on-db""#)]
#[case::on_all_schemas(r#""db"|false|P|OnSchema|OnAllSchemasInDatabase|"db-123""#)]
#[case::on_object(r#""db"|false|P|OnSchemaObject|OnObject|TABLE|"db"."sch"."tbl""#)]
#[case::on_all_in_database(r#""db"|false|P|OnSchemaObject|OnAll|TABLES|InDatabase|"db-123""#)]
#[case::on_all(r#""db"|false|P|OnSchemaObject|OnAll|TABLES"#)]
#[case::padded_privilege(r#""db"|false| USAGE,MONITOR |OnDatabase|"x""#)]
#[case::lowercase_plural(r#""db"|false|P|OnSchemaObject|OnAll|tables"#)]
#[case::unknown_plural(r#""db"|false|P|OnSchemaObject|OnFuture|WIDGETS|InSchema|"a"."b""#)]
#[case::quoted_name_with_spaces(r#"" db "|false|P|OnSchema|OnSchema|" a "."b""#)]
fn test_imported_state_recreates_the_same_id(#[case] id: &str) {
    let state = GrantState::import(id).unwrap();
    assert_eq!(state.id, id);

    // Applying the imported configuration must not produce a different id.
    let recreated = GrantState::create(&state.config).unwrap();
    assert_eq!(recreated, state);
}

#[test]
fn test_imported_on_database_attributes() {
    let state =
        GrantState::import(r#""db"|false|CREATE SCHEMA,USAGE,MONITOR|OnDatabase|"on-db""#).unwrap();
    assert_eq!(state.config.database_role_name, r#""db""#);
    assert_eq!(
        state.config.privileges,
        vec!["CREATE SCHEMA", "USAGE", "MONITOR"]
    );
    assert!(!state.config.with_grant_option);
    assert_eq!(state.config.on_database.as_deref(), Some(r#""on-db""#));
    assert!(state.config.on_schema.is_none());
    assert!(state.config.on_schema_object.is_none());
}

#[test]
fn test_imported_bulk_attributes() {
    let state =
        GrantState::import(r#""db"|true|SELECT|OnSchemaObject|OnFuture|VIEWS|InSchema|"a"."b""#)
            .unwrap();
    let on_schema_object = state.config.on_schema_object.unwrap();
    let future = on_schema_object.future.unwrap();
    assert!(on_schema_object.all.is_none());
    assert_eq!(future.object_type_plural, "VIEWS");
    assert_eq!(future.in_schema.as_deref(), Some(r#""a"."b""#));
    assert!(future.in_database.is_none());
}

#[test]
fn test_import_surfaces_codec_errors_verbatim() {
    let err = GrantState::import(r#""db"|false|P|some-kind|x"#).unwrap_err();
    assert!(matches!(err, StateError::Id(_)));
    assert_eq!(err.to_string(), "invalid DatabaseRoleGrantKind: some-kind");
}

#[test]
fn test_create_from_json_config() {
    let config: GrantConfig = serde_json::from_str(
        r#"{
            "database_role_name": "analytics.reader",
            "privileges": ["SELECT", "REFERENCES"],
            "on_schema_object": {
                "all": { "object_type_plural": "TABLES", "in_database": "analytics" }
            }
        }"#,
    )
    .unwrap();

    let state = GrantState::create(&config).unwrap();
    assert_eq!(
        state.id,
        r#""analytics"."reader"|false|SELECT,REFERENCES|OnSchemaObject|OnAll|TABLES|InDatabase|"analytics""#
    );
}
