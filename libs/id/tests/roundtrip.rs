//! Property tests for the identifier codec.

use proptest::prelude::*;
use snowgrant_id::{
    BulkScope, BulkTarget, CompositeGrantIdentifier, GrantTarget, IdError, ObjectName,
    ObjectType, OnSchemaObjectTarget, OnSchemaTarget, Privileges,
};

/// Name parts, including characters that are structural elsewhere in the
/// format (dots, pipes, quotes, commas).
fn part() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .|\",-]{1,12}"
}

fn account_name() -> impl Strategy<Value = ObjectName> {
    part().prop_map(ObjectName::account_object)
}

fn database_object_name() -> impl Strategy<Value = ObjectName> {
    (part(), part()).prop_map(|(db, name)| ObjectName::database_object(db, name))
}

fn schema_object_name() -> impl Strategy<Value = ObjectName> {
    (part(), part(), part()).prop_map(|(db, sch, name)| ObjectName::schema_object(db, sch, name))
}

fn principal() -> impl Strategy<Value = ObjectName> {
    prop_oneof![account_name(), database_object_name()]
}

fn privileges() -> impl Strategy<Value = Privileges> {
    prop::collection::vec("[A-Za-z][A-Za-z _]{0,15}", 1..5).prop_map(Privileges::new)
}

fn object_type() -> impl Strategy<Value = ObjectType> {
    prop::sample::select(ObjectType::ALL)
}

fn bulk_target() -> impl Strategy<Value = BulkTarget> {
    let scope = prop_oneof![
        Just(None),
        account_name().prop_map(|db| Some(BulkScope::InDatabase(db))),
        database_object_name().prop_map(|sch| Some(BulkScope::InSchema(sch))),
    ];
    ("[A-Z][A-Z ]{0,19}", scope).prop_map(|(plural, scope)| BulkTarget::new(plural, scope))
}

fn target() -> impl Strategy<Value = GrantTarget> {
    prop_oneof![
        account_name().prop_map(GrantTarget::OnDatabase),
        database_object_name().prop_map(|s| GrantTarget::OnSchema(OnSchemaTarget::Schema(s))),
        account_name()
            .prop_map(|d| GrantTarget::OnSchema(OnSchemaTarget::AllSchemasInDatabase(d))),
        account_name()
            .prop_map(|d| GrantTarget::OnSchema(OnSchemaTarget::FutureSchemasInDatabase(d))),
        (object_type(), schema_object_name()).prop_map(|(object_type, object_name)| {
            GrantTarget::OnSchemaObject(OnSchemaObjectTarget::Object {
                object_type,
                object_name,
            })
        }),
        bulk_target().prop_map(|b| GrantTarget::OnSchemaObject(OnSchemaObjectTarget::All(b))),
        bulk_target().prop_map(|b| GrantTarget::OnSchemaObject(OnSchemaObjectTarget::Future(b))),
    ]
}

fn identifier() -> impl Strategy<Value = CompositeGrantIdentifier> {
    (principal(), any::<bool>(), privileges(), target()).prop_map(
        |(principal, with_grant_option, privileges, target)| {
            CompositeGrantIdentifier::new(principal, with_grant_option, privileges, target)
        },
    )
}

proptest! {
    #[test]
    fn decode_inverts_encode(id in identifier()) {
        let encoded = id.encode().unwrap();
        let decoded = CompositeGrantIdentifier::decode(&encoded).unwrap();
        prop_assert_eq!(&decoded, &id);
    }

    #[test]
    fn encoding_is_canonical(id in identifier()) {
        let encoded = id.encode().unwrap();
        let reencoded = CompositeGrantIdentifier::decode(&encoded).unwrap().encode().unwrap();
        prop_assert_eq!(encoded, reencoded);
    }

    #[test]
    fn fewer_than_four_segments_is_insufficient(
        segments in prop::collection::vec("[a-zA-Z0-9 ]{1,8}", 1..4)
    ) {
        let input = segments.join("|");
        let err = CompositeGrantIdentifier::decode(&input).unwrap_err();
        prop_assert!(
            matches!(err, IdError::InsufficientSegments { required: 4, .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn decode_never_panics(input in ".{0,64}") {
        let _ = CompositeGrantIdentifier::decode(&input);
    }
}
