use pocketgen_core::{
    Cardinality, Codec, CollectionSchema, CompileOptions, EmptyListPolicy, Error, ErrorKind,
    Flavor, ModelValue, PatchOp, SchemaDocument, Sentinel, TypeRef, codec, compile,
    compile_with_options,
};
use serde_json::{Value, json};

fn collection(name: &str, fields: Vec<Value>) -> CollectionSchema {
    CollectionSchema::new(name, fields)
}

fn document(collections: Vec<CollectionSchema>) -> SchemaDocument {
    SchemaDocument { collections }
}

fn drivers() -> CollectionSchema {
    collection(
        "drivers",
        vec![
            json!({ "name": "fullName", "type": "plainText" }),
            json!({ "name": "email", "type": "email", "required": false }),
        ],
    )
}

fn cnhs(target: &str) -> CollectionSchema {
    collection(
        "cnhs",
        vec![
            json!({ "name": "number", "type": "plainText", "required": true }),
            json!({ "name": "driver", "type": "relation", "to": target, "mode": "single", "required": true }),
        ],
    )
}

#[test]
fn drivers_scenario_produces_nullable_email() {
    let compiled = compile(&document(vec![drivers()])).expect("compile drivers");
    let bundle = compiled.collection("drivers").expect("drivers bundle");

    assert_eq!(bundle.type_name, "Drivers");

    let full_name = bundle.read_field("fullName").expect("fullName");
    assert_eq!(full_name.model_type, TypeRef::String);
    assert_eq!(full_name.parse, None);

    let email = bundle.read_field("email").expect("email");
    assert_eq!(
        email.model_type,
        TypeRef::nullable(TypeRef::flavored(Flavor::Email))
    );
    assert_eq!(email.wire_type, TypeRef::String);
    assert_eq!(
        email.parse,
        Some(Codec::EmptyAsNull {
            sentinel: Sentinel::EmptyString
        })
    );

    let decoded = codec::decode(email.parse, &json!("")).expect("decode empty email");
    assert!(decoded.is_null());

    let create: Vec<_> = bundle.create.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(create, ["fullName", "email"]);
}

#[test]
fn relation_to_existing_collection_compiles() {
    let compiled = compile(&document(vec![drivers(), cnhs("drivers")])).expect("compile");
    let bundle = compiled.collection("cnhs").expect("cnhs bundle");

    let driver = bundle.read_field("driver").expect("driver field");
    assert_eq!(driver.model_type, TypeRef::RecordId);
    assert!(!driver.model_type.is_nullable());
    assert_eq!(driver.parse, None);

    assert_eq!(bundle.expand.len(), 1);
    let entry = &bundle.expand[0];
    assert_eq!(entry.field, "driver");
    assert_eq!(entry.target_collection, "drivers");
    assert_eq!(entry.target_type_name, "Drivers");
    assert_eq!(entry.cardinality, Cardinality::Single);
}

#[test]
fn unresolved_relation_names_collection_field_and_target() {
    let err = compile(&document(vec![drivers(), cnhs("nonexistent")])).unwrap_err();

    assert_eq!(
        err,
        Error::UnresolvedRelation {
            collection: "cnhs".to_string(),
            field: "driver".to_string(),
            target: "nonexistent".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::UnresolvedRelation);
    let message = err.to_string();
    assert!(message.contains("cnhs"));
    assert!(message.contains("driver"));
    assert!(message.contains("nonexistent"));
}

#[test]
fn forward_and_self_references_resolve() {
    let doc = document(vec![
        collection(
            "comments",
            vec![
                json!({ "name": "post", "type": "relation", "to": "posts", "mode": "single", "required": true }),
                json!({ "name": "parent", "type": "relation", "to": "comments", "mode": "single" }),
            ],
        ),
        collection(
            "posts",
            vec![json!({ "name": "title", "type": "plainText", "required": true })],
        ),
    ]);

    let compiled = compile(&doc).expect("forward and self references");
    let comments = compiled.collection("comments").expect("comments");
    let targets: Vec<_> = comments
        .expand
        .iter()
        .map(|entry| entry.target_collection.as_str())
        .collect();
    assert_eq!(targets, ["posts", "comments"]);
}

#[test]
fn relation_targets_resolve_by_id_before_name() {
    let mut users = collection(
        "users",
        vec![json!({ "name": "name", "type": "plainText" })],
    );
    users.id = Some("pbc_users".to_string());
    users.singular = Some("user".to_string());

    let posts = collection(
        "posts",
        vec![json!({ "name": "author", "type": "relation", "to": "pbc_users", "mode": "multiple" })],
    );

    let compiled = compile(&document(vec![users, posts])).expect("compile");
    let entry = &compiled.collection("posts").expect("posts").expand[0];
    assert_eq!(entry.target_collection, "users");
    assert_eq!(entry.target_type_name, "User");
    assert_eq!(entry.cardinality, Cardinality::Multiple);
}

#[test]
fn invalid_field_aborts_with_collection_context() {
    let doc = document(vec![
        drivers(),
        collection(
            "vehicles",
            vec![
                json!({ "name": "plate", "type": "plainText" }),
                json!({ "name": "status", "type": "select", "options": [], "mode": "single" }),
            ],
        ),
    ]);

    let err = compile(&doc).unwrap_err();
    let Error::Field {
        collection,
        position,
        source,
    } = &err
    else {
        panic!("expected field error, got {err:?}");
    };
    assert_eq!(collection, "vehicles");
    assert_eq!(*position, 1);
    assert_eq!(source.field(), Some("status"));
    assert_eq!(source.property(), Some("options"));
    assert_eq!(err.kind(), ErrorKind::EmptyValue);
}

#[test]
fn duplicate_field_names_are_rejected() {
    let doc = document(vec![collection(
        "drivers",
        vec![
            json!({ "name": "email", "type": "email" }),
            json!({ "name": "email", "type": "plainText" }),
        ],
    )]);

    let err = compile(&doc).unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateField {
            collection: "drivers".to_string(),
            field: "email".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
}

#[test]
fn duplicate_and_empty_collection_names_are_rejected() {
    let err = compile(&document(vec![drivers(), drivers()])).unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateCollection {
            collection: "drivers".to_string()
        }
    );

    let err = compile(&document(vec![collection("", Vec::new())])).unwrap_err();
    assert_eq!(err, Error::EmptyCollectionName { position: 0 });
}

#[test]
fn colliding_type_names_are_rejected() {
    let err = compile(&document(vec![
        collection("user_posts", Vec::new()),
        collection("userPosts", Vec::new()),
    ]))
    .unwrap_err();

    assert_eq!(
        err,
        Error::DuplicateTypeName {
            collection: "userPosts".to_string(),
            other: "user_posts".to_string(),
            type_name: "UserPosts".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::DuplicateName);
    assert_eq!(err.collection(), Some("userPosts"));
}

#[test]
fn colliding_plural_type_names_are_rejected() {
    let mut people = collection("people", Vec::new());
    people.singular = Some("person".to_string());
    let mut staff = collection("staff", Vec::new());
    staff.plural = Some("people".to_string());

    let err = compile(&document(vec![people, staff])).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateTypeName { ref type_name, .. } if type_name == "People"
    ));
}

#[test]
fn type_names_must_be_identifiers() {
    for (name, type_name) in [("_", ""), ("--", ""), ("2fa", "2Fa")] {
        let err = compile(&document(vec![collection(name, Vec::new())])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTypeName {
                collection: name.to_string(),
                type_name: type_name.to_string(),
            }
        );
        assert_eq!(err.kind(), ErrorKind::MalformedDeclaration);
    }

    let mut renamed = collection("2fa", Vec::new());
    renamed.singular = Some("second factor".to_string());
    renamed.plural = Some("second factors".to_string());
    let compiled = compile(&document(vec![renamed])).expect("singular overrides name");
    assert_eq!(compiled.collections[0].type_name, "SecondFactor");
}

#[test]
fn file_companion_names_cannot_be_declared() {
    let doc = document(vec![collection(
        "albums",
        vec![
            json!({ "name": "photos", "type": "file", "mode": "multiple" }),
            json!({ "name": "photosAppend", "type": "plainText" }),
        ],
    )]);

    let err = compile(&doc).unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateField {
            collection: "albums".to_string(),
            field: "photosAppend".to_string(),
        }
    );

    let doc = document(vec![collection(
        "albums",
        vec![
            json!({ "name": "photos-", "type": "json" }),
            json!({ "name": "photos", "type": "file", "mode": "multiple" }),
        ],
    )]);
    assert!(matches!(
        compile(&doc).unwrap_err(),
        Error::DuplicateField { ref field, .. } if field == "photos-"
    ));

    let doc = document(vec![collection(
        "albums",
        vec![
            json!({ "name": "photo", "type": "file", "mode": "single" }),
            json!({ "name": "photoAppend", "type": "plainText" }),
        ],
    )]);
    assert!(compile(&doc).is_ok());
}

#[test]
fn auto_timestamps_only_appear_in_read_shape() {
    let doc = document(vec![collection(
        "logs",
        vec![
            json!({ "name": "message", "type": "plainText" }),
            json!({ "name": "created", "type": "autodate" }),
            json!({ "name": "updated", "type": "autodate" }),
        ],
    )]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("logs").expect("logs");

    let created = bundle.read_field("created").expect("created in read shape");
    assert_eq!(created.model_type, TypeRef::Temporal);
    assert_eq!(created.parse, Some(Codec::Temporal));
    assert!(bundle.create_field("created").is_none());
    assert!(bundle.update_field("created").is_none());
    assert!(bundle.create_field("updated").is_none());
    assert!(bundle.update_field("updated").is_none());
}

#[test]
fn multi_file_update_has_exactly_three_companions() {
    let doc = document(vec![collection(
        "albums",
        vec![
            json!({ "name": "cover", "type": "file", "mode": "single" }),
            json!({ "name": "photos", "type": "file", "mode": "multiple", "required": true }),
        ],
    )]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("albums").expect("albums");

    let cover = bundle.create_field("cover").expect("cover create");
    assert_eq!(cover.model_type, TypeRef::Binary);
    assert!(cover.optional);
    let photos = bundle.create_field("photos").expect("photos create");
    assert_eq!(photos.model_type, TypeRef::list(TypeRef::Binary));
    assert!(!photos.optional);

    let companions: Vec<_> = bundle
        .update
        .iter()
        .filter_map(|field| field.patch_op().map(|op| (op, field)))
        .collect();
    assert_eq!(companions.len(), 3);
    assert!(companions.iter().all(|(_, field)| field.kind == pocketgen_core::FieldKind::File));

    let keys: Vec<_> = companions
        .iter()
        .map(|(op, field)| (*op, field.name.as_str(), field.wire_key.as_str()))
        .collect();
    assert_eq!(
        keys,
        [
            (PatchOp::Append, "photosAppend", "photos+"),
            (PatchOp::Prepend, "photosPrepend", "+photos"),
            (PatchOp::Remove, "photosRemove", "photos-"),
        ]
    );

    let names: Vec<_> = bundle.update.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["cover", "photos", "photosAppend", "photosPrepend", "photosRemove"]
    );

    let cover_update = bundle.update_field("cover").expect("cover update");
    assert_eq!(cover_update.model_type, TypeRef::clearable(TypeRef::Binary));
    assert!(cover_update.optional);
    assert!(!cover_update.is_companion());
}

#[test]
fn declaration_order_is_preserved_in_every_shape() {
    let doc = document(vec![
        collection(
            "people",
            vec![json!({ "name": "name", "type": "plainText" })],
        ),
        collection(
            "tasks",
            vec![
                json!({ "name": "zeta", "type": "number" }),
                json!({ "name": "owner", "type": "relation", "to": "people", "mode": "single" }),
                json!({ "name": "alpha", "type": "boolean" }),
                json!({ "name": "watchers", "type": "relation", "to": "people", "mode": "multiple" }),
                json!({ "name": "middle", "type": "json" }),
            ],
        ),
    ]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("tasks").expect("tasks");
    let expected = ["zeta", "owner", "alpha", "watchers", "middle"];

    let read: Vec<_> = bundle.read.iter().map(|f| f.name.as_str()).collect();
    let create: Vec<_> = bundle.create.iter().map(|f| f.name.as_str()).collect();
    let update: Vec<_> = bundle.update.iter().map(|f| f.name.as_str()).collect();
    let expand: Vec<_> = bundle.expand.iter().map(|e| e.field.as_str()).collect();

    assert_eq!(read, expected);
    assert_eq!(create, expected);
    assert_eq!(update, expected);
    assert_eq!(expand, ["owner", "watchers"]);

    let names: Vec<_> = compiled.collections.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["people", "tasks"]);
}

#[test]
fn compilation_is_deterministic() {
    let doc = document(vec![drivers(), cnhs("drivers")]);
    let first = compile(&doc).expect("first").to_json_pretty().expect("json");
    let second = compile(&doc).expect("second").to_json_pretty().expect("json");
    assert_eq!(first, second);
}

#[test]
fn non_required_relations_round_trip_their_empty_representative() {
    let doc = document(vec![
        collection("people", Vec::new()),
        collection(
            "teams",
            vec![
                json!({ "name": "lead", "type": "relation", "to": "people", "mode": "single" }),
                json!({ "name": "members", "type": "relation", "to": "people", "mode": "multiple" }),
            ],
        ),
    ]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("teams").expect("teams");

    for (name, empty) in [("lead", json!("")), ("members", json!([]))] {
        let field = bundle.read_field(name).expect("relation field");
        assert!(field.model_type.is_nullable(), "{name} should be nullable");

        let model = codec::decode(field.parse, &empty).expect("decode");
        assert_eq!(model, ModelValue::Null);
        let wire = codec::encode(field.serialize, &model).expect("encode");
        assert_eq!(wire, empty);

        let null_wire = codec::encode(field.serialize, &ModelValue::Null).expect("encode null");
        let back = codec::decode(field.parse, &null_wire).expect("decode null");
        assert_eq!(back, ModelValue::Null);
    }
}

#[test]
fn empty_list_policy_keeps_multi_relations_as_lists() {
    let doc = document(vec![
        collection("people", Vec::new()),
        collection(
            "teams",
            vec![
                json!({ "name": "lead", "type": "relation", "to": "people", "mode": "single" }),
                json!({ "name": "members", "type": "relation", "to": "people", "mode": "multiple" }),
            ],
        ),
    ]);
    let options = CompileOptions {
        empty_list: EmptyListPolicy::EmptyList,
    };

    let compiled = compile_with_options(&doc, &options).expect("compile");
    let bundle = compiled.collection("teams").expect("teams");

    let members = bundle.read_field("members").expect("members");
    assert_eq!(members.model_type, TypeRef::list(TypeRef::RecordId));
    assert_eq!(members.parse, None);

    let lead = bundle.read_field("lead").expect("lead");
    assert!(lead.model_type.is_nullable());
}

#[test]
fn required_flavored_text_and_relations_never_admit_null() {
    let doc = document(vec![
        collection("people", Vec::new()),
        collection(
            "contacts",
            vec![
                json!({ "name": "email", "type": "email", "required": true }),
                json!({ "name": "site", "type": "url", "required": true }),
                json!({ "name": "bio", "type": "richText", "required": true }),
                json!({ "name": "owner", "type": "relation", "to": "people", "mode": "multiple", "required": true }),
            ],
        ),
    ]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("contacts").expect("contacts");
    for field in &bundle.read {
        assert!(!field.model_type.is_nullable(), "{} is nullable", field.name);
        assert_eq!(field.parse, None);
    }
}

#[test]
fn date_time_fields_always_carry_codecs() {
    let doc = document(vec![collection(
        "events",
        vec![
            json!({ "name": "startsAt", "type": "datetime", "required": true }),
            json!({ "name": "endsAt", "type": "datetime" }),
        ],
    )]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("events").expect("events");

    let starts = bundle.read_field("startsAt").expect("startsAt");
    assert_eq!(starts.model_type, TypeRef::Temporal);
    assert_eq!(starts.parse, Some(Codec::Temporal));

    let ends = bundle.read_field("endsAt").expect("endsAt");
    assert_eq!(ends.model_type, TypeRef::nullable(TypeRef::Temporal));
    assert_eq!(ends.serialize, Some(Codec::NullableTemporal));

    let create = bundle.create_field("endsAt").expect("endsAt create");
    assert_eq!(create.serialize, Some(Codec::NullableTemporal));
}

#[test]
fn password_is_write_only() {
    let doc = document(vec![collection(
        "users",
        vec![
            json!({ "name": "email", "type": "email", "required": true }),
            json!({ "name": "password", "type": "password" }),
        ],
    )]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("users").expect("users");
    assert!(bundle.read_field("password").is_none());
    assert_eq!(
        bundle.create_field("password").map(|f| &f.model_type),
        Some(&TypeRef::String)
    );
    assert!(bundle.update_field("password").is_some());
}

#[test]
fn pass_through_kinds_have_no_codecs() {
    let doc = document(vec![collection(
        "places",
        vec![
            json!({ "name": "open", "type": "boolean" }),
            json!({ "name": "meta", "type": "json" }),
            json!({ "name": "location", "type": "geoPoint" }),
            json!({ "name": "rating", "type": "number", "required": true }),
        ],
    )]);

    let compiled = compile(&doc).expect("compile");
    let bundle = compiled.collection("places").expect("places");
    for field in &bundle.read {
        assert_eq!(field.parse, None);
        assert_eq!(field.model_type, field.wire_type);
    }
    assert_eq!(
        bundle.read_field("location").map(|f| &f.model_type),
        Some(&TypeRef::GeoPoint)
    );
    assert_eq!(
        bundle.read_field("rating").and_then(|f| f.doc.as_deref()),
        Some("Must be nonzero.")
    );
}

#[test]
fn singular_and_plural_names_drive_type_names() {
    let mut people = collection("people", Vec::new());
    people.singular = Some("person".to_string());
    people.plural = Some("people".to_string());

    let compiled = compile(&document(vec![people])).expect("compile");
    let bundle = &compiled.collections[0];
    assert_eq!(bundle.type_name, "Person");
    assert_eq!(bundle.plural_type_name, "People");
}
