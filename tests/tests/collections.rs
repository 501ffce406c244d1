//! Collection-valued properties: lists keep order, maps keep their entries,
//! sets keep membership.

use tests::fixtures;
use tests::*;

use larder::{Atom, FieldValue, Object};
use pretty_assertions::assert_eq;

#[test]
fn string_collections_round_trip() {
    let mut db = db();
    let model = fixtures::collections();
    db.push_schema(&[&model]).unwrap();

    let mut object = Object::new(&model);
    object
        .set(
            "stringsArray",
            FieldValue::List(vec!["zulu".into(), "alpha".into(), "zulu".into()]),
        )
        .unwrap();
    object
        .set(
            "stringsDict",
            FieldValue::Map(vec![
                ("k2".into(), "v2".into()),
                ("k1".into(), "v1".into()),
            ]),
        )
        .unwrap();
    object
        .set(
            "stringsSet",
            FieldValue::Set(vec!["b".into(), "a".into(), "b".into()]),
        )
        .unwrap();
    db.save(&mut object).unwrap();

    let loaded = db.load(&model, object.ident().unwrap()).unwrap();

    // Lists keep order and duplicates
    assert_eq!(
        *loaded.get("stringsArray").unwrap(),
        FieldValue::List(vec!["zulu".into(), "alpha".into(), "zulu".into()])
    );

    // Maps keep their entries; storage order is canonical, not insertion
    let FieldValue::Map(entries) = loaded.get("stringsDict").unwrap() else {
        panic!("dict did not come back as a map");
    };
    assert_eq!(entries.len(), 2);
    assert!(entries.contains(&("k1".into(), "v1".into())));
    assert!(entries.contains(&("k2".into(), "v2".into())));

    // Sets keep membership, deduplicated
    let FieldValue::Set(members) = loaded.get("stringsSet").unwrap() else {
        panic!("set did not come back as a set");
    };
    assert_eq!(members.len(), 2);
    assert!(members.contains(&"a".into()));
    assert!(members.contains(&"b".into()));
}

#[test]
fn data_collections_round_trip() {
    let mut db = db();
    let model = fixtures::collections();
    db.push_schema(&[&model]).unwrap();

    let blob = |byte: u8| Atom::Bytes(vec![byte; 16]);

    let mut object = Object::new(&model);
    object
        .set("dataArray", FieldValue::List(vec![blob(3), blob(1), blob(2)]))
        .unwrap();
    object
        .set(
            "dataDict",
            FieldValue::Map(vec![("payload".into(), blob(9))]),
        )
        .unwrap();
    object
        .set("dataSet", FieldValue::Set(vec![blob(5), blob(5), blob(4)]))
        .unwrap();
    db.save(&mut object).unwrap();

    let loaded = db.load(&model, object.ident().unwrap()).unwrap();
    assert_eq!(
        *loaded.get("dataArray").unwrap(),
        FieldValue::List(vec![blob(3), blob(1), blob(2)])
    );
    assert_eq!(
        *loaded.get("dataDict").unwrap(),
        FieldValue::Map(vec![("payload".into(), blob(9))])
    );
    let FieldValue::Set(members) = loaded.get("dataSet").unwrap() else {
        panic!("set did not come back as a set");
    };
    assert_eq!(members.len(), 2);
    assert!(members.contains(&blob(4)));
    assert!(members.contains(&blob(5)));
}

#[test]
fn nested_collections_round_trip() {
    let mut db = db();
    let model = fixtures::collections();
    db.push_schema(&[&model]).unwrap();

    let inner = Atom::List(vec!["x".into(), Atom::Int(2)]);
    let mut object = Object::new(&model);
    object
        .set(
            "stringsArray",
            FieldValue::List(vec![inner.clone(), Atom::Null]),
        )
        .unwrap();
    db.save(&mut object).unwrap();

    let loaded = db.load(&model, object.ident().unwrap()).unwrap();
    assert_eq!(
        *loaded.get("stringsArray").unwrap(),
        FieldValue::List(vec![inner, Atom::Null])
    );
}

#[test]
fn duplicate_map_keys_rejected() {
    let mut db = db();
    let model = fixtures::collections();
    db.push_schema(&[&model]).unwrap();

    let mut object = Object::new(&model);
    object
        .set(
            "stringsDict",
            FieldValue::Map(vec![("k".into(), "v1".into()), ("k".into(), "v2".into())]),
        )
        .unwrap();

    let err = db.save(&mut object).unwrap_err();
    assert!(err.is_unsupported_type(), "got: {err}");
    assert!(object.is_transient());
}

#[test]
fn empty_collections_are_not_null() {
    let mut db = db();
    let model = fixtures::collections();
    db.push_schema(&[&model]).unwrap();

    let mut object = Object::new(&model);
    object.set("stringsArray", FieldValue::List(Vec::new())).unwrap();
    object.set("stringsSet", FieldValue::Set(Vec::new())).unwrap();
    db.save(&mut object).unwrap();

    let loaded = db.load(&model, object.ident().unwrap()).unwrap();
    assert_eq!(
        *loaded.get("stringsArray").unwrap(),
        FieldValue::List(Vec::new())
    );
    assert_eq!(*loaded.get("stringsSet").unwrap(), FieldValue::Set(Vec::new()));
    // An unset collection field is plain null
    assert_eq!(*loaded.get("stringsDict").unwrap(), FieldValue::Null);
}
