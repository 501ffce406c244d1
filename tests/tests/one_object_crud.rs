//! Basic lifecycle of a single object: save, load, update, delete.

use tests::fixtures;
use tests::*;

use larder::{FieldValue, Ident, Object};
use pretty_assertions::assert_eq;

#[test]
fn save_assigns_identity_and_load_round_trips() {
    let mut db = db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let mut data = Object::new(&model);
    data.set("name", "first").unwrap();
    data.set("payload", vec![1u8, 2, 3]).unwrap();
    assert!(data.is_transient());
    assert!(data.ident().is_none());

    db.save(&mut data).unwrap();
    assert!(data.is_persisted());
    assert!(!data.is_dirty());
    let ident = data.ident().unwrap();

    let loaded = db.load(&model, ident).unwrap();
    assert_eq!(
        *loaded.get("name").unwrap(),
        FieldValue::Text("first".into())
    );
    assert_eq!(
        *loaded.get("payload").unwrap(),
        FieldValue::Blob(vec![1, 2, 3])
    );
    assert_eq!(loaded.ident(), Some(ident));
    assert!(loaded.is_persisted());
}

#[test]
fn update_in_place_keeps_identity() {
    let mut db = db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let mut data = Object::new(&model);
    data.set("name", "before").unwrap();
    db.save(&mut data).unwrap();
    let ident = data.ident().unwrap();

    data.set("name", "after").unwrap();
    db.save(&mut data).unwrap();
    assert_eq!(data.ident(), Some(ident));

    let loaded = db.load(&model, ident).unwrap();
    assert_eq!(
        *loaded.get("name").unwrap(),
        FieldValue::Text("after".into())
    );
    assert_eq!(db.count(&model).unwrap(), 1);
}

#[test]
fn clean_object_skips_row_write() {
    let (mut db, log) = recording_db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let mut data = Object::new(&model);
    data.set("name", "steady").unwrap();
    db.save(&mut data).unwrap();
    assert!(log.has_insert_row());

    log.clear();
    db.save(&mut data).unwrap();
    assert!(!log.has_update_row(), "clean object wrote its row");
    assert!(!log.has_insert_row());

    data.set("name", "changed").unwrap();
    db.save(&mut data).unwrap();
    assert!(log.has_update_row());
}

#[test]
fn load_missing_identity_is_not_found() {
    let mut db = db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let err = db.load(&model, Ident::new(404)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn delete_removes_row_and_terminates_lifecycle() {
    let mut db = db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let mut data = Object::new(&model);
    data.set("name", "doomed").unwrap();
    db.save(&mut data).unwrap();
    let ident = data.ident().unwrap();

    db.delete(&mut data).unwrap();
    assert!(data.is_deleted());
    assert!(data.ident().is_none());
    assert!(db.load(&model, ident).unwrap_err().is_not_found());

    // Terminal state: neither save nor delete is allowed again
    assert!(db.save(&mut data).unwrap_err().is_use_after_delete());
    assert!(db.delete(&mut data).unwrap_err().is_use_after_delete());
}

#[test]
fn delete_transient_only_transitions() {
    let (mut db, log) = recording_db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();
    log.clear();

    let mut data = Object::new(&model);
    db.delete(&mut data).unwrap();
    assert!(data.is_deleted());
    assert!(log.is_empty(), "transient delete touched the store");
}

#[test]
fn load_all_returns_ascending_identities() {
    let mut db = db();
    let model = fixtures::basic_data();
    db.push_schema(&[&model]).unwrap();

    let mut idents = Vec::new();
    for name in ["a", "b", "c"] {
        let mut data = Object::new(&model);
        data.set("name", name).unwrap();
        db.save(&mut data).unwrap();
        idents.push(data.ident().unwrap());
    }

    let all = db.load_all(&model).unwrap();
    assert_eq!(all.len(), 3);
    let loaded_idents: Vec<_> = all.iter().map(|o| o.ident().unwrap()).collect();
    assert_eq!(loaded_idents, idents);
    assert_eq!(db.count(&model).unwrap(), 3);
}
