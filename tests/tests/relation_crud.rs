//! Relation collections: ordering, replace-on-save, and link records at the
//! store.

use tests::fixtures;
use tests::*;

use larder::{FieldValue, LinkKey, Object};
use pretty_assertions::assert_eq;

fn basic(name: &str) -> Object {
    let model = fixtures::basic_data();
    let mut data = Object::new(&model);
    data.set("name", name).unwrap();
    data
}

fn names(objects: &[Object]) -> Vec<String> {
    objects
        .iter()
        .map(|o| match o.get("name").unwrap() {
            FieldValue::Text(name) => name.clone(),
            other => panic!("unexpected name value {other:?}"),
        })
        .collect()
}

#[test]
fn relation_order_survives_reload() {
    let mut db = db();
    let container = fixtures::data_container();
    let basic_model = fixtures::basic_data();
    db.push_schema(&[&container, &basic_model]).unwrap();

    let mut owner = Object::new(&container);
    for name in ["A", "B", "C"] {
        owner.push_related("basicObjects", basic(name)).unwrap();
    }
    db.save(&mut owner).unwrap();

    // Every element was persisted with the owner
    assert_eq!(db.count(&basic_model).unwrap(), 3);

    // An intervening unrelated save must not disturb the ordinals
    let mut unrelated = basic("unrelated");
    db.save(&mut unrelated).unwrap();

    let loaded = db.load(&container, owner.ident().unwrap()).unwrap();
    assert_eq!(names(loaded.related("basicObjects").unwrap()), ["A", "B", "C"]);
}

#[test]
fn replace_on_save_leaves_no_stale_links() {
    let mut db = db();
    let container = fixtures::data_container();
    let basic_model = fixtures::basic_data();
    db.push_schema(&[&container, &basic_model]).unwrap();

    let mut owner = Object::new(&container);
    owner
        .set_related(
            "basicObjects",
            vec![basic("A"), basic("B")],
        )
        .unwrap();
    db.save(&mut owner).unwrap();
    let ident = owner.ident().unwrap();

    let a_ident = owner.related("basicObjects").unwrap()[0].ident().unwrap();
    let b_ident = owner.related("basicObjects").unwrap()[1].ident().unwrap();

    owner
        .set_related("basicObjects", vec![basic("C")])
        .unwrap();
    db.save(&mut owner).unwrap();

    // Check directly at the store: exactly one link, pointing at C
    let key = LinkKey::new("data_container", ident, "basicObjects");
    let links = db.store_mut().select_links(&key).unwrap();
    assert_eq!(links.len(), 1);
    assert_ne!(links[0].target, a_ident);
    assert_ne!(links[0].target, b_ident);
    assert_eq!(links[0].ordinal, 0);

    let loaded = db.load(&container, ident).unwrap();
    assert_eq!(names(loaded.related("basicObjects").unwrap()), ["C"]);
}

#[test]
fn empty_relation_round_trips() {
    let mut db = db();
    let container = fixtures::data_container();
    db.push_schema(&[&container, &fixtures::basic_data()]).unwrap();

    let mut owner = Object::new(&container);
    db.save(&mut owner).unwrap();

    let loaded = db.load(&container, owner.ident().unwrap()).unwrap();
    assert!(loaded.related("basicObjects").unwrap().is_empty());
}

#[test]
fn element_edits_propagate_through_owner_save() {
    let mut db = db();
    let container = fixtures::data_container();
    let basic_model = fixtures::basic_data();
    db.push_schema(&[&container, &basic_model]).unwrap();

    let mut owner = Object::new(&container);
    owner.push_related("basicObjects", basic("old")).unwrap();
    db.save(&mut owner).unwrap();

    let mut loaded = db.load(&container, owner.ident().unwrap()).unwrap();
    let mut elements = loaded.related("basicObjects").unwrap().to_vec();
    elements[0].set("name", "new").unwrap();
    loaded.set_related("basicObjects", elements).unwrap();
    db.save(&mut loaded).unwrap();

    let reloaded = db.load(&container, owner.ident().unwrap()).unwrap();
    assert_eq!(names(reloaded.related("basicObjects").unwrap()), ["new"]);
}

#[test]
fn deleting_owner_removes_its_links() {
    let mut db = db();
    let container = fixtures::data_container();
    db.push_schema(&[&container, &fixtures::basic_data()]).unwrap();

    let mut owner = Object::new(&container);
    owner.push_related("basicObjects", basic("kept")).unwrap();
    db.save(&mut owner).unwrap();
    let ident = owner.ident().unwrap();

    db.delete(&mut owner).unwrap();

    let key = LinkKey::new("data_container", ident, "basicObjects");
    assert!(db.store_mut().select_links(&key).unwrap().is_empty());

    // The related object itself is store-owned and survives
    assert_eq!(db.count(&fixtures::basic_data()).unwrap(), 1);
}
