//! Objects written through one database handle are readable through a fresh
//! handle over the same file.

use tests::fixtures;

use larder::{Db, FieldValue, Object};
use larder_store_sqlite::SqliteStore;
use pretty_assertions::assert_eq;

#[test]
fn reopen_and_load_full_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("larder.db");
    let container = fixtures::data_container();
    let basic_model = fixtures::basic_data();

    let ident = {
        let mut db = Db::new(SqliteStore::open(&path).unwrap());
        db.push_schema(&[&container, &basic_model]).unwrap();

        let mut owner = Object::new(&container);
        owner.set("number", 9i64).unwrap();
        let mut element = Object::new(&basic_model);
        element.set("name", "durable").unwrap();
        owner.push_related("basicObjects", element).unwrap();
        db.save(&mut owner).unwrap();
        owner.ident().unwrap()
    };

    let mut db = Db::new(SqliteStore::open(&path).unwrap());
    db.push_schema(&[&container, &basic_model]).unwrap();

    let loaded = db.load(&container, ident).unwrap();
    assert_eq!(*loaded.get("number").unwrap(), FieldValue::Int(9));
    let related = loaded.related("basicObjects").unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(
        *related[0].get("name").unwrap(),
        FieldValue::Text("durable".into())
    );
}
