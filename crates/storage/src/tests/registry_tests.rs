#![expect(clippy::unwrap_used, reason = "test code")]

use physlog_core::REGISTRY_DB_FILE;
use rusqlite::Connection;

use super::create_test_storage;
use crate::traits::RegistryStore;

#[test]
fn test_new_registry_is_empty() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.registry.list_all().unwrap().is_empty());
    assert_eq!(storage.registry.count().unwrap(), 0);
}

#[test]
fn test_insert_and_list_in_insertion_order() {
    let (storage, _temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    storage.registry.insert("Jiro", "Jiro T", 2).unwrap();
    let last = storage.registry.insert("Hanako", "Hanako K", 3).unwrap();

    let all = storage.registry.list_all().unwrap();
    let names: Vec<&str> = all.iter().map(|r| r.local_name.as_str()).collect();
    assert_eq!(names, vec!["Taro", "Jiro", "Hanako"]);
    assert_eq!(all.last().unwrap(), &last);
    assert!(all.windows(2).all(|w| w[0].seq < w[1].seq));
}

#[test]
fn test_duplicates_are_accepted_by_the_store() {
    let (storage, _temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    assert_eq!(storage.registry.count().unwrap(), 2);
}

#[test]
fn test_delete_last_removes_most_recent() {
    let (storage, _temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    storage.registry.insert("Jiro", "Jiro T", 2).unwrap();

    let deleted = storage.registry.delete_last().unwrap().unwrap();
    assert_eq!(deleted.local_name, "Jiro");
    let remaining = storage.registry.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].local_name, "Taro");
}

#[test]
fn test_delete_last_on_empty_table_is_none() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.registry.delete_last().unwrap().is_none());
}

#[test]
fn test_insert_then_delete_restores_snapshot() {
    let (storage, _temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    let before = storage.registry.list_all().unwrap();

    let inserted = storage.registry.insert("Jiro", "Jiro T", 2).unwrap();
    let deleted = storage.registry.delete_last().unwrap().unwrap();
    assert_eq!(deleted, inserted);
    assert_eq!(storage.registry.list_all().unwrap(), before);
}

#[test]
fn test_seq_is_not_reused_after_delete() {
    let (storage, _temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    let second = storage.registry.insert("Jiro", "Jiro T", 2).unwrap();
    storage.registry.delete_last().unwrap();
    let third = storage.registry.insert("Hanako", "Hanako K", 3).unwrap();
    assert!(third.seq > second.seq);

    // "last" now means Hanako, not the deleted Jiro slot
    assert_eq!(storage.registry.delete_last().unwrap().unwrap().local_name, "Hanako");
}

#[test]
fn test_data_survives_reopen() {
    let (storage, temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    drop(storage);

    let reopened = crate::Storage::open(&physlog_core::AppConfig::in_dir(temp_dir.path())).unwrap();
    assert_eq!(reopened.registry.list_all().unwrap().len(), 1);
}

#[test]
fn test_row_with_text_identifier_is_listed_not_dropped() {
    let (storage, temp_dir) = create_test_storage();
    storage.registry.insert("Taro", "Taro S", 1).unwrap();
    let conn = Connection::open(temp_dir.path().join(REGISTRY_DB_FILE)).unwrap();
    conn.execute(
        "INSERT INTO id_table (local_name, external_name, identifier)
           VALUES ('Jiro', 'Jiro T', 'J-2')",
        [],
    )
    .unwrap();
    drop(conn);

    let all = storage.registry.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].identifier, "1");
    assert_eq!(all[1].identifier, "J-2");
    assert!(all[1].parsed_identifier().is_err());
}
