// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Migrations and foreign key enforcement are also exercised implicitly by
//! every other persistence test through `Persistence::new_in_memory()`.

use crate::Persistence;
use crate::backend::DatabaseLocation;
use crate::tests::insert_test_year;

#[test]
fn test_persistence_initialization() {
    let result = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let years = persistence.list_years();

    assert!(
        years.is_ok(),
        "Migrations must have applied for academic_years table to exist"
    );
    assert!(years.unwrap().is_empty());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    insert_test_year(&mut db1, 2026);

    assert_eq!(db1.list_years().unwrap().len(), 1);
    assert!(db2.list_years().unwrap().is_empty(), "db2 must be isolated");
}

#[test]
fn test_file_database_is_created_and_reopened() {
    let path = std::env::temp_dir().join(format!(
        "ciclo-persistence-test-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        insert_test_year(&mut persistence, 2026);
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.list_years().unwrap().len(), 1);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[test]
fn test_memory_location_uses_shared_cache_uri() {
    let location: DatabaseLocation = DatabaseLocation::Memory(String::from("calendar_7"));
    assert_eq!(location.url(), "file:calendar_7?mode=memory&cache=shared");
    assert!(!location.uses_wal());
}

#[test]
fn test_file_location_is_the_path() {
    let location: DatabaseLocation = DatabaseLocation::File(String::from("/var/lib/ciclo/ciclo.db"));
    assert_eq!(location.url(), "/var/lib/ciclo/ciclo.db");
    assert!(location.uses_wal());
}
