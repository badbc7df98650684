//! Contract tests for the rows-as-objects store semantics, exercised
//! against the in-memory implementation.

use roster_core::{Record, RecordStore};
use roster_sheets::InMemoryStore;

fn store() -> InMemoryStore {
    InMemoryStore::new().with_table(
        "Generus",
        vec!["Nama", "Desa", "Kelompok", "Gender", "Tanggal Lahir", "Hobi", "Skill", "Timestamp"],
        vec![
            vec!["Budi", "Gayungan", "Menanggal", "L", "15/08/2015", "membaca", "", "01/01/2024 10:00:00"],
            vec!["Siti", "Ketintang", "Karah", "P", "10/02/2010", "", "masak", "02/01/2024 10:00:00"],
        ],
    )
}

#[tokio::test]
async fn append_then_read_back_round_trips() {
    let store = store();

    // Supplied keys deliberately use different casing than the headers.
    let submitted = Record::from_pairs([
        ("NAMA", "Agus"),
        ("desa", "Wonocolo"),
        ("Kelompok", "Margorejo"),
        ("gender", "L"),
        ("TANGGAL LAHIR", "01/06/2012"),
    ]);
    store.append(&submitted, "Generus").await.unwrap();

    let records = store.read_all("Generus").await.unwrap();
    assert_eq!(records.len(), 3);
    let read_back = &records[2];
    for (field, value) in submitted.iter() {
        assert_eq!(read_back.cell(field), value, "field {}", field);
    }
    // Headers with no matching supplied field read as empty string.
    assert_eq!(read_back.cell("Hobi"), "");
    assert_eq!(read_back.cell("Timestamp"), "");
}

#[tokio::test]
async fn update_is_full_row_overwrite() {
    let store = store();

    // Omitting fields destroys previously-present data in those columns.
    let partial = Record::from_pairs([("Nama", "Budi Santoso")]);
    store.update_at(2, &partial, "Generus").await.unwrap();

    let records = store.read_all("Generus").await.unwrap();
    assert_eq!(records[0].cell("Nama"), "Budi Santoso");
    assert_eq!(records[0].cell("Desa"), "");
    assert_eq!(records[0].cell("Tanggal Lahir"), "");
}

#[tokio::test]
async fn delete_shifts_subsequent_positions() {
    let store = store();

    store.delete_at(2, "Generus").await.unwrap();
    let records = store.read_all("Generus").await.unwrap();
    assert_eq!(records.len(), 1);
    // The record formerly at position 3 is now at position 2.
    assert_eq!(records[0].cell("Nama"), "Siti");
}

#[tokio::test]
async fn positions_below_two_are_rejected() {
    let store = store();
    let record = Record::from_pairs([("Nama", "X")]);

    assert!(store.update_at(1, &record, "Generus").await.is_err());
    assert!(store.delete_at(0, "Generus").await.is_err());
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let store = store();
    assert!(store.read_all("Missing").await.is_err());
}
