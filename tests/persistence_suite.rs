mod common;

use common::sample_book;
use site_core::storage::{book_warnings, JsonStorage, StorageBackend};
use tempfile::TempDir;

fn storage() -> (JsonStorage, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let storage =
        JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).expect("json storage");
    (storage, temp)
}

#[test]
fn a_full_book_survives_the_json_round_trip() {
    let (storage, _guard) = storage();
    let mut book = sample_book();
    // Persist a synthesized schedule along with the estimate.
    let project = &mut book.projects[0];
    site_core::core::ScheduleService::regenerate(project);

    storage.save(&book, "riverside").expect("save");
    let loaded = storage.load("riverside").expect("load");

    assert_eq!(loaded.id, book.id);
    assert_eq!(loaded.projects.len(), 1);
    let original = &book.projects[0];
    let restored = &loaded.projects[0];
    assert_eq!(restored.line_items.len(), original.line_items.len());
    assert_eq!(restored.schedule_tasks, original.schedule_tasks);
    assert_eq!(restored.payment_schedule, original.payment_schedule);
    assert!(book_warnings(&loaded).is_empty());
}

#[test]
fn backups_are_pruned_to_the_retention_limit() {
    let (storage, _guard) = storage();
    let book = sample_book();
    storage.save(&book, "riverside").expect("save");
    for note in ["q1", "q2", "q3", "q4", "q5"] {
        storage
            .backup(&book, "riverside", Some(note))
            .expect("backup");
    }
    let backups = storage.list_backups("riverside").expect("list");
    assert!(backups.len() <= 3, "retention must prune old backups");
}

#[test]
fn saving_over_an_existing_book_leaves_a_backup_behind() {
    let (storage, _guard) = storage();
    let mut book = sample_book();
    storage.save(&book, "riverside").expect("first save");
    book.name = "Riverside Portfolio v2".into();
    storage.save(&book, "riverside").expect("second save");

    let backups = storage.list_backups("riverside").expect("list");
    assert!(!backups.is_empty());

    let restored = storage
        .restore("riverside", &backups[0])
        .expect("restore from backup");
    assert_eq!(restored.name, "Riverside Portfolio");
}
