use roster_core::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn concurrent_adds_all_persist() {
    let dir = tempfile::tempdir().unwrap();
    let config = RosterConfig::new(dir.path().join("students.json"));
    let shared = SharedRoster::open(config.clone()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..50 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            shared
                .add(StudentRecord::new(
                    format!("s{}", i),
                    format!("Student {}", i),
                    "20",
                    if i % 2 == 0 { "Math" } else { "CS" },
                ))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let in_memory = shared.list().await;
    assert_eq!(in_memory.len(), 50);

    // The last save must reflect every add, in the same order
    let on_disk = Roster::open(&config).unwrap();
    assert_eq!(on_disk.store().list(), in_memory.as_slice());
}

#[tokio::test]
async fn reload_picks_up_external_save() {
    let dir = TempDir::new().unwrap();
    let config = RosterConfig::new(dir.path().join("students.json"));
    let shared = SharedRoster::open(config.clone()).await.unwrap();
    assert!(shared.list().await.is_empty());

    let mut other = Roster::open(&config).unwrap();
    other.add(StudentRecord::new("1", "Amy", "20", "Math")).unwrap();

    shared.reload().await.unwrap();
    let view = shared.view("AMY", &CourseFilter::All).await;
    assert_eq!(view.rows, vec![StudentRecord::new("1", "Amy", "20", "Math")]);
    assert_eq!(view.courses, vec!["All", "Math"]);
}

#[tokio::test]
async fn open_surfaces_corrupt_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.json");
    std::fs::write(&path, "not json at all").unwrap();

    let err = SharedRoster::open(RosterConfig::new(&path)).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}
