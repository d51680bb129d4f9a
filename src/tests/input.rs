use super::{find_documents, load_cheatcodes, load_file};
use crate::error::Error;
use std::fs;
use tempfile::tempdir;

fn extensions() -> Vec<String> {
    vec!["json".to_string(), "md".to_string()]
}

#[test]
fn test_find_documents_recurses_and_filters() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    fs::write(dir.path().join("a.json"), "{}").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::write(nested.join("c.MD"), "# C\n").unwrap();

    let found = find_documents(vec![dir.path().to_path_buf()], &extensions()).unwrap();

    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.json", "b.md", "c.MD"]);
}

#[test]
fn test_explicit_file_kept_and_missing_path_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "x").unwrap();

    let found = find_documents(vec![file.clone()], &extensions()).unwrap();
    assert_eq!(found, vec![file]);

    let missing = find_documents(vec![dir.path().join("nope")], &extensions());
    assert!(missing.is_err());
}

#[test]
fn test_load_file_stamps_date_and_id() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vim.md");
    fs::write(&path, "# Vim\n\nModal editing.\n\n## Motions\n\n- w next word\n").unwrap();

    let docs = load_file(&path).unwrap();

    assert_eq!(docs[0].metadata.id, "vim");
    assert_eq!(docs[0].metadata.title, "Vim");
    assert_eq!(docs[0].metadata.last_updated.len(), "2024-01-01".len());
}

#[test]
fn test_load_file_errors() {
    let dir = tempdir().unwrap();
    let unsupported = dir.path().join("notes.txt");
    fs::write(&unsupported, "x").unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{oops").unwrap();

    assert!(matches!(
        load_file(&unsupported),
        Err(Error::UnsupportedFormat(_))
    ));
    match load_file(&broken) {
        Err(Error::Parse { path, .. }) => assert_eq!(path, broken),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_cheatcodes_skips_failures_and_duplicates() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let broken = dir.path().join("broken.json");
    fs::write(
        &first,
        r#"[{"metadata":{"id":"git","title":"Git"}},{"metadata":{"id":"vim","title":"Vim"}}]"#,
    )
    .unwrap();
    fs::write(
        &second,
        r#"{"metadata":{"id":"git","title":"Git again","lastUpdated":"2020-02-02"}}"#,
    )
    .unwrap();
    fs::write(&broken, "{oops").unwrap();

    let docs = load_cheatcodes(&[broken, first, second]);

    let titles: Vec<&str> = docs.iter().map(|d| d.metadata.title.as_str()).collect();
    assert_eq!(titles, vec!["Git", "Vim"]);
}

#[test]
fn test_bundled_samples_load_and_search() {
    let samples = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("cheatcodes");

    let files = find_documents(vec![samples], &extensions()).unwrap();
    let docs = load_cheatcodes(&files);

    let ids: Vec<&str> = docs.iter().map(|d| d.metadata.id.as_str()).collect();
    assert_eq!(ids, vec!["docker", "git"]);

    let results = crate::search::search(&docs, "stash");
    assert_eq!(results[0].section_id, "stash");
    assert_eq!(results[0].path, vec!["Git Basics".to_string(), "Stash".to_string()]);
    assert!(crate::search::search(&docs, "detached").is_empty(), "tables are not searched");
}
