//! Artifact cleanup.

use std::fs;

use relax_align::clean;

#[test]
fn clean_on_empty_directory_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    assert!(clean(dir.path()).unwrap().is_empty());
}

#[test]
fn clean_removes_only_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.norvc.o", "a.norvc.elf", "a.norvc.dump", "a.s", "x.ld", "notes.txt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir(dir.path().join("keep.o")).unwrap();

    let removed = clean(dir.path()).unwrap();
    assert_eq!(removed.len(), 3);

    let mut left: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, vec!["a.s", "keep.o", "notes.txt", "x.ld"]);
}

#[test]
fn clean_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t.o"), "").unwrap();
    assert_eq!(clean(dir.path()).unwrap().len(), 1);
    assert!(clean(dir.path()).unwrap().is_empty());
}
