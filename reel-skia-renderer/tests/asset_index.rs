use std::fs;
use std::path::Path;

use reel_skia_renderer::assets::AssetIndex;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn frames_stop_at_first_gap() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "char_main/rick0.png");
    touch(dir.path(), "char_main/rick1.png");
    touch(dir.path(), "char_main/rick3.png");
    touch(dir.path(), "char_main/sam0.png");

    let index = AssetIndex::scan(dir.path());
    assert_eq!(index.len(), 4);
    let frames = index.frames("char_main", "rick");
    assert_eq!(frames.len(), 2);
    assert!(frames[1].ends_with("rick1.png"));
    assert!(index.frames("char_main", "paul").is_empty());
}

#[test]
fn names_match_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "backgrounds/City1.PNG");
    touch(dir.path(), "char_side/Heather0.png");

    let index = AssetIndex::scan(dir.path());
    assert!(index.get("backgrounds", "city1").is_some());
    assert_eq!(index.frames("char_side", "heather").len(), 1);
}

#[test]
fn ignores_other_files_and_depths() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "loose0.png");
    touch(dir.path(), "objects/bullet0.txt");
    touch(dir.path(), "objects/deep/bullet0.png");

    let index = AssetIndex::scan(dir.path());
    assert!(index.is_empty());
}

#[test]
fn missing_root_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let index = AssetIndex::scan(&dir.path().join("nope"));
    assert!(index.is_empty());
}
