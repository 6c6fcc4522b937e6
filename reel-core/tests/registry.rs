mod common;

use common::ScriptDir;
use reel_core::SceneRegistry;

#[test]
fn discovers_sorts_and_finds() {
    let dir = ScriptDir::new();
    dir.write("b.txt", "ANIMATION 2 city1\nreturn -1\n");
    dir.write("a.txt", "animation 10\nreturn -1\n");
    dir.write("c.txt", "ANIMATION 0\nreturn 2\n");
    dir.write("notes.md", "# not a script\n");
    dir.write("bad_id.txt", "ANIMATION -3\n");
    dir.write("too_long.txt", "ANIMATION 4 city1 extra\n");
    dir.write("empty.txt", "");
    std::fs::create_dir(dir.dir.path().join("nested")).unwrap();
    std::fs::write(dir.dir.path().join("nested/d.txt"), "ANIMATION 5\n").unwrap();

    let registry = SceneRegistry::load_dir(dir.dir.path()).unwrap();
    assert_eq!(registry.ids(), vec![0, 2, 10]);

    let scene = registry.find_scene(2).unwrap();
    assert_eq!(scene.id(), 2);
    assert_eq!(scene.header_background(), Some("city1"));
    assert!(registry.find_scene(5).is_none());
    assert!(registry.find_scene(-1).is_none());
    assert!(registry.find_scene(i64::MAX).is_none());
}

#[test]
fn first_of_duplicate_ids_wins() {
    let dir = ScriptDir::new();
    dir.write("first.txt", "ANIMATION 1\nreturn 11\n");
    dir.write("second.txt", "ANIMATION 1\nreturn 22\n");
    let registry = SceneRegistry::load_dir(dir.dir.path()).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.find_scene(1).unwrap().path().ends_with("first.txt"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = ScriptDir::new();
    assert!(SceneRegistry::load_dir(dir.dir.path().join("nope")).is_err());
}

#[test]
fn non_utf8_files_are_skipped() {
    let dir = ScriptDir::new();
    std::fs::write(dir.dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
    dir.write("ok.txt", "ANIMATION 3\n");
    let registry = SceneRegistry::load_dir(dir.dir.path()).unwrap();
    assert_eq!(registry.ids(), vec![3]);
}
