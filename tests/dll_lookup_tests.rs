//! Framework resolution against DLLs on disk
use std::fs;

use flag_classifier::platform::resolve_dll;
use flag_classifier::{Classifier, DirectoryDllLookup, DllLookup, PlatformMode};

#[test]
fn test_directory_lookup_lists_only_dll_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Qt.DLL"), b"").expect("write dll");
    fs::write(dir.path().join("sdl2.dll"), b"").expect("write dll");
    fs::write(dir.path().join("readme.txt"), b"").expect("write txt");
    fs::write(dir.path().join("mixed.Dll"), b"").expect("write dll");
    fs::create_dir(dir.path().join("plugins.dll")).expect("create dir");

    let names = DirectoryDllLookup::new(dir.path())
        .dll_names()
        .expect("list dlls");

    assert_eq!(names, vec!["Qt.DLL".to_string(), "sdl2.dll".to_string()]);
}

#[test]
fn test_resolve_dll_uses_on_disk_case() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Qt.DLL"), b"").expect("write dll");

    let lookup = DirectoryDllLookup::new(dir.path());
    assert_eq!(resolve_dll("qt", &lookup), "Qt.DLL");
    assert_eq!(resolve_dll("Gui", &lookup), "Gui.dll");
}

#[test]
fn test_missing_directory_falls_back_to_guess() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let lookup = DirectoryDllLookup::new(dir.path().join("does-not-exist"));

    assert!(lookup.dll_names().is_err());
    assert_eq!(resolve_dll("Qt", &lookup), "Qt.dll");
}

#[test]
fn test_win64_framework_with_dll_on_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Qt.DLL"), b"").expect("write dll");

    let classifier = Classifier::new(PlatformMode::Win64, DirectoryDllLookup::new(dir.path()));
    let result = classifier.classify("-framework Qt");

    assert!(result.linkflags.contains("-lQt"));
    assert!(result.linkflags.contains("-L."));
    assert!(!result.linkflags.contains("-lFrameworks"));
}

#[test]
fn test_posix_never_touches_the_filesystem() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let classifier = Classifier::new(
        PlatformMode::Posix,
        DirectoryDllLookup::new(dir.path().join("missing")),
    );

    let result = classifier.classify("-framework Qt");
    assert_eq!(result.linkflags.to_string(), "-framework Qt");
}

#[cfg(target_os = "linux")]
#[test]
fn test_unusable_entries_do_not_hide_other_dlls() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("Qt.DLL"), b"").expect("write dll");
    fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.dll")), b"").expect("write dll");
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling.dll"))
        .expect("create symlink");

    let lookup = DirectoryDllLookup::new(dir.path());
    assert_eq!(lookup.dll_names().expect("list dlls"), vec!["Qt.DLL".to_string()]);
    // Listing twice gives the same answer
    assert_eq!(lookup.dll_names().expect("list dlls"), vec!["Qt.DLL".to_string()]);
    assert_eq!(resolve_dll("qt", &lookup), "Qt.DLL");
}
