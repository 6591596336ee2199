use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use ext_sorter::walk::{walk, walk_excluding};
use futures::StreamExt;
use tempfile::tempdir;

async fn collect(source: PathBuf) -> BTreeSet<PathBuf> {
    walk(source).collect::<Vec<_>>().await.into_iter().collect()
}

#[tokio::test]
async fn test_walk_yields_nested_regular_files_only() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("sub/deeper")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("a.txt"), b"a").unwrap();
    fs::write(root.join("sub/b.TXT"), b"b").unwrap();
    fs::write(root.join("sub/deeper/c"), b"c").unwrap();

    let files = collect(root.to_path_buf()).await;

    let expected: BTreeSet<PathBuf> = [
        root.join("a.txt"),
        root.join("sub/b.TXT"),
        root.join("sub/deeper/c"),
    ]
    .into_iter()
    .collect();
    assert_eq!(files, expected);
}

#[tokio::test]
async fn test_walk_of_empty_directory_is_empty() {
    let tmp = tempdir().unwrap();
    assert!(collect(tmp.path().to_path_buf()).await.is_empty());
}

#[tokio::test]
async fn test_walk_of_missing_directory_ends_without_panicking() {
    let tmp = tempdir().unwrap();
    assert!(collect(tmp.path().join("nope")).await.is_empty());
}

#[tokio::test]
async fn test_walk_excluding_skips_the_whole_excluded_subtree() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("sorted/txt")).unwrap();
    fs::create_dir_all(root.join("keep")).unwrap();
    fs::write(root.join("a.txt"), b"a").unwrap();
    fs::write(root.join("keep/b.txt"), b"b").unwrap();
    fs::write(root.join("sorted/txt/a.txt"), b"a").unwrap();

    let files: BTreeSet<PathBuf> = walk_excluding(root.to_path_buf(), Some(root.join("sorted")))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect();

    let expected: BTreeSet<PathBuf> = [root.join("a.txt"), root.join("keep/b.txt")]
        .into_iter()
        .collect();
    assert_eq!(files, expected);
}

#[cfg(unix)]
#[tokio::test]
async fn test_walk_follows_file_symlinks_but_not_dangling_ones() {
    use std::os::unix::fs::symlink;

    let tmp = tempdir().unwrap();
    let root = tmp.path().join("root");
    let outside = tmp.path().join("outside");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(outside.join("nested")).unwrap();
    fs::write(outside.join("target.txt"), b"t").unwrap();
    fs::write(outside.join("nested/hidden.txt"), b"h").unwrap();

    symlink(outside.join("target.txt"), root.join("link.txt")).unwrap();
    symlink(outside.join("missing.txt"), root.join("dangling.txt")).unwrap();
    symlink(outside.join("nested"), root.join("dirlink")).unwrap();

    let files = collect(root.clone()).await;

    let expected: BTreeSet<PathBuf> = [root.join("link.txt")].into_iter().collect();
    assert_eq!(files, expected);
}

#[cfg(unix)]
#[tokio::test]
async fn test_walk_skips_unreadable_directory_and_keeps_going() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let locked = root.join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("secret.txt"), b"s").unwrap();
    fs::write(root.join("open.txt"), b"o").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through mode 000; nothing to observe then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let files = collect(root.to_path_buf()).await;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let expected: BTreeSet<PathBuf> = [root.join("open.txt")].into_iter().collect();
    assert_eq!(files, expected);
}
