#![cfg(test)]

use std::fs::{self, File};
use std::sync::Arc;

use tempfile::tempdir;

use crate::discovery::error::DiscoveryError;
use crate::discovery::resolver::{PathResolver, PathSource};
use crate::discovery::validator::{PathKind, PathValidator};
use crate::storage::LocalStorageProvider;
use crate::tests::fixtures::{make_server, write_plugin_jar};

fn resolver() -> PathResolver {
    PathResolver::new(PathValidator::new(Arc::new(LocalStorageProvider::new())))
}

#[tokio::test]
async fn test_directory_keeps_only_valid_plugins() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();
    write_plugin_jar(&base.join("Alpha.jar"), "Alpha", "1.0.0");
    write_plugin_jar(&base.join("Beta.jar"), "Beta", "1.0.0");
    fs::create_dir(base.join("subdir")).unwrap();
    fs::write(base.join("notes.txt"), b"not a plugin").unwrap();
    File::create(base.join("Empty.jar")).unwrap();

    let mut names: Vec<String> = resolver()
        .resolve_plugins(&PathSource::Directory(base.to_path_buf()))
        .await
        .unwrap()
        .iter()
        .map(|p| p.file_name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Alpha.jar", "Beta.jar"]);
}

#[tokio::test]
async fn test_scan_is_not_recursive() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();
    fs::create_dir(base.join("nested")).unwrap();
    write_plugin_jar(&base.join("nested/Deep.jar"), "Deep", "1.0.0");
    make_server(&base.join("group"), "inner");

    let resolver = resolver();
    let source = PathSource::Directory(base.to_path_buf());
    assert!(resolver.resolve_plugins(&source).await.unwrap().is_empty());
    assert!(resolver.resolve_servers(&source).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_directory_of_servers() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();
    let lobby = make_server(base, "lobby");
    let survival = make_server(base, "survival");
    fs::create_dir(base.join("backups")).unwrap();
    fs::write(base.join("readme.md"), b"hi").unwrap();

    let servers = resolver()
        .resolve_servers(&PathSource::Directory(base.to_path_buf()))
        .await
        .unwrap();
    let paths: Vec<_> = servers.iter().map(|s| s.path().to_path_buf()).collect();
    assert_eq!(paths, vec![lobby, survival]);
}

#[tokio::test]
async fn test_single_explicit_path() {
    let temp_dir = tempdir().unwrap();
    let jar = temp_dir.path().join("Solo.jar");
    write_plugin_jar(&jar, "Solo", "1.0.0");

    let resolver = resolver();
    let found = resolver.resolve_plugins(&PathSource::Single(jar.clone())).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].path(), jar.as_path());

    // An invalid explicit path resolves to nothing rather than an error
    let missing = resolver
        .resolve_plugins(&PathSource::Single(temp_dir.path().join("Missing.jar")))
        .await
        .unwrap();
    assert!(missing.is_empty());

    // A single path is never scanned as a directory
    let as_single_dir = resolver
        .resolve_plugins(&PathSource::Single(temp_dir.path().to_path_buf()))
        .await
        .unwrap();
    assert!(as_single_dir.is_empty());
}

#[tokio::test]
async fn test_unreadable_base_directory_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("file.txt");
    fs::write(&file, b"x").unwrap();

    let resolver = resolver();
    for base in [temp_dir.path().join("missing"), file] {
        let err = resolver
            .resolve(PathKind::Server, &PathSource::Directory(base.clone()))
            .await
            .unwrap_err();
        match err {
            DiscoveryError::DirectoryRead { kind, path, .. } => {
                assert_eq!(kind, PathKind::Server);
                assert_eq!(path, base);
            }
        }
    }
}

#[tokio::test]
async fn test_generic_resolve_tags_kind() {
    let temp_dir = tempdir().unwrap();
    let base = temp_dir.path();
    write_plugin_jar(&base.join("One.jar"), "One", "1.0.0");
    make_server(base, "srv");

    let resolver = resolver().with_concurrency(1);
    let source = PathSource::Directory(base.to_path_buf());
    let plugins = resolver.resolve(PathKind::Plugin, &source).await.unwrap();
    let servers = resolver.resolve(PathKind::Server, &source).await.unwrap();
    assert_eq!(plugins.len(), 1);
    assert_eq!(servers.len(), 1);
    assert!(plugins.iter().all(|p| p.kind() == PathKind::Plugin));
    assert!(servers.iter().all(|s| s.kind() == PathKind::Server));
}

#[test]
fn test_path_source_display() {
    let single = PathSource::Single("a/b.jar".into());
    let dir = PathSource::Directory("plugins".into());
    assert_eq!(single.path(), std::path::Path::new("a/b.jar"));
    assert_eq!(dir.to_string(), "plugins (directory)");
}
