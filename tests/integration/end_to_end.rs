//! End-to-end seal of a small tree, recomputed by hand with the sha2 crate

use sealdir::tree::builder::TreeBuilder;
use sealdir::Node;
use sha2::{Digest as _, Sha256};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(unix)]
fn mode_string(path: &Path) -> String {
    use std::os::unix::fs::PermissionsExt;
    (fs::symlink_metadata(path).unwrap().permissions().mode() & 0o7777).to_string()
}

#[cfg(not(unix))]
fn mode_string(path: &Path) -> String {
    if fs::symlink_metadata(path).unwrap().permissions().readonly() {
        0o444.to_string()
    } else {
        0o666.to_string()
    }
}

fn leaf_seal(path: &Path, contents: &[u8]) -> [u8; 32] {
    let name = path.file_name().unwrap().to_str().unwrap();
    let size = contents.len().to_string();
    sha256(&[contents, name.as_bytes(), mode_string(path).as_bytes(), size.as_bytes()])
}

fn child<'a>(node: &'a Node, name: &str) -> &'a Node {
    node.children()
        .iter()
        .find(|c| c.name() == name)
        .unwrap_or_else(|| panic!("no child named {}", name))
}

#[test]
fn test_hello_world_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::create_dir(root.join("b")).unwrap();
    fs::write(root.join("b").join("c.txt"), "world").unwrap();

    let tree = TreeBuilder::new(root.to_path_buf()).build().unwrap();
    let a = child(&tree, "a.txt");
    let b = child(&tree, "b");
    let c = child(b, "c.txt");

    // Content track
    let content_a = sha256(&[b"hello"]);
    let content_c = sha256(&[b"world"]);
    let content_b = sha256(&[&content_c]);
    let content_root = sha256(&[&content_a, &content_b]);
    assert_eq!(a.content_digest().as_bytes(), &content_a);
    assert_eq!(c.content_digest().as_bytes(), &content_c);
    assert_eq!(b.content_digest().as_bytes(), &content_b);
    assert_eq!(tree.content_digest().as_bytes(), &content_root);

    // Seal track: leaves mix in name, permission bits and size
    let seal_a = leaf_seal(&root.join("a.txt"), b"hello");
    let seal_c = leaf_seal(&root.join("b").join("c.txt"), b"world");
    let seal_b = sha256(&[&seal_c]);
    let seal_root = sha256(&[&seal_a, &seal_b]);
    assert_eq!(a.seal_digest().as_bytes(), &seal_a);
    assert_eq!(c.seal_digest().as_bytes(), &seal_c);
    assert_eq!(b.seal_digest().as_bytes(), &seal_b);
    assert_eq!(tree.seal_digest().as_bytes(), &seal_root);

    assert_ne!(a.seal_digest(), a.content_digest());
}

#[test]
fn test_compute_root_matches_tree_seal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "hello").unwrap();

    let builder = TreeBuilder::new(temp_dir.path().to_path_buf());
    let tree = builder.build().unwrap();
    assert_eq!(&builder.compute_root().unwrap(), tree.seal_digest());
}
