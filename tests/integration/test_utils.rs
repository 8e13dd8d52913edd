//! Shared test utilities for integration tests
//!
//! Fixture trees and XDG isolation for tests that read the global config file.

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture(names: &[&'static str]) -> Self {
        Self {
            vars: names
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with XDG_CONFIG_HOME and HOME pointing into `test_dir`
///
/// The global config file then resolves to `<test_dir>/sealdir/config.toml`.
/// `extra` variables are set for the duration of the call and restored after.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, extra: &[(&'static str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let mut names = vec!["HOME", "XDG_CONFIG_HOME"];
    names.extend(extra.iter().map(|(name, _)| *name));
    let env_state = EnvState::capture(&names);

    let test_home = test_dir.path().join("home");
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    for (name, value) in extra {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();

    result
}

/// Write a fixture tree. Entries ending in `/` are directories.
pub fn write_tree(root: &Path, entries: &[(&str, &str)]) {
    for (rel, contents) in entries {
        let path = root.join(rel);
        if rel.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, contents).unwrap();
        }
    }
}
