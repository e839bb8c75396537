//! Environment overrides live in their own test binary: env vars are
//! process-global and would leak into other Settings::load tests.

use std::env;
use std::fs;

use tempfile::TempDir;

use taxtree::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_load_then_they_override_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "input = \"from_file.txt\"\nindent = 4\n",
    )
    .unwrap();

    env::set_var("TAXTREE_INPUT", "from_env.txt");
    env::set_var("TAXTREE_INDENT", "3");
    let settings = Settings::load(Some(dir.path()));
    env::set_var("TAXTREE_INDENT", "three");
    let invalid = Settings::load(Some(dir.path()));
    env::remove_var("TAXTREE_INPUT");
    env::remove_var("TAXTREE_INDENT");

    let settings = settings.expect("load settings");
    assert_eq!(settings.input, dir.path().join("from_env.txt"));
    assert_eq!(settings.indent, 3);
    assert_eq!(settings.output, dir.path().join("taxonomy.json"));

    assert!(invalid.is_err(), "non-numeric TAXTREE_INDENT must be rejected");
}
