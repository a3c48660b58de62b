//! Integration tests for Settings layered loading.
//!
//! Layers (lowest to highest): defaults, global file, local file, env vars.
//! Env vars are injected through a fixed map so tests never touch the
//! process environment.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use streamlab::application::ApplicationError;
use streamlab::config::{env_from_map, Settings};
use streamlab::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

struct ConfigFiles {
    _dir: TempDir,
    global: PathBuf,
    local: PathBuf,
}

#[fixture]
fn files() -> ConfigFiles {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("streamlab.toml");
    let local = dir.path().join("local.toml");
    ConfigFiles {
        _dir: dir,
        global,
        local,
    }
}

fn no_env() -> HashMap<String, String> {
    HashMap::new()
}

#[rstest]
fn given_no_sources_when_load_then_defaults() {
    let settings = Settings::load_with(None, None, env_from_map(no_env())).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.separator, "\t");
    assert!(settings.parallel);
    assert_eq!(settings.threads, None);
}

#[rstest]
fn given_global_file_when_load_then_overrides_defaults(files: ConfigFiles) {
    fs::write(&files.global, "separator = \",\"\nthreads = 4\n").unwrap();

    let settings =
        Settings::load_with(Some(&files.global), None, env_from_map(no_env())).unwrap();

    assert_eq!(settings.separator, ",");
    assert_eq!(settings.threads, Some(4));
    assert!(settings.parallel, "unspecified field keeps default");
}

#[rstest]
fn given_local_file_when_load_then_overrides_global(files: ConfigFiles) {
    fs::write(&files.global, "separator = \",\"\nparallel = false\n").unwrap();
    fs::write(&files.local, "separator = \";\"\n").unwrap();

    let settings = Settings::load_with(
        Some(&files.global),
        Some(&files.local),
        env_from_map(no_env()),
    )
    .unwrap();

    assert_eq!(settings.separator, ";");
    assert!(!settings.parallel, "global value survives local overlay");
}

#[rstest]
fn given_env_vars_when_load_then_override_files(files: ConfigFiles) {
    fs::write(&files.local, "separator = \";\"\nthreads = 2\n").unwrap();
    let env = HashMap::from([
        ("STREAMLAB_SEPARATOR".to_string(), "|".to_string()),
        ("STREAMLAB_PARALLEL".to_string(), "false".to_string()),
        ("STREAMLAB_THREADS".to_string(), "8".to_string()),
    ]);

    let settings = Settings::load_with(None, Some(&files.local), env_from_map(env)).unwrap();

    assert_eq!(settings.separator, "|");
    assert!(!settings.parallel);
    assert_eq!(settings.threads, Some(8));
}

#[rstest]
fn given_escaped_separator_when_load_then_unescaped(files: ConfigFiles) {
    fs::write(&files.local, "separator = '\\n'\n").unwrap();

    let settings = Settings::load_with(None, Some(&files.local), env_from_map(no_env())).unwrap();

    assert_eq!(settings.separator, "\n");
}

#[rstest]
fn given_missing_local_file_when_load_then_config_error(files: ConfigFiles) {
    let err = Settings::load_with(None, Some(&files.local), env_from_map(no_env())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[rstest]
fn given_malformed_toml_when_load_then_config_error(files: ConfigFiles) {
    fs::write(&files.local, "separator = [unclosed").unwrap();
    let err = Settings::load_with(None, Some(&files.local), env_from_map(no_env())).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[rstest]
#[case("0")]
#[case("-1")]
#[case("many")]
fn given_invalid_threads_when_load_then_config_error(#[case] threads: &str) {
    let env = HashMap::from([("STREAMLAB_THREADS".to_string(), threads.to_string())]);
    let err = Settings::load_with(None, None, env_from_map(env)).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }), "{err:?}");
}

#[rstest]
fn given_settings_when_to_toml_then_round_trips_through_file(files: ConfigFiles) {
    let settings = Settings {
        separator: ",".into(),
        parallel: false,
        threads: Some(3),
    };
    fs::write(&files.local, settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_with(None, Some(&files.local), env_from_map(no_env())).unwrap();

    assert_eq!(loaded, settings);
}
