// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use serial_test::serial;
use tempfile::TempDir;

use super::*;
use crate::fixtures::HomeGuard;

#[rstest]
fn test_default_fs_reads_and_checks_existence() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("devfile.yaml");
    std::fs::write(&path, "schemaVersion: 2.2.0\n").unwrap();

    let fs = DefaultFs;
    assert!(fs.exists(&path));
    assert!(!fs.exists(&tmp.path().join("missing.yaml")));
    assert_eq!(fs.read(&path).unwrap(), b"schemaVersion: 2.2.0\n");
}

#[rstest]
fn test_absolute_is_canonical() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("devfile.yaml"), "").unwrap();

    let indirect = nested.join("..").join("nested").join("devfile.yaml");
    let abs = DefaultFs.absolute(&indirect).unwrap();

    assert!(abs.is_absolute());
    assert_eq!(abs, dunce::canonicalize(nested.join("devfile.yaml")).unwrap());
}

#[rstest]
fn test_absolute_missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(DefaultFs.absolute(&tmp.path().join("nope.yaml")).is_err());
}

#[rstest]
#[case("relative/devfile.yaml")]
#[case("/abs/devfile.yaml")]
fn test_expand_home_leaves_plain_paths(#[case] path: &str) {
    assert_eq!(expand_home(Path::new(path)).unwrap(), PathBuf::from(path));
}

#[rstest]
#[serial]
fn test_expand_home_replaces_tilde() {
    let home = TempDir::new().unwrap();
    let _home = HomeGuard::set(home.path());

    let expanded = expand_home(Path::new("~/project/devfile.yaml")).unwrap();
    assert_eq!(expanded, home.path().join("project/devfile.yaml"));
    assert_eq!(expand_home(Path::new("~")).unwrap(), home.path());
}
