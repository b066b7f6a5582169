// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_visit_twice_is_recursive() {
    let refs = ReferenceSet::new();
    refs.visit("/project/devfile.yaml").unwrap();

    match refs.visit("/project/devfile.yaml") {
        Err(Error::RecursiveReference(uri)) => assert_eq!(uri, "/project/devfile.yaml"),
        other => panic!("Expected RecursiveReference, got: {:?}", other),
    }
    assert_eq!(refs.len(), 1);
}

#[rstest]
fn test_clones_share_visits() {
    let parent = ReferenceSet::new();
    let child = parent.clone();

    child.visit("https://example.com/devfile.yaml").unwrap();

    assert!(parent.contains("https://example.com/devfile.yaml"));
    assert!(parent.is_shared_with(&child));
    assert!(parent.visit("https://example.com/devfile.yaml").is_err());
}

#[rstest]
fn test_separate_sessions_do_not_interfere() {
    let first = ReferenceSet::new();
    let second = ReferenceSet::new();

    first.visit("/a/devfile.yaml").unwrap();
    second.visit("/a/devfile.yaml").unwrap();

    assert!(!first.is_shared_with(&second));
    assert!(!second.is_empty());
}

#[rstest]
fn test_uris_are_sorted() {
    let refs = ReferenceSet::new();
    refs.visit("/b/devfile.yaml").unwrap();
    refs.visit("/a/devfile.yaml").unwrap();

    assert_eq!(refs.uris(), vec!["/a/devfile.yaml", "/b/devfile.yaml"]);
}
