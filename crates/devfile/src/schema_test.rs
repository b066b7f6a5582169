// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
#[case("2.0.0", "2.0.0")]
#[case("2.1.0", "2.1.0")]
#[case("2.2.0", "2.2.0")]
#[case("2.2.1", "2.2.0")]
#[case("2.2.0-latest", "2.2.0")]
#[case("2.1.0+build.5", "2.1.0")]
fn test_api_version_drops_patch(#[case] schema_version: &str, #[case] expected: &str) {
    assert_eq!(api_version(schema_version).unwrap(), expected);
}

#[rstest]
#[case("2.2")]
#[case("latest")]
fn test_api_version_rejects_non_semver(#[case] schema_version: &str) {
    match api_version(schema_version) {
        Err(Error::UnsupportedSchemaVersion { version, .. }) => assert_eq!(version, schema_version),
        other => panic!("Expected UnsupportedSchemaVersion, got: {:?}", other),
    }
}

#[rstest]
fn test_every_bundled_schema_loads() {
    for version in supported_versions() {
        let schema = schema_for(&version).expect("bundled schema should exist");
        assert_eq!(schema.version(), version);
        assert!(schema.id().is_some_and(|id| id.contains(&version)));
        schema.validator().expect("bundled schema should compile");
    }
    assert_eq!(supported_versions().len(), BUNDLED_SCHEMAS.len());
}

#[rstest]
fn test_bundled_schemas_are_valid_json() {
    for (version, raw) in BUNDLED_SCHEMAS {
        let parsed: std::result::Result<Value, _> = serde_json::from_str(raw);
        assert!(parsed.is_ok(), "schema {version} is not valid JSON");
    }
}

#[rstest]
fn test_validator_is_compiled_once() {
    let schema = schema_for("2.2.0").unwrap();
    let first = schema.validator().unwrap();
    let second = schema_for("2.2.0").unwrap().validator().unwrap();
    assert!(std::ptr::eq(first, second));

    let content = b"schemaVersion: 2.2.0\n";
    validate(content, &schema).unwrap();
    validate(content, &schema).unwrap();
    assert!(std::ptr::eq(first, schema.validator().unwrap()));
}

#[rstest]
fn test_unknown_version_has_no_schema() {
    match schema_for("1.0.0") {
        Err(Error::UnsupportedSchemaVersion { version, supported }) => {
            assert_eq!(version, "1.0.0");
            assert_eq!(supported, vec!["2.0.0", "2.1.0", "2.2.0"]);
        }
        other => panic!("Expected UnsupportedSchemaVersion, got: {:?}", other),
    }
}

#[rstest]
fn test_detect_schema_version() {
    let content = b"schemaVersion: 2.2.0\nmetadata:\n  name: nodejs\n";
    assert_eq!(detect_schema_version(content, "devfile.yaml").unwrap(), "2.2.0");
}

#[rstest]
fn test_detect_schema_version_missing() {
    let content = b"metadata:\n  name: nodejs\n";
    match detect_schema_version(content, "/tmp/devfile.yaml") {
        Err(Error::MissingSchemaVersion { source_name }) => {
            assert_eq!(source_name, "/tmp/devfile.yaml")
        }
        other => panic!("Expected MissingSchemaVersion, got: {:?}", other),
    }
}

#[rstest]
fn test_detect_schema_version_invalid_yaml() {
    let content = b"schemaVersion: [\n  unclosed\n";
    assert!(matches!(
        detect_schema_version(content, "devfile.yaml"),
        Err(Error::InvalidYaml { .. })
    ));
}

#[rstest]
fn test_validate_accepts_valid_devfile() {
    let content = br#"
schemaVersion: 2.2.0
metadata:
  name: nodejs
components:
  - name: runtime
    container:
      image: registry.access.redhat.com/ubi8/nodejs-16:latest
      volumeMounts:
        - name: cache
          path: /tmp/cache
  - name: cache
    volume:
      size: 1Gi
"#;
    let schema = schema_for("2.2.0").unwrap();
    validate(content, &schema).expect("devfile should be valid");
    // repeated validation gives the same answer
    validate(content, &schema).expect("devfile should still be valid");
}

#[rstest]
fn test_validate_collects_all_violations() {
    let content = br#"
schemaVersion: 2.2.0
components:
  - name: Runtime
    container:
      volumeMounts:
        - path: /data
"#;
    let schema = schema_for("2.2.0").unwrap();
    match validate(content, &schema) {
        Err(Error::SchemaValidation { errors }) => {
            assert!(errors.len() >= 3, "expected several errors, got {errors:?}");
            assert!(errors.iter().any(|e| e.contains("/components/0/name")));
            assert!(errors.iter().any(|e| e.contains("image")));
        }
        other => panic!("Expected SchemaValidation, got: {:?}", other),
    }
}

#[rstest]
fn test_image_component_requires_2_2() {
    let content = br#"
schemaVersion: 2.1.0
components:
  - name: build
    image:
      imageName: quay.io/example/app
"#;
    assert!(validate(content, &schema_for("2.1.0").unwrap()).is_err());
    assert!(validate(content, &schema_for("2.2.0").unwrap()).is_ok());
}

#[rstest]
fn test_validate_without_content_is_usage_error() {
    let schema = schema_for("2.0.0").unwrap();
    assert!(matches!(validate(b"", &schema), Err(Error::NotPopulated)));
}
