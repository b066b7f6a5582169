// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

const NODEJS_DEVFILE: &str = r#"
schemaVersion: 2.2.0
metadata:
  name: nodejs
  version: 2.1.1
  displayName: Node.js Runtime
parent:
  uri: ../base/devfile.yaml
components:
  - name: runtime
    container:
      image: registry.access.redhat.com/ubi8/nodejs-16:latest
      memoryLimit: 1024Mi
      mountSources: true
      volumeMounts:
        - name: cache
          path: /tmp/cache
  - name: cache
    volume:
      size: 1Gi
commands:
  - id: install
    exec:
      component: runtime
      commandLine: npm install
"#;

#[rstest]
fn test_decode_devfile() {
    let devfile = Devfile::from_yaml(NODEJS_DEVFILE.as_bytes()).expect("Should decode devfile");

    assert_eq!(devfile.schema_version, "2.2.0");
    let metadata = devfile.metadata.as_ref().unwrap();
    assert_eq!(metadata.name.as_deref(), Some("nodejs"));
    assert!(metadata.other.contains_key("displayName"));
    assert_eq!(devfile.parent_uri(), Some("../base/devfile.yaml"));

    assert_eq!(devfile.components.len(), 2);
    let runtime = devfile.component("runtime").unwrap();
    let container = runtime.container.as_ref().unwrap();
    assert_eq!(container.volume_mounts, vec![VolumeMount::new("cache", "/tmp/cache")]);
    assert!(container.other.contains_key("memoryLimit"));

    let cache = devfile.component("cache").unwrap();
    assert!(cache.container.is_none());
    assert_eq!(cache.volume.as_ref().unwrap().size.as_deref(), Some("1Gi"));

    assert!(devfile.other.contains_key("commands"));
}

#[rstest]
fn test_encode_preserves_untyped_fields() {
    let devfile = Devfile::from_yaml(NODEJS_DEVFILE.as_bytes()).unwrap();
    let yaml = devfile.to_yaml().unwrap();

    assert!(yaml.contains("schemaVersion:"));
    assert!(yaml.contains("memoryLimit: 1024Mi"));
    assert!(yaml.contains("commandLine: npm install"));
    assert!(yaml.contains("volumeMounts:"));

    let again = Devfile::from_yaml(yaml.as_bytes()).unwrap();
    assert_eq!(again, devfile);
}

#[rstest]
fn test_volume_mount_path_is_optional() {
    let yaml = r#"
schemaVersion: 2.0.0
components:
  - name: runtime
    container:
      image: busybox
      volumeMounts:
        - name: data
"#;
    let devfile = Devfile::from_yaml(yaml.as_bytes()).unwrap();
    let mounts = &devfile.components[0].container.as_ref().unwrap().volume_mounts;
    assert_eq!(mounts, &vec![VolumeMount::new("data", "")]);
}

#[rstest]
fn test_container_components() {
    let devfile = Devfile {
        schema_version: "2.2.0".to_string(),
        components: vec![
            Component::new_container("web", "nginx"),
            Component::new_volume("data"),
            Component::new_container("db", "postgres"),
        ],
        ..Default::default()
    };

    let names: Vec<_> = devfile.container_components().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["web", "db"]);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn test_parent_uri_absent(#[case] uri: Option<&str>) {
    let devfile = Devfile {
        parent: Some(Parent {
            uri: uri.map(String::from),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(devfile.parent_uri(), None);
}
