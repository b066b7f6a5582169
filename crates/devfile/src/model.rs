// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Typed in-memory devfile data model.
//!
//! Only the fields this crate operates on are typed. Everything else is kept
//! in the flattened `other` maps so that decoding, editing and re-encoding a
//! devfile preserves content the model does not know about.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "./model_test.rs"]
mod model_test;

/// Untyped devfile fields, kept verbatim.
pub type Extra = BTreeMap<String, serde_yaml::Value>;

/// A decoded devfile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Devfile {
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Devfile this one imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,

    #[serde(flatten)]
    pub other: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub other: Extra,
}

/// Reference to an imported devfile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    /// Path (relative to the importing devfile) or url of the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(flatten)]
    pub other: Extra,
}

/// A named unit of a devfile, optionally backed by a container.
///
/// Names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,

    #[serde(flatten)]
    pub other: Extra,
}

impl Component {
    /// A container component with the given image and no mounts.
    pub fn new_container<N, I>(name: N, image: I) -> Self
    where
        N: Into<String>,
        I: Into<String>,
    {
        Self {
            name: name.into(),
            container: Some(Container {
                image: image.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// A volume component.
    pub fn new_volume<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            volume: Some(Volume::default()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,

    #[serde(flatten)]
    pub other: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,

    #[serde(flatten)]
    pub other: Extra,
}

/// Binding of a volume to a path inside a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct VolumeMount {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl VolumeMount {
    pub fn new<N, P>(name: N, path: P) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Devfile {
    /// Decode a devfile from YAML content.
    pub fn from_yaml(content: &[u8]) -> crate::Result<Self> {
        serde_yaml::from_slice(content).map_err(|error| crate::Error::InvalidYaml { error })
    }

    /// Encode this devfile as YAML.
    pub fn to_yaml(&self) -> crate::Result<String> {
        serde_yaml::to_string(self).map_err(|error| crate::Error::InvalidYaml { error })
    }

    /// The first component with the given name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Components that are backed by a container.
    pub fn container_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.container.is_some())
    }

    /// Location of the imported parent devfile, if any.
    pub fn parent_uri(&self) -> Option<&str> {
        self.parent
            .as_ref()
            .and_then(|p| p.uri.as_deref())
            .filter(|uri| !uri.is_empty())
    }
}
