// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for devfile operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with devfile Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, validating or editing a devfile.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// No devfile found at the provided path or url
    #[error(
        "the provided path is not a valid yaml filepath, and devfile.yaml or .devfile.yaml not found in the provided path : {0}"
    )]
    #[diagnostic(
        code(devfile::path_resolution),
        help("Point at a .yaml file, or a directory containing devfile.yaml or .devfile.yaml")
    )]
    PathResolution(String),

    /// The same devfile was reached twice in one resolution session
    #[error("URI {0} is recursively referenced")]
    #[diagnostic(
        code(devfile::recursive_reference),
        help("Remove the circular parent reference from your devfiles")
    )]
    RecursiveReference(String),

    /// Content has no schemaVersion field
    #[error("schemaVersion not present in devfile: {source_name}")]
    #[diagnostic(code(devfile::missing_schema_version))]
    MissingSchemaVersion { source_name: String },

    /// The detected schema version has no bundled schema
    #[error("devfile version '{version}' is not supported")]
    #[diagnostic(
        code(devfile::unsupported_schema_version),
        help("Supported versions are: {}", supported.join(", "))
    )]
    UnsupportedSchemaVersion {
        version: String,
        supported: Vec<String>,
    },

    /// Content does not conform to the schema of its version
    #[error("failed to validate devfile schema:\n{}", .errors.join("\n"))]
    #[diagnostic(code(devfile::schema_validation))]
    SchemaValidation { errors: Vec<String> },

    /// A component or volume mount lookup missed
    #[error("{field} {name} is not found in the devfile")]
    #[diagnostic(code(devfile::field_not_found))]
    FieldNotFound { field: String, name: String },

    /// New volume mounts collide with existing mount paths
    #[error("errors while adding volume mounts:\n{}", .0.join("\n"))]
    #[diagnostic(
        code(devfile::volume_mount_conflict),
        help("Each path may only be mounted once per container")
    )]
    VolumeMountConflict(Vec<String>),

    /// The component exists but does not mount the volume
    #[error("volume {mount} not mounted to component {component}")]
    #[diagnostic(code(devfile::not_mounted))]
    NotMounted { mount: String, component: String },

    /// Content or schema requested before the context was populated
    #[error("devfile context has not been populated")]
    #[diagnostic(
        code(devfile::not_populated),
        help("Call populate, populate_from_url or populate_from_raw first")
    )]
    NotPopulated,

    /// Source url could not be parsed
    #[error("invalid devfile url: {url}")]
    #[diagnostic(code(devfile::invalid_url))]
    InvalidUrl {
        url: String,
        #[source]
        error: url::ParseError,
    },

    /// The url parsed but has no hierarchical path to probe
    #[error("devfile url cannot be used as a base: {0}")]
    #[diagnostic(code(devfile::invalid_url))]
    CannotBeABase(String),

    /// Download of a remote devfile failed
    #[error("failed to download devfile from {url}")]
    #[diagnostic(code(devfile::download_failed))]
    Download {
        url: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(devfile::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Invalid YAML content
    #[error("Invalid devfile yaml: {error}")]
    #[diagnostic(
        code(devfile::invalid_yaml),
        help("Check YAML syntax and ensure 'schemaVersion' is present")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn field_not_found(field: &str, name: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.to_string(),
            name: name.into(),
        }
    }

    /// True when this error reports a component or volume mount lookup miss.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }
}
