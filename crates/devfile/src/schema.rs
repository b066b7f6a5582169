// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Bundled devfile JSON schemas, schema version detection and validation.

use std::collections::BTreeMap;
use std::fmt;

use jsonschema::Validator;
use once_cell::sync::{Lazy, OnceCell};
use serde_json::Value;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./schema_test.rs"]
mod schema_test;

/// Name of the top-level field carrying the devfile schema version.
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// Bundled schema documents keyed by api version.
const BUNDLED_SCHEMAS: &[(&str, &str)] = &[
    ("2.0.0", include_str!("../schemas/2.0.0.json")),
    ("2.1.0", include_str!("../schemas/2.1.0.json")),
    ("2.2.0", include_str!("../schemas/2.2.0.json")),
];

/// A parsed bundled schema and its validator, compiled on first use.
struct BundledSchema {
    document: Value,
    validator: OnceCell<Validator>,
}

static SCHEMAS: Lazy<BTreeMap<&'static str, BundledSchema>> = Lazy::new(|| {
    BUNDLED_SCHEMAS
        .iter()
        .map(|(version, raw)| {
            let document = serde_json::from_str(raw).expect("bundled schema is valid JSON");
            let bundled = BundledSchema {
                document,
                validator: OnceCell::new(),
            };
            (*version, bundled)
        })
        .collect()
});

/// The api versions that have a bundled schema.
pub fn supported_versions() -> Vec<String> {
    BUNDLED_SCHEMAS
        .iter()
        .map(|(version, _)| version.to_string())
        .collect()
}

/// A bundled JSON schema selected for one api version.
#[derive(Clone, Copy)]
pub struct JsonSchema {
    version: &'static str,
    bundled: &'static BundledSchema,
}

impl JsonSchema {
    /// The api version this schema validates.
    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn document(&self) -> &'static Value {
        &self.bundled.document
    }

    /// The `$id` of the schema document, if present.
    pub fn id(&self) -> Option<&'static str> {
        self.document().get("$id").and_then(Value::as_str)
    }

    /// The compiled validator, shared by every validation against this schema.
    pub(crate) fn validator(&self) -> Result<&'static Validator> {
        let bundled = self.bundled;
        bundled
            .validator
            .get_or_try_init(|| {
                tracing::debug!(version = self.version, "compiling devfile schema");
                jsonschema::validator_for(&bundled.document)
            })
            .map_err(|e| Error::SchemaValidation {
                errors: vec![format!("invalid schema {}: {e}", self.version)],
            })
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl PartialEq for JsonSchema {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

/// Look up the bundled schema for an api version.
pub fn schema_for(api_version: &str) -> Result<JsonSchema> {
    SCHEMAS
        .get_key_value(api_version)
        .map(|(version, bundled)| JsonSchema {
            version: *version,
            bundled,
        })
        .ok_or_else(|| Error::UnsupportedSchemaVersion {
            version: api_version.to_string(),
            supported: supported_versions(),
        })
}

/// Read the literal `schemaVersion` value out of raw devfile content.
///
/// `source_name` only appears in the error when the field is missing.
pub fn detect_schema_version(content: &[u8], source_name: &str) -> Result<String> {
    let document: serde_yaml::Value =
        serde_yaml::from_slice(content).map_err(|error| Error::InvalidYaml { error })?;

    let missing = || Error::MissingSchemaVersion {
        source_name: source_name.to_string(),
    };
    match document.get(SCHEMA_VERSION_FIELD) {
        Some(serde_yaml::Value::String(version)) => Ok(version.clone()),
        Some(serde_yaml::Value::Number(version)) => Ok(version.to_string()),
        _ => Err(missing()),
    }
}

/// Map a schema version to the api version whose schema validates it.
///
/// Patch releases, pre-releases and build metadata all share the schema of
/// their `<major>.<minor>.0` release.
pub fn api_version(schema_version: &str) -> Result<String> {
    let parsed =
        semver::Version::parse(schema_version).map_err(|_| Error::UnsupportedSchemaVersion {
            version: schema_version.to_string(),
            supported: supported_versions(),
        })?;
    Ok(format!("{}.{}.0", parsed.major, parsed.minor))
}

/// Validate raw devfile content against a schema, collecting every violation.
pub fn validate(content: &[u8], schema: &JsonSchema) -> Result<()> {
    if content.is_empty() {
        return Err(Error::NotPopulated);
    }
    let instance: Value =
        serde_yaml::from_slice(content).map_err(|error| Error::InvalidYaml { error })?;

    let validator = schema.validator()?;
    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| {
            let location = e.instance_path.to_string();
            if location.is_empty() {
                format!("(root): {e}")
            } else {
                format!("{location}: {e}")
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "devfile failed schema validation");
        Err(Error::SchemaValidation { errors })
    }
}
