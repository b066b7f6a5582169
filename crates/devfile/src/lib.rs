// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! devfile - Devfile Context Resolution and Data Model
//!
//! This crate locates devfiles on disk or over HTTP, guards against cyclic
//! imports, selects and applies the JSON schema for the devfile's schema
//! version, and provides typed edits of the decoded devfile.
//!
//! # Example
//!
//! ```no_run
//! use devfile::{DevfileCtx, VolumeMount};
//!
//! # fn main() -> devfile::Result<()> {
//! let mut ctx = DevfileCtx::new("./my-project");
//! ctx.populate()?;
//! ctx.validate()?;
//!
//! let mut devfile = ctx.parse_devfile()?;
//! devfile.add_volume_mounts("runtime", &[VolumeMount::new("cache", "/tmp/cache")])?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod model;
pub mod parser;
pub mod reference;
pub mod schema;
pub mod volumes;

#[cfg(test)]
mod fixtures;

pub use context::{ClusterClient, ClusterContext, DevfileCtx};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use fs::{DefaultFs, Filesystem};
pub use model::{Component, Container, Devfile, VolumeMount};
pub use parser::{DevfileObj, ParserOptions, parse, parse_with_options};
pub use reference::ReferenceSet;
pub use schema::JsonSchema;

/// Suffix that marks a path or url as naming a devfile directly.
pub const DEVFILE_SUFFIX: &str = ".yaml";

/// Well-known devfile filename, probed first in a directory.
pub const DEVFILE_NAME: &str = "devfile.yaml";

/// Hidden devfile filename, probed when `devfile.yaml` is absent.
pub const HIDDEN_DEVFILE_NAME: &str = ".devfile.yaml";
