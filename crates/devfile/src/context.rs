// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Resolution of a devfile location into loaded, version-checked content.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use crate::fetch::{Fetcher, HttpFetcher};
use crate::fs::{DefaultFs, Filesystem, expand_home};
use crate::model::Devfile;
use crate::reference::ReferenceSet;
use crate::schema::{self, JsonSchema};
use crate::{DEVFILE_NAME, DEVFILE_SUFFIX, Error, HIDDEN_DEVFILE_NAME, Result};

#[cfg(test)]
#[path = "./context_test.rs"]
mod context_test;

/// Request context handed through to cluster clients, never inspected here.
pub type ClusterContext = Arc<dyn Any + Send + Sync>;

/// Cluster client handle, stored and returned but never used here.
pub type ClusterClient = Arc<dyn Any + Send + Sync>;

/// Everything known about one devfile while it is being resolved.
///
/// A context is bound to a path, a url or raw content when it is created and
/// is then filled in by one of the `populate*` methods. Contexts created while
/// resolving imports should come from [`DevfileCtx::child`] so that they share
/// the parent's [`ReferenceSet`] and session configuration.
#[derive(Clone)]
pub struct DevfileCtx {
    /// Api version used to select the schema, `<major>.<minor>.0`.
    api_version: String,

    /// The literal `schemaVersion` of the content.
    schema_version: String,

    abs_path: Option<PathBuf>,
    rel_path: PathBuf,
    url: Option<String>,

    raw_content: Vec<u8>,
    json_schema: Option<JsonSchema>,

    fs: Arc<dyn Filesystem>,
    fetcher: Arc<dyn Fetcher>,

    references: ReferenceSet,
    registry_urls: Vec<String>,
    default_namespace: Option<String>,
    cluster_context: Option<ClusterContext>,
    cluster_client: Option<ClusterClient>,
}

impl DevfileCtx {
    fn empty() -> Self {
        Self {
            api_version: String::new(),
            schema_version: String::new(),
            abs_path: None,
            rel_path: PathBuf::new(),
            url: None,
            raw_content: Vec::new(),
            json_schema: None,
            fs: Arc::new(DefaultFs),
            fetcher: Arc::new(HttpFetcher::new()),
            references: ReferenceSet::new(),
            registry_urls: Vec::new(),
            default_namespace: None,
            cluster_context: None,
            cluster_client: None,
        }
    }

    /// Context for a devfile on disk, or a directory containing one.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            rel_path: path.into(),
            ..Self::empty()
        }
    }

    /// Context for a remote devfile, or a remote directory containing one.
    pub fn from_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::empty()
        }
    }

    /// Context for content the caller already holds.
    pub fn from_raw<B: Into<Vec<u8>>>(content: B) -> Self {
        Self {
            raw_content: content.into(),
            ..Self::empty()
        }
    }

    /// Build the context for a devfile referenced from this one.
    ///
    /// Absolute `http(s)` urls are used as-is. Anything else is resolved
    /// relative to this devfile: against its url when it was loaded from one,
    /// otherwise against the directory holding it (or the current directory
    /// for raw content). The child shares this context's reference set and
    /// session configuration.
    pub fn child(&self, location: &str) -> Result<Self> {
        let mut child = match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::from_url(url.as_str()),
            _ => match &self.url {
                Some(base) => {
                    let base = parse_url(base)?;
                    let joined = base.join(location).map_err(|error| Error::InvalidUrl {
                        url: location.to_string(),
                        error,
                    })?;
                    Self::from_url(joined.as_str())
                }
                None => Self::new(self.child_path(location)),
            },
        };
        child.fs = Arc::clone(&self.fs);
        child.fetcher = Arc::clone(&self.fetcher);
        child.references = self.references.clone();
        child.registry_urls = self.registry_urls.clone();
        child.default_namespace = self.default_namespace.clone();
        child.cluster_context = self.cluster_context.clone();
        child.cluster_client = self.cluster_client.clone();
        Ok(child)
    }

    fn child_path(&self, location: &str) -> PathBuf {
        let location = Path::new(location);
        if location.is_absolute() || location.starts_with("~") {
            return location.to_owned();
        }
        match self.abs_path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => dir.join(location),
            None => location.to_owned(),
        }
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Join an existing resolution session.
    pub fn with_references(mut self, references: ReferenceSet) -> Self {
        self.references = references;
        self
    }

    pub fn with_registry_urls(mut self, registry_urls: Vec<String>) -> Self {
        self.registry_urls = registry_urls;
        self
    }

    pub fn with_default_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    pub fn with_cluster_context(mut self, cluster_context: ClusterContext) -> Self {
        self.cluster_context = Some(cluster_context);
        self
    }

    pub fn with_cluster_client(mut self, cluster_client: ClusterClient) -> Self {
        self.cluster_client = Some(cluster_client);
        self
    }

    /// Resolve whichever source this context was created for.
    pub fn resolve(&mut self) -> Result<()> {
        if self.url.is_some() {
            self.populate_from_url()
        } else if !self.rel_path.as_os_str().is_empty() {
            self.populate()
        } else {
            self.populate_from_raw()
        }
    }

    /// Locate, load and version-check a devfile from the filesystem.
    pub fn populate(&mut self) -> Result<()> {
        if !has_devfile_suffix(&self.rel_path.to_string_lossy()) {
            self.rel_path = self.probe_directory()?;
        }
        self.set_abs_path()?;
        let abs_path = self.abs_path.as_ref().ok_or(Error::NotPopulated)?;
        tracing::debug!(path = %abs_path.display(), "absolute devfile path");

        self.references.visit(&abs_path.to_string_lossy())?;
        self.load_content()?;
        self.populate_devfile()
    }

    /// Locate, download and version-check a devfile from a url.
    pub fn populate_from_url(&mut self) -> Result<()> {
        let original = self.url.clone().ok_or(Error::NotPopulated)?;
        let mut url = parse_url(&original)?;
        if !has_devfile_suffix(&original) {
            url = self.probe_url(&original, url)?;
        }
        let canonical = url.to_string();
        self.references.visit(&canonical)?;
        self.url = Some(canonical);
        self.load_content()?;
        self.populate_devfile()
    }

    /// Version-check content supplied by the caller.
    ///
    /// Raw content has no location, so it is not recorded in the reference
    /// set.
    pub fn populate_from_raw(&mut self) -> Result<()> {
        if self.raw_content.is_empty() {
            return Err(Error::NotPopulated);
        }
        self.populate_devfile()
    }

    /// Validate the loaded content against the schema for its version.
    pub fn validate(&self) -> Result<()> {
        let schema = self.json_schema.as_ref().ok_or(Error::NotPopulated)?;
        schema::validate(&self.raw_content, schema)
    }

    /// Decode the loaded content into the data model.
    pub fn parse_devfile(&self) -> Result<Devfile> {
        if self.raw_content.is_empty() {
            return Err(Error::NotPopulated);
        }
        Devfile::from_yaml(&self.raw_content)
    }

    fn probe_directory(&self) -> Result<PathBuf> {
        let dir = expand_home(&self.rel_path)
            .map_err(|_| Error::PathResolution(self.rel_path.display().to_string()))?;
        for name in [DEVFILE_NAME, HIDDEN_DEVFILE_NAME] {
            let candidate = dir.join(name);
            if self.fs.exists(&candidate) {
                tracing::debug!(path = %candidate.display(), "found devfile in directory");
                return Ok(candidate);
            }
        }
        Err(Error::PathResolution(self.rel_path.display().to_string()))
    }

    fn probe_url(&self, original: &str, base: Url) -> Result<Url> {
        let mut candidate = base;
        candidate
            .path_segments_mut()
            .map_err(|_| Error::CannotBeABase(original.to_string()))?
            .pop_if_empty()
            .push(DEVFILE_NAME);
        if self.fetcher.fetch(&candidate).is_ok() {
            return Ok(candidate);
        }
        tracing::debug!(url = %candidate, "no devfile at url, trying hidden devfile");

        candidate
            .path_segments_mut()
            .map_err(|_| Error::CannotBeABase(original.to_string()))?
            .pop()
            .push(HIDDEN_DEVFILE_NAME);
        if self.fetcher.fetch(&candidate).is_ok() {
            return Ok(candidate);
        }
        Err(Error::PathResolution(original.to_string()))
    }

    fn load_content(&mut self) -> Result<()> {
        let content = match (&self.url, &self.abs_path) {
            (Some(url), _) => self.fetcher.fetch(&parse_url(url)?)?,
            (None, Some(path)) => self.fs.read(path).map_err(|error| Error::ReadFailed {
                path: path.clone(),
                error,
            })?,
            (None, None) => return Err(Error::NotPopulated),
        };
        tracing::trace!(bytes = content.len(), "loaded devfile content");
        self.raw_content = content;
        Ok(())
    }

    fn populate_devfile(&mut self) -> Result<()> {
        let schema_version = schema::detect_schema_version(&self.raw_content, &self.source_name())?;
        let api_version = schema::api_version(&schema_version)?;
        let json_schema = schema::schema_for(&api_version)?;
        tracing::debug!(%schema_version, %api_version, "selected devfile schema");

        self.schema_version = schema_version;
        self.api_version = api_version;
        self.json_schema = Some(json_schema);
        Ok(())
    }

    /// Human readable name of where the content came from.
    pub fn source_name(&self) -> String {
        match (&self.url, &self.abs_path) {
            (Some(url), _) => url.clone(),
            (None, Some(path)) => path.display().to_string(),
            (None, None) if !self.rel_path.as_os_str().is_empty() => {
                self.rel_path.display().to_string()
            }
            (None, None) => "<raw content>".to_string(),
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Absolute path of the devfile, once resolved from the filesystem.
    pub fn abs_path(&self) -> Option<&Path> {
        self.abs_path.as_deref()
    }

    /// Compute the absolute path from the (possibly probed) relative path.
    pub fn set_abs_path(&mut self) -> Result<()> {
        let abs_path = self.fs.absolute(&self.rel_path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                Error::PathResolution(self.rel_path.display().to_string())
            } else {
                Error::ReadFailed {
                    path: self.rel_path.clone(),
                    error,
                }
            }
        })?;
        self.abs_path = Some(abs_path);
        Ok(())
    }

    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    /// Url of the devfile; the resolved file url once populated.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn raw_content(&self) -> &[u8] {
        &self.raw_content
    }

    /// Replace the content, e.g. before calling [`DevfileCtx::populate_from_raw`].
    pub fn set_raw_content<B: Into<Vec<u8>>>(&mut self, content: B) {
        self.raw_content = content.into();
    }

    pub fn json_schema(&self) -> Option<&JsonSchema> {
        self.json_schema.as_ref()
    }

    pub fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.fs
    }

    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn set_references(&mut self, references: ReferenceSet) {
        self.references = references;
    }

    pub fn registry_urls(&self) -> &[String] {
        &self.registry_urls
    }

    pub fn set_registry_urls(&mut self, registry_urls: Vec<String>) {
        self.registry_urls = registry_urls;
    }

    /// Namespace used to resolve cluster-hosted imports.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    pub fn set_default_namespace<S: Into<String>>(&mut self, namespace: S) {
        self.default_namespace = Some(namespace.into());
    }

    pub fn cluster_context(&self) -> Option<&ClusterContext> {
        self.cluster_context.as_ref()
    }

    pub fn set_cluster_context(&mut self, cluster_context: ClusterContext) {
        self.cluster_context = Some(cluster_context);
    }

    pub fn cluster_client(&self) -> Option<&ClusterClient> {
        self.cluster_client.as_ref()
    }

    pub fn set_cluster_client(&mut self, cluster_client: ClusterClient) {
        self.cluster_client = Some(cluster_client);
    }
}

impl fmt::Debug for DevfileCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DevfileCtx")
            .field("api_version", &self.api_version)
            .field("schema_version", &self.schema_version)
            .field("abs_path", &self.abs_path)
            .field("rel_path", &self.rel_path)
            .field("url", &self.url)
            .field("raw_content_len", &self.raw_content.len())
            .field("json_schema", &self.json_schema)
            .field("fs", &self.fs)
            .field("fetcher", &self.fetcher)
            .field("references", &self.references)
            .field("registry_urls", &self.registry_urls)
            .field("default_namespace", &self.default_namespace)
            .field("has_cluster_context", &self.cluster_context.is_some())
            .field("has_cluster_client", &self.cluster_client.is_some())
            .finish()
    }
}

fn has_devfile_suffix(location: &str) -> bool {
    location.ends_with(DEVFILE_SUFFIX)
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|error| Error::InvalidUrl {
        url: url.to_string(),
        error,
    })
}
