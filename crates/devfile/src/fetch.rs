// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! In-memory download of remote devfiles.

use std::fmt::Debug;

use once_cell::sync::OnceCell;
use url::Url;

use crate::{Error, Result};

/// Downloads the full body behind a url.
pub trait Fetcher: Debug + Send + Sync {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// [`Fetcher`] that issues blocking HTTP GET requests.
///
/// The underlying client is only built on first use.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: OnceCell<reqwest::blocking::Client>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, certificates, user agent).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self {
            client: OnceCell::with_value(client),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let download_error = |error: reqwest::Error| Error::Download {
            url: url.to_string(),
            error: Box::new(error),
        };
        let client = self
            .client
            .get_or_try_init(|| reqwest::blocking::Client::builder().build())
            .map_err(download_error)?;

        tracing::trace!(%url, "downloading devfile");
        let response = client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(download_error)?;
        let body = response.bytes().map_err(download_error)?;
        Ok(body.to_vec())
    }
}
