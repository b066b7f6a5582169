// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for unit tests.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;

use url::Url;

use crate::fetch::Fetcher;
use crate::{Error, Result};

pub const MINIMAL_DEVFILE: &str = r#"
schemaVersion: 2.2.0
metadata:
  name: minimal
components:
  - name: runtime
    container:
      image: quay.io/example/runtime:latest
      volumeMounts:
        - name: cache
          path: /tmp/cache
"#;

/// Serves devfiles from memory and records every requested url.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    files: BTreeMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn with_file(mut self, url: &str, content: &str) -> Self {
        self.files.insert(url.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.files
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Error::Download {
                url: url.to_string(),
                error: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "404 Not Found",
                )),
            })
    }
}

pub fn write_devfile(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("Failed to write devfile");
}

/// Points `HOME` at another directory until dropped.
///
/// Tests using this must be `#[serial]`.
pub struct HomeGuard {
    previous: Option<OsString>,
}

impl HomeGuard {
    pub fn set(dir: &Path) -> Self {
        let previous = std::env::var_os("HOME");
        // SAFETY: every test that reads or writes HOME runs serially
        unsafe { std::env::set_var("HOME", dir) };
        Self { previous }
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: see HomeGuard::set
        match self.previous.take() {
            Some(home) => unsafe { std::env::set_var("HOME", home) },
            None => unsafe { std::env::remove_var("HOME") },
        }
    }
}
