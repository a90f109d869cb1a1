// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON fixture loading for requests, team directories and task lists.

use color_eyre::{Result, eyre::Context};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be read or parsed.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text: String = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "Read fixture");
    serde_json::from_str(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}
