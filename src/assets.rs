//! Asset URL normalization.
//!
//! Stored asset paths come in every historical flavor: absolute URLs,
//! storage-relative paths, and paths written with Windows separators by an
//! upload handler long gone. The resolver turns all of them into one
//! absolute, fetchable URL against an injected base — never a module-level
//! constant, so tests run without network assumptions.

/// Resolves storage paths against a configured base URL.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    base_url: String,
}

impl AssetResolver {
    /// A trailing slash on the base is dropped so joining always inserts
    /// exactly one separator.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        AssetResolver { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Normalize a stored path into an absolute URL.
    ///
    /// Empty stays empty, protocol-prefixed passes through unchanged,
    /// anything else gets backslashes flipped and the base prefixed.
    /// Idempotent for any absolute base URL: a second pass hits the
    /// protocol passthrough.
    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http") {
            return path.to_string();
        }
        let normalized = path.replace('\\', "/");
        if normalized.starts_with('/') {
            format!("{}{}", self.base_url, normalized)
        } else {
            format!("{}/{}", self.base_url, normalized)
        }
    }
}
