//! Structured error types for the Placard composer.
//!
//! Three variants cover the real error sources: job JSON parsing, missing
//! job preconditions, and photo decoding. Partial entity data is never an
//! error — it degrades to "N/A" or a placeholder at the render boundary.

use thiserror::Error;

/// The unified error type returned by all public Placard API functions.
#[derive(Debug, Error)]
pub enum PlacardError {
    /// JSON input failed to parse as a valid print job.
    #[error("failed to parse print job: {source}\n  hint: {hint}")]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The job is missing an input the composer cannot proceed without
    /// (template, user list, or role). The caller should send the user
    /// back to the page that assembles the job.
    #[error("print job precondition failed: {0}")]
    Precondition(String),

    /// A photo source could not be read or decoded.
    #[error("photo error: {0}")]
    Photo(String),

    /// The print backend rejected the composed sheet.
    #[error("print error: {0}")]
    Print(String),
}

impl From<serde_json::Error> for PlacardError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the print job schema. Check field names and types."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => "I/O failure while reading the input.".to_string(),
        };
        PlacardError::Parse { source: e, hint }
    }
}
