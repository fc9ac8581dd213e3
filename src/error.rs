use thiserror::Error;

/// Errors produced by the generation core.
///
/// Body-level JSON parse failures are not represented here: the extractor logs
/// and skips the offending body without aborting the batch. Document-level
/// failures (unreadable spec files, bad config) are reported with `anyhow`
/// context by the parser and config layers.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested target language has no generator. Raised when the language
    /// identifier is resolved, before any generation starts.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A generator could not render one object. Aborts an in-flight archive.
    #[error("failed to generate {type_name}: {reason}")]
    Generation { type_name: String, reason: String },
}

impl Error {
    pub(crate) fn generation(type_name: &str, reason: impl Into<String>) -> Self {
        Error::Generation {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}
