pub type Result<T> = std::result::Result<T, Error>;

/// Fatal ingestion failures. Everything below the document level
/// (unrecognized elements, bad shapes, odd colors) degrades per node
/// instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed document: {0}")]
    Xml(#[from] roxmltree::Error),
}
