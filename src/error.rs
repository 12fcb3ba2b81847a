use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort an analysis run.
///
/// Parse anomalies (a line without a colon, a reply without a protein field)
/// are deliberately *not* errors — they degrade into `"N/A"` sentinels in the
/// parsers and reduced totals in the aggregator.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The selected image could not be read from disk.
    #[error("failed to read image {}: {}", .path.display(), .source)]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote endpoint answered with a non-success HTTP status.
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not contain the expected content field.
    #[error("model reply missing expected content")]
    MalformedReply,

    /// Connection-level failure talking to the endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
