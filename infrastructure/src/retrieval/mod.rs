//! Search index adapters
//!
//! Both indexes are reached over HTTP with the shared reqwest stack.
//! Scores are passed through untouched: cosine similarity from the
//! vector index, BM25 from the keyword index.

mod elasticsearch;
mod metadata;
mod pinecone;

pub use elasticsearch::ElasticsearchIndex;
pub use pinecone::PineconeIndex;

use jurisrag_application::IndexError;

fn map_transport_error(e: reqwest::Error) -> IndexError {
    if e.is_connect() || e.is_timeout() {
        IndexError::ConnectionError(e.to_string())
    } else {
        IndexError::RequestFailed(e.to_string())
    }
}

fn http_client() -> Result<reqwest::Client, IndexError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| IndexError::ConnectionError(format!("Failed to create HTTP client: {}", e)))
}

async fn read_body(response: reqwest::Response) -> Result<String, IndexError> {
    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(IndexError::RequestFailed(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.trim()
        )));
    }
    Ok(body)
}
