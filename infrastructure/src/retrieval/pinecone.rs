//! Pinecone-compatible vector index over its data-plane REST API

use super::{http_client, map_transport_error, metadata, read_body};
use async_trait::async_trait;
use jurisrag_application::{IndexError, VectorIndex};
use jurisrag_domain::{EvidenceSource, RetrievedDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    metadata: Map<String, Value>,
}

pub struct PineconeIndex {
    http: reqwest::Client,
    host: String,
    api_key: String,
    namespace: String,
}

impl PineconeIndex {
    /// `host` is the index's data-plane URL.
    pub fn new(host: &str, api_key: impl Into<String>) -> Result<Self, IndexError> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(IndexError::NotConfigured("vector index host".to_string()));
        }
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        Ok(Self {
            http: http_client()?,
            host,
            api_key: api_key.into(),
            namespace: String::new(),
        })
    }

    /// Read the API key from `key_env`.
    pub fn from_env(host: &str, key_env: &str) -> Result<Self, IndexError> {
        let api_key = std::env::var(key_env)
            .map_err(|_| IndexError::NotConfigured(format!("{} is not set", key_env)))?;
        Self::new(host, api_key)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

fn parse_matches(body: &str) -> Result<Vec<RetrievedDocument>, IndexError> {
    let response: QueryResponse = serde_json::from_str(body)
        .map_err(|e| IndexError::InvalidResponse(format!("vector query: {}", e)))?;
    Ok(response
        .matches
        .into_iter()
        .map(|m| {
            RetrievedDocument::new(
                m.id,
                EvidenceSource::Vector,
                m.score,
                metadata::text(&m.metadata),
            )
            .with_metadata(metadata::document_metadata(&m.metadata))
        })
        .collect())
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, IndexError> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: (!self.namespace.is_empty()).then_some(self.namespace.as_str()),
        };
        debug!(host = %self.host, top_k, dims = vector.len(), "Vector query");

        let response = self
            .http
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_matches(&read_body(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = QueryRequest {
            vector: &[0.5, 0.25],
            top_k: 5,
            include_metadata: true,
            namespace: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topK"], 5);
        assert_eq!(json["includeMetadata"], true);
        assert!(json.get("namespace").is_none());
    }

    #[test]
    fn test_parse_matches() {
        let body = r#"{
            "matches": [
                {"id": "v1", "score": 0.91, "metadata": {"text": "breach of contract", "case_id": "c1"}},
                {"id": "v2", "score": 0.80}
            ],
            "namespace": ""
        }"#;
        let docs = parse_matches(body).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "v1");
        assert_eq!(docs[0].source, EvidenceSource::Vector);
        assert_eq!(docs[0].score, 0.91);
        assert_eq!(docs[0].text, "breach of contract");
        assert_eq!(docs[0].metadata.case_id.as_deref(), Some("c1"));
        assert_eq!(docs[1].text, "");
    }

    #[test]
    fn test_parse_invalid_body() {
        assert!(matches!(
            parse_matches("{\"matches\": 3}"),
            Err(IndexError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_host_normalization() {
        let index = PineconeIndex::new("legal-abc.svc.pinecone.io/", "k").unwrap();
        assert_eq!(index.host(), "https://legal-abc.svc.pinecone.io");
        assert!(matches!(
            PineconeIndex::new("  ", "k"),
            Err(IndexError::NotConfigured(_))
        ));
    }
}
