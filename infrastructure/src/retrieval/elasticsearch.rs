//! Elasticsearch-compatible keyword index

use super::{http_client, map_transport_error, metadata, read_body};
use async_trait::async_trait;
use jurisrag_application::{IndexError, KeywordIndex};
use jurisrag_domain::{EvidenceSource, RetrievedDocument};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Map<String, Value>,
}

pub struct ElasticsearchIndex {
    http: reqwest::Client,
    url: String,
    index: String,
}

impl ElasticsearchIndex {
    pub fn new(url: &str, index: impl Into<String>) -> Result<Self, IndexError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(IndexError::NotConfigured("keyword index url".to_string()));
        }
        Ok(Self {
            http: http_client()?,
            url: url.to_string(),
            index: index.into(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.url, self.index)
    }
}

/// Free-text search over the chunk text. `simple_query_string` never
/// fails on stray operator characters in the question.
fn search_body(query: &str, top_k: usize) -> Value {
    json!({
        "size": top_k,
        "query": {
            "simple_query_string": {
                "query": query,
                "fields": ["text"],
                "default_operator": "or"
            }
        }
    })
}

fn parse_hits(body: &str) -> Result<Vec<RetrievedDocument>, IndexError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| IndexError::InvalidResponse(format!("keyword search: {}", e)))?;
    Ok(response
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            RetrievedDocument::new(
                hit.id,
                EvidenceSource::Keyword,
                hit.score.unwrap_or_default(),
                metadata::text(&hit.source),
            )
            .with_metadata(metadata::document_metadata(&hit.source))
        })
        .collect())
}

#[async_trait]
impl KeywordIndex for ElasticsearchIndex {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>, IndexError> {
        debug!(index = %self.index, top_k, "Keyword search");

        let response = self
            .http
            .post(self.search_url())
            .json(&search_body(query, top_k))
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_hits(&read_body(response).await?)
    }
}
