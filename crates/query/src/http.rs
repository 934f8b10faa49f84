use futures::future::BoxFuture;
use snafu::ResultExt;

use crate::client::QueryClient;
use crate::error::{
    BuildClientSnafu, DecodeBodySnafu, QueryResult, StatusSnafu, TransportSnafu,
};
use crate::wire::{QueryRequest, QueryResponse};

/// Address of the clinical query service.
pub const QUERY_ENDPOINT: &str = "http://127.0.0.1:5000/query";

/// JSON-over-HTTP query client.
///
/// No retries and no timeout beyond reqwest's defaults: one POST per call.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpQueryClient {
    pub fn new() -> QueryResult<Self> {
        Self::with_endpoint(QUERY_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> QueryResult<Self> {
        let http = reqwest::Client::builder().build().context(BuildClientSnafu {
            stage: "build-http-client",
        })?;

        Ok(Self {
            http,
            endpoint: endpoint.into().trim().to_string(),
        })
    }

    async fn post_query(&self, request: QueryRequest) -> QueryResult<String> {
        let response = self
            .http
            .post(self.endpoint.as_str())
            .json(&request)
            .send()
            .await
            .context(TransportSnafu {
                stage: "send-query",
            })?;

        let status = response.status();
        let payload = response.text().await.context(TransportSnafu {
            stage: "read-query-response",
        })?;

        if !status.is_success() {
            return StatusSnafu {
                stage: "query-http-status",
                status: status.as_u16(),
                body: payload,
            }
            .fail();
        }

        tracing::debug!(status = status.as_u16(), body = %payload, "query service responded");

        let decoded = serde_json::from_str::<QueryResponse>(&payload).context(DecodeBodySnafu {
            stage: "decode-query-response",
        })?;
        Ok(decoded.response)
    }
}

impl QueryClient for HttpQueryClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query<'a>(&'a self, request: QueryRequest) -> BoxFuture<'a, QueryResult<String>> {
        Box::pin(self.post_query(request))
    }
}
