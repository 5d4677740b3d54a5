//! reqwest-based client for the Zephyr Scale / TM4J v2 REST API.

use super::models::{
    CreateTestCycleRequest, ErrorResponse, ExecutionRequest, PostResult, ResponseClass,
    StatusType, StatusesResponse, TcmStatus, TestCasesResponse, TestCycle,
};
use super::TcmApi;
use crate::core::RemoteTestCase;
use crate::errors::{TcmError, TcmResult};
use clap::ValueEnum;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CYCLE_STATUS_NAME: &str = "Done";
const USER_AGENT: &str = concat!("zephyr-sync/", env!("CARGO_PKG_VERSION"));

/// Which public TCM endpoint to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// Zephyr Scale Cloud
    #[default]
    Zephyr,
    /// Jira Test Management (Adaptavist TM4J)
    Tm4j,
}

impl ApiFlavor {
    pub fn base_url(self) -> &'static str {
        match self {
            ApiFlavor::Zephyr => "https://api.zephyrscale.smartbear.com/v2",
            ApiFlavor::Tm4j => "https://api.adaptavist.io/tm4j/v2",
        }
    }
}

/// Authenticated TCM client. Construct once per run and share by reference.
#[derive(Debug, Clone)]
pub struct ZephyrClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl ZephyrClient {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> TcmResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TcmError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(base_url, token, http_client))
    }

    /// Create a client around a pre-built `reqwest::Client` (for testing).
    pub fn with_http_client(base_url: &str, token: impl Into<String>, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TcmResult<T> {
        let url = self.url(path);
        log::debug!("GET {} {:?}", url, query);
        let response = self
            .http_client
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| TcmError::transport(&url, &e))?;
        let response = check_response("GET", &url, response).await?;
        response.json::<T>().await.map_err(|e| TcmError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

/// Logs the exchange and turns a non-2xx response into [`TcmError::Api`]
/// carrying the decoded error body.
async fn check_response(method: &str, url: &str, response: Response) -> TcmResult<Response> {
    let status = response.status().as_u16();
    log::info!("Handling [{}] to [{}] [{}]", method, url, status);

    match ResponseClass::from_status(status) {
        ResponseClass::Success => Ok(response),
        ResponseClass::ClientError | ResponseClass::ServerError => {
            let body = read_error_body(response).await;
            log::error!(
                "[{}] {} failed with {}: {}",
                method,
                url,
                status,
                body.as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<empty body>".to_string())
            );
            Err(TcmError::api(status, body))
        }
        ResponseClass::Unexpected => {
            let body = read_error_body(response).await;
            log::info!("Status is UNKNOWN: [{:?}]", body);
            Err(TcmError::api(status, body))
        }
    }
}

async fn read_error_body(response: Response) -> Option<ErrorResponse> {
    match response.text().await {
        Ok(text) => ErrorResponse::from_body(&text),
        Err(e) => Some(ErrorResponse {
            error_code: None,
            message: Some(format!("unreadable body: {e}")),
        }),
    }
}

impl TcmApi for ZephyrClient {
    async fn fetch_test_cases(
        &self,
        project_key: &str,
        max_results: u32,
    ) -> TcmResult<Vec<RemoteTestCase>> {
        log::info!("Getting cases from TSM. Limit is {}", max_results);
        let query = [
            ("maxResults", max_results.to_string()),
            ("projectKey", project_key.to_string()),
        ];
        let page: TestCasesResponse = self.get_json("testcases", &query).await?;
        log::info!(
            "Received MaxResult:{:?} | Total:{:?} | Last: {:?}",
            page.max_results,
            page.total,
            page.is_last
        );
        if page.is_last == Some(false) {
            log::warn!(
                "Case list is truncated at {} entries; raise max_case_results to see the rest",
                page.values.len()
            );
        }
        Ok(page.values)
    }

    async fn fetch_statuses(
        &self,
        project_key: &str,
        status_type: StatusType,
        max_results: u32,
    ) -> TcmResult<Vec<TcmStatus>> {
        log::info!("Getting statuses from TSM");
        let query = [
            ("maxResults", max_results.to_string()),
            ("projectKey", project_key.to_string()),
            ("statusType", status_type.as_query().to_string()),
        ];
        let page: StatusesResponse = self.get_json("statuses", &query).await?;
        Ok(page.values)
    }

    async fn create_test_cycle(
        &self,
        project_key: &str,
        name: &str,
        description: &str,
    ) -> TcmResult<TestCycle> {
        let url = self.url("testcycles");
        let body = CreateTestCycleRequest {
            project_key,
            name,
            description,
            status_name: CYCLE_STATUS_NAME,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| TcmError::transport(&url, &e))?;
        let response = check_response("POST", &url, response).await?;
        response.json::<TestCycle>().await.map_err(|e| TcmError::Decode {
            url,
            message: e.to_string(),
        })
    }

    async fn post_execution(&self, request: &ExecutionRequest) -> PostResult {
        let url = self.url("testexecutions");
        let sent = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await;

        let result = match sent {
            Ok(response) => {
                let status = response.status().as_u16();
                let class = ResponseClass::from_status(status);
                let error = if class == ResponseClass::Success {
                    None
                } else {
                    read_error_body(response).await
                };
                PostResult {
                    request: request.clone(),
                    class,
                    status: Some(status),
                    error,
                }
            }
            Err(e) => PostResult {
                request: request.clone(),
                class: ResponseClass::ServerError,
                status: None,
                error: Some(ErrorResponse {
                    error_code: None,
                    message: Some(e.to_string()),
                }),
            },
        };

        log::info!(
            "Report posted status <{}>. Code {}: {} <{}>. Error: {}",
            result.posted(),
            result
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
            request.test_case_key,
            request.status_name,
            result
                .error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "none".to_string())
        );
        result
    }

    async fn update_test_case(&self, case: &RemoteTestCase) -> TcmResult<()> {
        log::info!("Will update [{}]", case.key);
        if log::log_enabled!(log::Level::Debug) {
            if let Ok(body) = serde_json::to_string(case) {
                log::debug!("{}", body);
            }
        }
        let url = self.url(&format!("testcases/{}", case.key));
        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.token)
            .json(case)
            .send()
            .await
            .map_err(|e| TcmError::transport(&url, &e))?;
        check_response("PUT", &url, response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ZephyrClient::with_http_client("http://localhost:8080/v2/", "t", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080/v2");
        assert_eq!(client.url("/testcases"), "http://localhost:8080/v2/testcases");
    }

    #[test]
    fn test_flavor_endpoints() {
        assert!(ApiFlavor::Zephyr.base_url().contains("zephyrscale"));
        assert!(ApiFlavor::Tm4j.base_url().contains("adaptavist"));
        assert_eq!(ApiFlavor::default(), ApiFlavor::Zephyr);
    }
}
