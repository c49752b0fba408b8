//! Sequential dump of an ordered endpoint list
//!
//! Each endpoint is fetched only after the previous one has been fully
//! written to the sink, so the output mirrors the list order.

use log::{error, info, warn};
use std::io::Write;

use super::client::{FetchOutcome, GraphClient};
use super::constants::{self, Endpoint};
use super::error::FetchError;

/// What to do when a single endpoint fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Stop the run at the first failure
    #[default]
    Halt,
    /// Record the failure and move on to the next endpoint
    Continue,
}

#[derive(Debug)]
pub struct FetchedEndpoint {
    pub endpoint: Endpoint,
    pub url: String,
    pub outcome: FetchOutcome,
}

#[derive(Debug)]
pub struct FailedEndpoint {
    pub endpoint: Endpoint,
    pub url: String,
    pub error: FetchError,
}

#[derive(Debug, Default)]
pub struct DumpReport {
    pub fetched: Vec<FetchedEndpoint>,
    pub failed: Vec<FailedEndpoint>,
}

impl DumpReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.fetched.iter().map(|f| f.outcome.bytes).sum()
    }
}

pub struct Fetcher<'a> {
    client: &'a mut GraphClient,
    graph_host: String,
    on_error: OnError,
}

impl<'a> Fetcher<'a> {
    pub fn new(client: &'a mut GraphClient, graph_host: &str) -> Self {
        Self {
            client,
            graph_host: graph_host.to_string(),
            on_error: OnError::default(),
        }
    }

    pub fn on_error(mut self, policy: OnError) -> Self {
        self.on_error = policy;
        self
    }

    /// Fetch every endpoint in order, writing a separator line and then the raw
    /// body for each.
    ///
    /// Authentication and output failures always end the run. Request failures
    /// end it under [`OnError::Halt`] and are collected under
    /// [`OnError::Continue`].
    pub async fn dump<W: Write>(
        &mut self,
        endpoints: &[Endpoint],
        sink: &mut W,
    ) -> Result<DumpReport, FetchError> {
        let mut report = DumpReport::default();

        for endpoint in endpoints {
            let url = endpoint.url(&self.graph_host);
            info!("Fetching {} ({})", endpoint.name, url);

            sink.write_all(constants::separator(&url).as_bytes())?;

            match self.client.fetch_endpoint(&url, sink).await {
                Ok(outcome) => report.fetched.push(FetchedEndpoint {
                    endpoint: endpoint.clone(),
                    url,
                    outcome,
                }),
                Err(err) if err.is_fatal() || self.on_error == OnError::Halt => {
                    error!("Stopping at {}: {}", endpoint.name, err);
                    return Err(err);
                }
                Err(err) => {
                    warn!("Skipping {}: {}", endpoint.name, err);
                    report.failed.push(FailedEndpoint {
                        endpoint: endpoint.clone(),
                        url,
                        error: err,
                    });
                }
            }
        }

        info!(
            "Dumped {} endpoints ({} bytes), {} failed",
            report.fetched.len(),
            report.total_bytes(),
            report.failed.len()
        );
        Ok(report)
    }
}
