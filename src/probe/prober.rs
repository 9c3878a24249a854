use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::config::Config;
use crate::core::types::{DropReason, ProbeOutcome, ProbeResult, ProbeTarget};
use crate::probe::analyzer;

/// One probe of one target. Implementations are shared by every task of a
/// run and must be safe to call concurrently.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome;
}

/// Request settings applied to every probe of a run.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub method: String,
    pub user_agent: String,
    pub max_body_bytes: u64,
}

impl ProbeSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            method: config.method().to_string(),
            user_agent: config.user_agent().to_string(),
            max_body_bytes: config.max_body_bytes(),
        }
    }
}

/// Probes targets over HTTP with a shared client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    settings: ProbeSettings,
}

impl HttpProber {
    pub fn new(client: reqwest::Client, settings: ProbeSettings) -> Self {
        Self { client, settings }
    }

    fn build_request(&self, target: &ProbeTarget) -> Result<reqwest::Request, DropReason> {
        let method = Method::from_bytes(self.settings.method.as_bytes())
            .map_err(|_| DropReason::InvalidMethod(self.settings.method.clone()))?;

        self.client
            .request(method, target.url().clone())
            .header(USER_AGENT, &self.settings.user_agent)
            .build()
            .map_err(DropReason::InvalidRequest)
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        let request = match self.build_request(target) {
            Ok(request) => request,
            Err(reason) => return ProbeOutcome::Dropped(reason),
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => return ProbeOutcome::Dropped(DropReason::Transport(err)),
        };

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .map(|value| value.split_whitespace().collect::<String>())
            .unwrap_or_default();

        let analysis = analyzer::analyze(response, self.settings.max_body_bytes).await;
        debug!(
            "{target} -> {status_code} ({} chars, {} words)",
            analysis.adjusted_size, analysis.word_count
        );

        ProbeOutcome::Analyzed(ProbeResult {
            url: target.to_string(),
            status_code,
            adjusted_size: analysis.adjusted_size,
            word_count: analysis.word_count,
            content_type,
        })
    }
}
