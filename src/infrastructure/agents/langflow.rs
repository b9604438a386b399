#[cfg(test)]
#[path = "langflow_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Agent;
use crate::domain::models::AgentPrompt;

pub const ORG_HEADER: &str = "X-DataStax-Current-Org";

/// A flow hosted on Langflow, called through its `/api/v1/run/<flow>`
/// endpoint.
pub struct Langflow {
    client: reqwest::Client,
    url: String,
    org_id: String,
    token: String,
}

impl Default for Langflow {
    fn default() -> Langflow {
        return Langflow::new(
            &Config::get(ConfigKey::AgentURL),
            &Config::get(ConfigKey::OrgID),
            &Config::get(ConfigKey::Token),
        );
    }
}

impl Langflow {
    pub fn new(url: &str, org_id: &str, token: &str) -> Langflow {
        return Langflow {
            client: reqwest::Client::new(),
            url: url.to_string(),
            org_id: org_id.to_string(),
            token: token.to_string(),
        };
    }
}

#[async_trait]
impl Agent for Langflow {
    fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Agent URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Langflow token is not defined. Set MACENTO_TOKEN or `token` in the config file");
        }
        if self.org_id.is_empty() {
            bail!(
                "Organization ID is not defined. Set MACENTO_ORG_ID or `org-id` in the config file"
            );
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn run(&self, prompt: AgentPrompt) -> Result<Value> {
        let req = prompt.to_run_request();
        tracing::debug!(body = ?req, "Run request");

        let res = self
            .client
            .post(&self.url)
            .header(ORG_HEADER, &self.org_id)
            .bearer_auth(&self.token)
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Failed to make run request to Langflow"
            );
            bail!(format!(
                "Failed to make run request to Langflow. Status: {}",
                status.as_u16()
            ));
        }

        let data = res.json::<Value>().await?;
        tracing::debug!(body = ?data, "Run response");

        return Ok(data);
    }
}
