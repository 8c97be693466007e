use std::time::Duration;

use jira_core::{HttpRequest, HttpResponse, JiraError, Method, Result, Transport};
use ureq::{Agent, RequestBuilder};

/// Blocking transport backed by a `ureq` agent
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// A zero timeout disables the global timeout
    pub fn new(timeout: Duration) -> Self {
        let timeout = (!timeout.is_zero()).then_some(timeout);
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            // Statuses are mapped by the executor, not by ureq
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let response = match request.method {
            Method::Get => decorate(self.agent.get(&request.url), request).call(),
            Method::Delete => decorate(self.agent.delete(&request.url), request).call(),
            Method::Post => {
                let builder = decorate(self.agent.post(&request.url), request);
                match &request.body {
                    Some(body) => builder.send_json(body),
                    None => builder.send_empty(),
                }
            }
            Method::Put => {
                let builder = decorate(self.agent.put(&request.url), request);
                match &request.body {
                    Some(body) => builder.send_json(body),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = response.map_err(http_error)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(http_error)?;

        Ok(HttpResponse::new(status, body))
    }
}

fn decorate<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

fn http_error(err: ureq::Error) -> JiraError {
    JiraError::Http(err.to_string())
}
