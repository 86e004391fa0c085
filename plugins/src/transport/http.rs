use async_trait::async_trait;
use browseract_core::api::{
    ApiRequest, HttpMethod, Transport, TransportError, TransportErrorKind,
};
use serde_json::Value;

fn from_reqwest(err: reqwest::Error, url: String) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_request() {
        TransportErrorKind::Request
    } else if err.is_body() {
        TransportErrorKind::Body
    } else if err.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Unknown
    };
    let mut out = TransportError::new(kind, err.to_string()).with_url(url);
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out.with_source(err)
}

async fn parse_json_response(resp: reqwest::Response) -> Result<Value, TransportError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        return Err(TransportError::status_error(status.as_u16(), url, &body));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str::<Value>(&body)
        .map_err(|err| TransportError::decode_error(status.as_u16(), url, err, &body))
}

/// Authenticated transport for the task API: resolves endpoints against the
/// base URL and sends `Authorization: Bearer <api key>` on every request.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: String, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let url = self.url(&request.endpoint);
        tracing::debug!(
            target: "browseract.http",
            stage = "http.request.in",
            method = %request.method,
            url = %url,
            query = request.query.len()
        );
        let mut req = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let v = parse_json_response(resp).await?;
        tracing::debug!(
            target: "browseract.http",
            stage = "http.request.out",
            url = %url,
            status = %status
        );
        Ok(v)
    }
}
