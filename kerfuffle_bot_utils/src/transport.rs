use serde_json::{Map, Value};
use tracing::trace;

use crate::{ClientConfig, SessionError};

/// Issues one request to the game server.
///
/// Connection faults are returned as [`SessionError::ConnectionFailure`] and
/// never retried here; each caller applies its own retry policy.
pub trait Transport {
    /// Sends a `POST` with a JSON body if `body` is given, a `GET` otherwise,
    /// and returns the status code together with the decoded response body.
    ///
    /// An empty body decodes to an empty JSON object.
    fn request(
        &mut self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(u16, Value), SessionError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn request(
        &mut self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(u16, Value), SessionError> {
        (**self).request(path, token, body)
    }
}

/// Blocking HTTP transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    netloc: String,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            netloc: format!("{}:{}", host, port),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.host, config.port)
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.netloc, path)
    }
}

impl Transport for HttpTransport {
    fn request(
        &mut self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(u16, Value), SessionError> {
        let url = self.url(path);
        let mut req = match body {
            Some(body) => {
                trace!(name: "Sending request", url = %url, request = %body);
                ehttp::Request::post(url, serde_json::to_vec(body)?)
            }
            None => {
                trace!(name: "Sending request", url = %url);
                ehttp::Request::get(url)
            }
        };

        let bearer = token.map(|token| format!("Bearer {}", token));
        let mut headers = vec![("Accept", "application/json")];
        if body.is_some() {
            headers.push(("Content-Type", "application/json"));
        }
        if let Some(bearer) = &bearer {
            headers.push(("Authorization", bearer.as_str()));
        }
        req.headers = ehttp::Headers::new(&headers);

        let response = ehttp::fetch_blocking(&req)
            .map_err(|reason| SessionError::ConnectionFailure { reason })?;
        let decoded = decode_body(response.status, &response.bytes)?;
        trace!(name: "Received response", status = response.status, response = %decoded);
        Ok((response.status, decoded))
    }
}

/// Error statuses often come with a plain-text body; only successful
/// responses are required to be JSON.
pub(crate) fn decode_body(status: u16, bytes: &[u8]) -> Result<Value, SessionError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(_) if !(200..300).contains(&status) => Ok(Value::Object(Map::new())),
        Err(err) => Err(SessionError::DecodeFailure(err)),
    }
}
