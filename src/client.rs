//! USGS FDSN event service client.
//!
//! Provides blocking HTTP access to the `query.geojson` endpoint.
//! Uses reqwest with rustls for TLS.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::errors::QuakeError;
use crate::query::Query;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for API requests.
const USER_AGENT: &str = concat!("quakestats/", env!("CARGO_PKG_VERSION"));

/// FDSN event query endpoint returning GeoJSON.
pub const DEFAULT_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query.geojson";

/// Raw response body as returned by the service.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Final request URL
    pub url: String,
    /// Undecoded body text
    pub body: String,
}

/// Client for the FDSN event service.
pub struct FdsnClient {
    client: Client,
    endpoint: String,
}

impl FdsnClient {
    /// Create a new client against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, QuakeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Build the full request URL for a query.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::InvalidQuery`] if the endpoint is not a valid URL.
    pub fn request_url(&self, query: &Query) -> Result<Url, QuakeError> {
        Url::parse_with_params(&self.endpoint, &query.params())
            .map_err(|e| QuakeError::InvalidQuery(format!("bad endpoint {}: {e}", self.endpoint)))
    }

    /// Issue one GET for `query` and return the body text.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::Http`] when the transport fails and
    /// [`QuakeError::Api`] when the service answers with a non-success status.
    #[instrument(skip(self, query))]
    pub fn fetch(&self, query: &Query) -> Result<RawResponse, QuakeError> {
        let url = self.request_url(query)?;

        debug!("fetching events from {}", url);

        let response = self.client.get(url.clone()).send()?;

        // Check status before reading the body
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(QuakeError::Api {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        let body = response.text()?;

        debug!("received {} bytes (HTTP {})", body.len(), status.as_u16());
        Ok(RawResponse {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve one canned HTTP response on a local port, returning its endpoint.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            // Drain the request head before answering.
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).expect("read request") > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            stream.write_all(response.as_bytes()).expect("write response");
        });
        (format!("http://{addr}/fdsnws/event/1/query.geojson"), handle)
    }

    #[test]
    fn test_request_url_carries_all_params() {
        let client = FdsnClient::new(DEFAULT_ENDPOINT, Duration::from_secs(5))
            .expect("client builds");
        let url = client
            .request_url(&Query::default())
            .expect("valid url");

        assert_eq!(url.host_str(), Some("earthquake.usgs.gov"));
        assert_eq!(url.path(), "/fdsnws/event/1/query.geojson");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 8);
        assert!(pairs.contains(&("starttime".into(), "2000-01-01".into())));
        assert!(pairs.contains(&("minlongitude".into(), "-9.756".into())));
        assert!(pairs.contains(&("orderby".into(), "time-asc".into())));
    }

    #[test]
    fn test_request_url_rejects_bad_endpoint() {
        let client = FdsnClient::new("not a url", Duration::from_secs(5)).expect("client builds");
        assert!(matches!(
            client.request_url(&Query::default()),
            Err(QuakeError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_error_status_is_api_error() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\n\
             Content-Length: 19\r\n\
             Connection: close\r\n\r\n\
             Service Unavailable",
        );
        let client = FdsnClient::new(&endpoint, Duration::from_secs(5)).expect("client builds");

        let err = client.fetch(&Query::default()).expect_err("503 must fail");
        server.join().expect("server thread");

        assert!(err.is_network());
        match err {
            QuakeError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_success_returns_body() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 15\r\n\
             Connection: close\r\n\r\n\
             {\"features\":[]}",
        );
        let client = FdsnClient::new(&endpoint, Duration::from_secs(5)).expect("client builds");

        let response = client.fetch(&Query::default()).expect("200 succeeds");
        server.join().expect("server thread");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"features":[]}"#);
        assert!(response.url.contains("orderby=time-asc"));
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        // Port 9 on localhost has nothing listening in test environments.
        let client = FdsnClient::new("http://127.0.0.1:9/query.geojson", Duration::from_secs(2))
            .expect("client builds");
        let err = client
            .fetch(&Query::default())
            .expect_err("nothing listens there");
        assert!(err.is_network());
    }
}
