// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HTTP client for the analysis backend.
//!
//! The backend accepts a single multipart upload at `POST {endpoint}/analyze`
//! and answers with the screenplay and shot analysis as JSON.

use super::media::MediaSource;
use crate::config::{AppConfig, ConfigError};
use crate::models::analysis::AnalysisResponse;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Longest backend error body carried into an error message.
const MAX_ERROR_BODY: usize = 200;

/// Ways an analysis request can fail.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("analysis worker stopped before replying")]
    Interrupted,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A file to upload, detached from any UI state.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub mime: String,
    pub source: MediaSource,
}

/// Anything that can turn an upload into an analysis.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, upload: &Upload) -> Result<AnalysisResponse, AnalysisError>;
}

/// Error body the backend sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Backend reached over HTTP.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    url: Url,
}

impl HttpBackend {
    /// Create a client for the endpoint and timeout in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        Self::new(config.analyze_url()?, config.request_timeout())
    }

    pub fn new(url: Url, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl AnalysisBackend for HttpBackend {
    fn analyze(&self, upload: &Upload) -> Result<AnalysisResponse, AnalysisError> {
        let bytes = match &upload.source {
            MediaSource::Path(path) => std::fs::read(path).map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?,
            MediaSource::Bytes(bytes) => bytes.to_vec(),
        };

        log::info!("Uploading {} ({} bytes) to {}", upload.name, bytes.len(), self.url);

        let part = Part::bytes(bytes)
            .file_name(upload.name.clone())
            .mime_str(&upload.mime)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(self.url.clone()).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract a readable message from a failed response body.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }

    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Arc;
    use std::thread;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Read one HTTP request, honouring Content-Length or chunked bodies.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = find(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok());

                if let Some(len) = content_length {
                    if buf.len() >= header_end + 4 + len {
                        break;
                    }
                } else if headers.contains("transfer-encoding: chunked") {
                    if buf.ends_with(b"0\r\n\r\n") {
                        break;
                    }
                } else {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve a single canned response and hand back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (format!("http://{}/analyze", addr), handle)
    }

    fn upload() -> Upload {
        Upload {
            name: "scene.mp4".to_string(),
            mime: "video/mp4".to_string(),
            source: MediaSource::Bytes(Arc::from(b"FAKEVIDEO".to_vec())),
        }
    }

    fn backend(url: String) -> HttpBackend {
        HttpBackend::new(Url::parse(&url).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_success_sends_multipart_file_field() {
        let body = r#"{"screenplay":"INT. ROOM\n...","analysis":{"shot_type":"close-up","color_grade":"warm"}}"#;
        let (url, server) = serve_once("200 OK", body);

        let response = backend(url).analyze(&upload()).unwrap();
        assert_eq!(response.screenplay, "INT. ROOM\n...");
        assert_eq!(response.analysis.shot_type, "close-up");
        assert_eq!(response.analysis.color_grade, "warm");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /analyze HTTP/1.1"));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("content-type: multipart/form-data"));
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("filename=\"scene.mp4\""));
        assert!(lower.contains("content-type: video/mp4"));
        assert!(request.contains("FAKEVIDEO"));
    }

    #[test]
    fn test_uploads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.mov");
        std::fs::write(&path, b"DISKVIDEO").unwrap();

        let body = r#"{"screenplay":"","analysis":{"shot_type":"Wide Shot","color_grade":"Cool"}}"#;
        let (url, server) = serve_once("200 OK", body);

        let upload = Upload {
            name: "take.mov".to_string(),
            mime: "video/quicktime".to_string(),
            source: MediaSource::Path(path),
        };
        let response = backend(url).analyze(&upload).unwrap();
        assert_eq!(response.analysis.color_grade, "Cool");
        assert!(server.join().unwrap().contains("DISKVIDEO"));
    }

    #[test]
    fn test_error_status_uses_backend_message() {
        let (url, server) = serve_once("400 Bad Request", r#"{"error":"No file uploaded"}"#);

        let err = backend(url).analyze(&upload()).unwrap_err();
        match err {
            AnalysisError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No file uploaded");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_malformed_body() {
        let (url, server) = serve_once("200 OK", "<html>not json</html>");

        let err = backend(url).analyze(&upload()).unwrap_err();
        assert!(matches!(err, AnalysisError::Malformed(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = backend(format!("http://{}/analyze", addr))
            .analyze(&upload())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Network(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let upload = Upload {
            name: "gone.mp4".to_string(),
            mime: "video/mp4".to_string(),
            source: MediaSource::Path(PathBuf::from("/nonexistent/gone.mp4")),
        };

        let err = backend("http://127.0.0.1:9/analyze".to_string())
            .analyze(&upload)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(""), "no response body");
        assert_eq!(error_message("  Internal Server Error \n"), "Internal Server Error");

        let long = "x".repeat(500);
        let message = error_message(&long);
        assert!(message.ends_with("..."));
        assert_eq!(message.len(), MAX_ERROR_BODY + 3);
    }

    #[test]
    fn test_url_from_config() {
        let backend = HttpBackend::from_config(&AppConfig::default()).unwrap();
        assert_eq!(backend.url().as_str(), "http://localhost:5000/analyze");
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let config = AppConfig {
            endpoint: "http://localhost:5000?key=abc".to_string(),
            ..AppConfig::default()
        };
        let err = HttpBackend::from_config(&config).err().unwrap();
        assert!(matches!(err, AnalysisError::Config(ConfigError::InvalidEndpoint(_))));
    }
}
