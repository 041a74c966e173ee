use super::{TransportRequest, TransportResponse};
use crate::error::{Error, TransportErrorKind};
use async_trait::async_trait;
use reqwest::Client;
use std::{sync::Arc, time::Duration};

/// Trait implemented by any async HTTP layer.
#[async_trait]
pub trait AsyncTransport: Send + Sync + 'static {
    async fn post(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynAsyncTransport = Arc<dyn AsyncTransport>;

#[async_trait]
impl<T: AsyncTransport + ?Sized> AsyncTransport for Arc<T> {
    async fn post(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).post(req).await
    }
}

/// Default async transport built on `reqwest`.
#[derive(Clone)]
pub struct ReqwestAsync {
    client: Client,
}

impl ReqwestAsync {
    /// Construct a new transport.
    ///
    /// * `ua` – User-Agent header.
    /// * `timeout` – per-request timeout.
    /// * `connect_timeout` – connection establishment timeout.
    pub fn try_new(ua: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(ua)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| Error::InvalidConfig {
                message: "failed to build HTTP client".into(),
                source: Some(Box::new(err)),
            })?;

        Ok(Self { client })
    }
}

fn transport_error(err: reqwest::Error, path: &str) -> Error {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };
    Error::Transport {
        path: path.to_owned().into_boxed_str(),
        kind,
        source: Box::new(err),
    }
}

#[async_trait]
impl AsyncTransport for ReqwestAsync {
    async fn post(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest { url, body, timeout } = req;
        let path = url.path().to_owned();

        let resp = self
            .client
            .post(url)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| transport_error(err, &path))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|err| transport_error(err, &path))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
