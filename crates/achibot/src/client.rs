//! Game server client: device authentication and socket creation

use crate::config::ServerConfig;
use crate::error::ClientError;
use crate::service::GameService;
use crate::session::{AuthResponse, Session};
use crate::socket::Socket;
use achicore::DeviceId;
use achicore::protocol::{DEVICE_AUTH_PATH, SOCKET_LANG, SOCKET_PATH};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

#[derive(Serialize)]
struct DeviceAuthRequest<'a> {
    id: &'a str,
}

/// HTTP + realtime client for one game server
#[derive(Debug, Clone)]
pub struct NakamaClient {
    http: reqwest::Client,
    server: ServerConfig,
}

impl NakamaClient {
    pub fn new(server: ServerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, server })
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// URL of the realtime socket for `session`
    pub fn socket_url(&self, session: &Session, appear_online: bool) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.server.ws_url(), SOCKET_PATH))
            .context("Invalid socket URL")?;
        url.query_pairs_mut()
            .append_pair("lang", SOCKET_LANG)
            .append_pair("status", if appear_online { "true" } else { "false" })
            .append_pair("token", &session.token);
        Ok(url)
    }
}

#[async_trait]
impl GameService for NakamaClient {
    type Channel = Socket;

    async fn authenticate_device(
        &self,
        device_id: &DeviceId,
        create: bool,
        username: &str,
    ) -> Result<Session> {
        let url = format!("{}{}", self.server.http_url(), DEVICE_AUTH_PATH);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.server.server_key, Some(""))
            .query(&[
                ("create", if create { "true" } else { "false" }),
                ("username", username),
            ])
            .json(&DeviceAuthRequest {
                id: device_id.as_str(),
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthFailed { status, body }.into());
        }

        let auth: AuthResponse = response
            .json()
            .await
            .context("Invalid authentication response")?;

        let session = Session::from_response(auth)?;
        tracing::debug!(
            "Authenticated {} as {} (created={})",
            device_id,
            session.username,
            session.created
        );

        Ok(session)
    }

    async fn connect(&self, session: &Session, appear_online: bool) -> Result<Socket> {
        let url = self.socket_url(session, appear_online)?;
        let socket = Socket::connect(url.as_str()).await?;
        tracing::debug!("Socket connected for {}", session.username);
        Ok(socket)
    }
}
