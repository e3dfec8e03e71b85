use crate::{
    config::Config,
    error::{ClientError, Result},
    models::{
        booking::{Booking, CreateBookingRequest},
        notification::NotificationFeed,
        response::{ErrorResponse, MessageResponse},
        service::{CovidRestrictions, Service, ServiceSuggestions},
        user::{LoginRequest, RegisterRequest, TokenResponse, User, VerifyEmailRequest},
    },
    services::{notification::NotificationApi, session::SessionStore},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// 后端 REST API 客户端
///
/// 持有会话的一个克隆，每个请求都会带上当前的 Bearer token。
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::config("API_BASE_URL must be an absolute http(s) URL"));
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        debug!("{} {}", method, url);

        let builder = self.http_client.request(method, url);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }

    /// 只关心状态码的确认型请求，响应体可以为空
    async fn send_ack(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    // ---- 认证 ----

    pub async fn login(&self, credentials: &LoginRequest) -> Result<TokenResponse> {
        let builder = self.request(Method::POST, &["auth", "login"])?.json(credentials);
        self.send_json(builder).await
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<TokenResponse> {
        let builder = self.request(Method::POST, &["auth", "register"])?.json(form);
        self.send_json(builder).await
    }

    pub async fn me(&self) -> Result<User> {
        let builder = self.request(Method::GET, &["auth", "me"])?;
        self.send_json(builder).await
    }

    pub async fn verify_email(&self, token: &str) -> Result<MessageResponse> {
        let body = VerifyEmailRequest {
            token: token.to_string(),
        };
        let builder = self.request(Method::POST, &["auth", "verify-email"])?.json(&body);
        self.send_json(builder).await
    }

    pub async fn delete_account(&self) -> Result<MessageResponse> {
        let builder = self.request(Method::DELETE, &["user", "delete"])?;
        self.send_json(builder).await
    }

    // ---- 服务目录与预约 ----

    pub async fn services(&self) -> Result<Vec<Service>> {
        let builder = self.request(Method::GET, &["services"])?;
        self.send_json(builder).await
    }

    pub async fn service_suggestions(&self) -> Result<ServiceSuggestions> {
        let builder = self.request(Method::GET, &["services", "suggestions"])?;
        self.send_json(builder).await
    }

    pub async fn covid_restrictions(&self) -> Result<CovidRestrictions> {
        let builder = self.request(Method::GET, &["covid", "restrictions"])?;
        self.send_json(builder).await
    }

    pub async fn bookings(&self) -> Result<Vec<Booking>> {
        let builder = self.request(Method::GET, &["bookings"])?;
        self.send_json(builder).await
    }

    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking> {
        let builder = self.request(Method::POST, &["bookings"])?.json(request);
        self.send_json(builder).await
    }

    /// 预约二维码（PNG）
    pub async fn booking_qr(&self, booking_id: &str) -> Result<Vec<u8>> {
        let builder = self.request(Method::GET, &["bookings", booking_id, "qr"])?;
        let response = self.send(builder).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl NotificationApi for ApiClient {
    async fn fetch_notifications(&self) -> Result<NotificationFeed> {
        let builder = self.request(Method::GET, &["notifications"])?;
        self.send_json(builder).await
    }

    async fn mark_read(&self, notification_id: &str) -> Result<()> {
        let builder = self.request(Method::PUT, &["notifications", notification_id, "read"])?;
        self.send_ack(builder).await
    }

    async fn mark_all_read(&self) -> Result<()> {
        let builder = self.request(Method::PUT, &["notifications", "read-all"])?;
        self.send_ack(builder).await
    }
}

/// 非 2xx 响应转换为 `ClientError`，尽量保留后端的 `detail`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message())
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    warn!("Backend returned error status {}: {}", status, detail);

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized(detail));
    }
    Err(ClientError::api(status, detail))
}
