use homebound_client::{
    config::Config,
    models::user::LoginRequest,
    services::session,
    state::AppState,
};
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("LOG_LEVEL").unwrap_or_else(|_| "homebound_client=debug,homebound_bell=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HomeBound notification bell...");

    // 加载配置
    let config = Config::from_env()?;
    info!("Using API at {}", config.api_base_url);

    let session = session::init()?;
    let state = AppState::new(config.clone(), session.clone())?;

    // 建立会话：优先使用预签发的 token，否则用账号密码登录
    if let Some(token) = config.auth_token.clone() {
        session.set_token(token);
        match session.restore(&state.api).await {
            Ok(user) => info!("Session restored for {}", user.email),
            Err(e) => {
                error!("Failed to restore session: {}", e);
                return Err(anyhow::anyhow!("Authentication failed"));
            }
        }
    } else if let (Some(email), Some(password)) = (config.login_email.clone(), config.login_password.clone()) {
        if let Err(e) = session.login(&state.api, LoginRequest { email, password }).await {
            error!("Login failed: {}", e.user_message());
            return Err(anyhow::anyhow!("Authentication failed"));
        }
    } else {
        warn!("No AUTH_TOKEN or LOGIN_EMAIL/LOGIN_PASSWORD configured, requests will be anonymous");
    }

    let poller = state.notifications.mount();

    // 徽标变化时输出
    let mut render = interval(Duration::from_secs(1));
    let mut last_badge: Option<Option<String>> = None;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = render.tick() => {
                let badge = state.notifications.badge_label();
                if last_badge.as_ref() != Some(&badge) {
                    match &badge {
                        Some(label) => info!("🔔 {} unread", label),
                        None => info!("🔔 no unread notifications"),
                    }
                    for n in state.notifications.view().notifications.iter().filter(|n| n.is_unread()) {
                        info!("  [{:?}] {} - {} ({})", n.kind, n.title, n.message, n.display_timestamp());
                    }
                    last_badge = Some(badge);
                }
            }
            _ = &mut shutdown => {
                info!("Shutting down...");
                break;
            }
        }
    }

    poller.unmount();
    session::teardown();
    Ok(())
}
