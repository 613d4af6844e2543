//! Axum-based gateway for the portfolio assistant. Config-driven via CoreConfig.

mod handlers;

use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use folio_core::{default_groups, CoreConfig, KnowledgeBase, Responder};
use folio_skills::{select_responder, LlmMode, MailTransport, SmtpRelay};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pre-flight check: config, knowledge base, rule list, strategies and port.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge base... ");
    let kb = match config.knowledge_path.as_deref() {
        Some(path) => KnowledgeBase::load_json_path(path).map_err(|e| e.to_string())?,
        None => KnowledgeBase::builtin(),
    };
    println!(
        "OK ({}: {} projects, {} roles)",
        kb.identity.name,
        kb.projects.len(),
        kb.experience.len()
    );

    print!("Checking pattern rules... ");
    let groups = default_groups(&kb).map_err(|e| format!("Pattern rules failed to compile: {}", e))?;
    println!("OK ({} groups)", groups.len());

    println!("LLM mode: {}", LlmMode::from_config(&config.llm).as_str());
    if config.contact.is_configured() {
        SmtpRelay::from_config(&config.contact).map_err(|e| format!("Contact relay invalid: {}", e))?;
        println!("Contact relay: configured");
    } else {
        println!("Contact relay: disabled (SMTP host/user not set)");
    }

    if config.frontend_enabled {
        let index = Path::new(&config.frontend_dir).join("index.html");
        print!("Checking frontend {}... ", index.display());
        if !index.is_file() {
            return Err(format!("Frontend enabled but {} is missing", index.display()));
        }
        println!("OK");
    }

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\n✅ SUCCESS: All systems GO. Ready to start gateway.");
    Ok(())
}

/// SMTP relay when host and user are set; the contact route answers 500 otherwise.
fn mailer_from_config(config: &CoreConfig) -> Option<Arc<dyn MailTransport>> {
    if !config.contact.is_configured() {
        tracing::info!(target: "folio::contact", "Contact relay disabled (SMTP host/user not set)");
        return None;
    }
    match SmtpRelay::from_config(&config.contact) {
        Ok(relay) => {
            tracing::info!(
                target: "folio::contact",
                port = config.contact.smtp_port,
                implicit_tls = config.contact.implicit_tls(),
                "Contact relay ready"
            );
            Some(Arc::new(relay))
        }
        Err(e) => {
            tracing::warn!(target: "folio::contact", error = %e, "Contact relay unavailable");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[folio-gateway] .env not loaded: {} (using system environment)", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("❌ PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let knowledge = Arc::new(KnowledgeBase::load_or_builtin(config.knowledge_path.as_deref()));
    let topics = default_groups(&knowledge)
        .expect("compile pattern rules")
        .iter()
        .map(|g| g.topic.label())
        .collect();
    let responder = select_responder(&config.llm, Arc::clone(&knowledge)).expect("build responder");
    let mailer = mailer_from_config(&config);

    let app = build_app(AppState {
        config: Arc::clone(&config),
        responder,
        llm_mode: LlmMode::from_config(&config.llm),
        topics: Arc::new(topics),
        mailer,
    });

    let port = config.port;
    let app_name = config.app_name.clone();
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("{} listening on {}", app_name, addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.expect("bind gateway port"),
        app,
    )
    .await
    .expect("serve gateway");
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o.trim()) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any),
    )
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;
    let frontend_dir = PathBuf::from(&state.config.frontend_dir);
    let cors = cors_layer(&state.config.cors_origins);

    let mut app = Router::new()
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/chat", post(handlers::chat::chat))
        .route("/api/contact", post(handlers::contact::contact))
        .with_state(state);

    if frontend_enabled {
        // Unknown paths get index.html so client-side routes resolve.
        let index_file = frontend_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&frontend_dir).fallback(ServeFile::new(index_file)));
    }

    match cors {
        Some(layer) => app.layer(layer),
        None => app,
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) responder: Arc<dyn Responder>,
    pub(crate) llm_mode: LlmMode,
    pub(crate) topics: Arc<Vec<&'static str>>,
    pub(crate) mailer: Option<Arc<dyn MailTransport>>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity, responder strategy and rule topics.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "llm_mode": state.llm_mode.as_str(),
        "responder": state.responder.name(),
        "topics": state.topics.as_ref(),
        "contact_relay": state.mailer.is_some(),
    }))
}
