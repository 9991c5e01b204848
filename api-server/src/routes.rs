use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse, Responder};
use catch_core::Click;
use catch_host::{SessionError, SessionStore};
use serde::{Deserialize, Serialize};

// Request/Response types

#[derive(Debug, Deserialize)]
struct ValidationRequest {
    session_id: String,
    click_x: f64,
    click_y: f64,
    /// Seconds since the ball was launched
    time: f64,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    catch_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidationResponse {
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            catch_count: 0,
            error: Some(error.into()),
        }
    }
}

// API Handlers

/// GET /generate
/// Start a new round with randomized physics parameters
async fn generate(store: web::Data<SessionStore>) -> impl Responder {
    let record = store.create_session();
    tracing::info!(
        "Generated session {} (mode: {}, live sessions: {})",
        record.id,
        record.mode,
        store.len()
    );
    HttpResponse::Ok().json(record)
}

/// POST /validate
/// Check a click against the session's trajectory
async fn validate(
    store: web::Data<SessionStore>,
    req: web::Json<ValidationRequest>,
) -> impl Responder {
    let click = Click {
        x: req.click_x,
        y: req.click_y,
        elapsed: req.time,
    };

    match store.validate_click(&req.session_id, &click) {
        Ok(validation) => {
            if validation.valid {
                tracing::info!(
                    "Catch for session {} (catch_count: {})",
                    req.session_id,
                    validation.catch_count
                );
            }
            HttpResponse::Ok().json(ValidationResponse {
                valid: validation.valid,
                catch_count: validation.catch_count,
                error: None,
            })
        }
        Err(SessionError::NotFound { id }) => {
            tracing::warn!("Validation for unknown session: {}", id);
            HttpResponse::BadRequest().json(ValidationResponse::rejected("Invalid session"))
        }
    }
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "catch-api"
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/generate", web::get().to(generate))
        .route("/validate", web::post().to(validate));
}

/// JSON extractor settings. Undecodable bodies are answered with the
/// validation response shape so the client only has one format to parse.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = err.to_string();
            tracing::warn!("Rejected request body: {}", message);
            let response = HttpResponse::BadRequest().json(ValidationResponse::rejected(message));
            InternalError::from_response(err, response).into()
        })
}

/// CORS policy allowing any origin, as the game is embedded in third-party pages
pub fn cors(max_age_secs: usize) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .expose_any_header()
        .max_age(max_age_secs)
}
