//! HTTP surface for the fish-finder service.
//!
//! Routes:
//!   POST /find_fish              zone recommendation and catch advisory
//!   GET  /data                   ocean readings CSV as JSON records
//!   GET  /historical_migration   migration history CSV as JSON records
//!   GET  /health                 liveness
//!
//! Handlers are thin: request parsing and response shaping live here, the
//! prediction pipeline runs on the blocking pool (it is CPU-bound and the
//! weather client is synchronous).

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::dev_mode::DevMode;
use crate::ingest::csv_records::load_records;
use crate::ingest::openweather::{pick_zone, temperature_or_fallback};
use crate::logging::{self, Source};
use crate::model::{ErrorRecommendation, FinderError, Observation, Recommendation};
use crate::recommend::{recommend, sample_conditions};

/// Parsed `/find_fish` body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindFishRequest {
    pub month: u32,
    /// User-supplied temperature; fetched from the weather service when absent.
    pub temperature: Option<f64>,
}

fn field_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn parse_month(value: &Value) -> Result<u32, FinderError> {
    let month = match value {
        Value::Number(n) => n.as_f64().map(f64::trunc),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|m| m as f64),
        _ => None,
    }
    .ok_or_else(|| FinderError::InvalidInput(format!("month must be an integer, got {}", value)))?;

    if !(1.0..=12.0).contains(&month) {
        return Err(FinderError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(month as u32)
}

/// Parses a `/find_fish` JSON body. `month` is required; `temperature` is
/// optional but must be numeric when present and non-null.
pub fn parse_find_fish_request(body: &[u8]) -> Result<FindFishRequest, FinderError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| FinderError::InvalidInput(format!("request body is not valid JSON: {}", e)))?;

    let month_value = value
        .get("month")
        .ok_or_else(|| FinderError::InvalidInput("missing field 'month'".to_string()))?;
    let month = parse_month(month_value)?;

    let temperature = match value.get("temperature") {
        None | Some(Value::Null) => None,
        Some(t) => Some(field_as_f64(t).ok_or_else(|| {
            FinderError::InvalidInput(format!("temperature must be a number, got {}", t))
        })?),
    };

    Ok(FindFishRequest { month, temperature })
}

/// Builds the live observation and runs the pipeline. Blocking.
pub fn find_fish_blocking(
    config: &Config,
    request: FindFishRequest,
) -> Result<Recommendation, FinderError> {
    let mut rng = DevMode::new(config.pipeline.seed).rng();

    let temperature = match request.temperature {
        Some(t) => t,
        None => {
            let reading = temperature_or_fallback(&config.weather, pick_zone(&mut rng));
            logging::info(Source::Weather, Some(reading.zone.name()), &reading.provenance());
            reading.temperature_c
        }
    };
    let (current, chlorophyll) = sample_conditions(&mut rng);
    let observation = Observation::new(temperature, request.month, current, chlorophyll)?;

    recommend(&observation, &config.pipeline.settings(), &mut rng)
}

fn find_fish_error(message: impl std::fmt::Display) -> Response {
    logging::warn(Source::Api, Some("find_fish"), &message.to_string());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRecommendation::from_message(message)),
    )
        .into_response()
}

async fn find_fish(State(config): State<&'static Config>, body: Bytes) -> Response {
    let request = match parse_find_fish_request(&body) {
        Ok(r) => r,
        Err(e) => return find_fish_error(e),
    };

    match tokio::task::spawn_blocking(move || find_fish_blocking(config, request)).await {
        Ok(Ok(rec)) => {
            logging::info(
                Source::Api,
                Some("find_fish"),
                &format!(
                    "month {} at {:.1} °C → {} (score {}, {})",
                    request.month, rec.temperature, rec.zone, rec.score, rec.color
                ),
            );
            (StatusCode::OK, Json(rec)).into_response()
        }
        Ok(Err(e)) => find_fish_error(e),
        Err(join_err) => find_fish_error(format!("prediction worker failed: {}", join_err)),
    }
}

async fn serve_csv(path: String, failure_prefix: &'static str) -> Response {
    let path = PathBuf::from(path);
    let loaded = tokio::task::spawn_blocking(move || load_records(&path).map_err(|e| e.to_string()))
        .await
        .unwrap_or_else(|e| Err(e.to_string()));

    match loaded {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(message) => {
            logging::error(Source::Data, None, &message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("{}: {}", failure_prefix, message) })),
            )
                .into_response()
        }
    }
}

async fn ocean_data(State(config): State<&'static Config>) -> Response {
    serve_csv(config.data.ocean_csv.clone(), "Failed to load ocean data").await
}

async fn historical_migration(State(config): State<&'static Config>) -> Response {
    serve_csv(
        config.data.historical_migration_csv.clone(),
        "Failed to load historical data",
    )
    .await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(config: &'static Config) -> Router {
    Router::new()
        .route("/find_fish", post(find_fish))
        .route("/data", get(ocean_data))
        .route("/historical_migration", get(historical_migration))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(config)
}

/// Binds `config.server.bind` and serves until the process exits.
pub async fn serve(config: &'static Config) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    logging::info(
        Source::System,
        None,
        &format!("listening on {}", config.server.bind),
    );
    axum::serve(listener, router(config)).await
}
