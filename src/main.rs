use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pocketplan::config::Settings;
use pocketplan::core::{Ranker, ScoreWeights};
use pocketplan::ml::{FeedbackRecorder, TypePredictor};
use pocketplan::quest::QuestOrchestrator;
use pocketplan::routes::{self, AppState};
use pocketplan::services::{GeoapifyClient, JsonStore, WeatherClient};

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        panic!("Configuration error: {}", e);
    });

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting PocketPlan recommendation service...");

    // Initialize service clients
    let geoapify = Arc::new(GeoapifyClient::new(
        settings.geoapify.base_url.clone(),
        settings.geoapify.api_key.clone(),
        settings.geoapify.cache_size,
        settings.geoapify.cache_ttl_secs,
        settings.search.radius_m,
        settings.search.limit,
    ));

    let weather = Arc::new(WeatherClient::new(
        settings.openweather.base_url.clone(),
        settings.openweather.api_key.clone(),
    ));

    let store = Arc::new(JsonStore::new(&settings.store.path));

    // Load the type predictor; a missing artifact leaves it disabled
    let predictor = Arc::new(TypePredictor::load(Path::new(&settings.model.path)));
    info!(
        "Type predictor {}",
        if predictor.is_loaded() { "loaded" } else { "disabled" }
    );

    let feedback = FeedbackRecorder::spawn(PathBuf::from(&settings.model.feedback_path));

    // Initialize the ranker with configured weights
    let weights = ScoreWeights {
        base: settings.scoring.weights.base,
        predictor_match: settings.scoring.weights.predictor_match,
        rain_outdoor_penalty: settings.scoring.weights.rain_outdoor_penalty,
        rain_indoor_bonus: settings.scoring.weights.rain_indoor_bonus,
        sun_outdoor_bonus: settings.scoring.weights.sun_outdoor_bonus,
        free_bonus: settings.scoring.weights.free_bonus,
        premium_bonus: settings.scoring.weights.premium_bonus,
        far_penalty: settings.scoring.weights.far_penalty,
        short_time_min: settings.scoring.weights.short_time_min,
        far_distance_m: settings.scoring.weights.far_distance_m,
        min_score: settings.scoring.weights.min_score,
        max_score: settings.scoring.weights.max_score,
    };

    let ranker = Ranker::new(weights, settings.scoring.top_k, predictor, feedback);

    info!("Ranker initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        geoapify,
        weather,
        store,
        ranker,
        quests: QuestOrchestrator::new(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let origins = settings.cors.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);
        for origin in &origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
