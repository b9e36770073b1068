use actix_web::{web, HttpResponse, Responder};
use chrono::Timelike;
use std::sync::Arc;
use validator::Validate;

use crate::catalog;
use crate::core::Ranker;
use crate::models::{
    AddFavoriteRequest, ErrorResponse, Favorite, HealthResponse, HistoryEntry, MessageResponse,
    PlaceResponse, QuestRequest, RecommendContext, RecommendRequest,
};
use crate::quest::QuestOrchestrator;
use crate::services::{GeoapifyClient, JsonStore, WeatherClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub geoapify: Arc<GeoapifyClient>,
    pub weather: Arc<WeatherClient>,
    pub store: Arc<JsonStore>,
    pub ranker: Ranker,
    pub quests: QuestOrchestrator,
}

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend))
        .route("/suggestions", web::get().to(suggestions))
        .route("/favorites", web::get().to(get_favorites))
        .route("/favorites", web::post().to(add_favorite))
        .route("/history", web::get().to(get_history))
        .route("/quest", web::post().to(generate_quest));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // The service runs without the predictor, but report it
    let status = if state.ranker.predictor_loaded() {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Venue recommendation endpoint
///
/// POST /recommend
///
/// Request body:
/// ```json
/// {
///   "location": "Berlin",
///   "time": "60",
///   "preference": "Chill",
///   "budget": "free"
/// }
/// ```
///
/// Returns the ranked recommendations, best first. The only user-visible
/// failure is an unresolvable location; every upstream hiccup after that
/// degrades to a documented default.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let coords = match state.geoapify.geocode(&req.location).await {
        Ok(Some(coords)) => coords,
        Ok(None) => {
            tracing::info!("No geocoding result for '{}'", req.location);
            return location_not_found(&req.location);
        }
        Err(e) => {
            tracing::warn!("Geocoding failed for '{}': {}", req.location, e);
            return location_not_found(&req.location);
        }
    };

    // Best-effort history; a store failure never blocks the request
    let entry = HistoryEntry {
        location: req.location.clone(),
        vibe: req.preference.clone(),
        date: chrono::Utc::now(),
    };
    if let Err(e) = state.store.record_search(entry).await {
        tracing::warn!("Failed to record search history: {}", e);
    }

    let ctx = RecommendContext::new(coords, &req.time, &req.preference, req.budget.as_deref());
    let categories = catalog::categories_for_vibe(&ctx.vibe, ctx.budget);

    // Independent lookups, issued together
    let (weather, places) = tokio::join!(
        state.weather.current_or_default(coords),
        state.geoapify.search_places(coords, &categories)
    );

    let places = places.unwrap_or_else(|e| {
        tracing::warn!("Venue search failed: {}", e);
        Vec::new()
    });

    let outcome = state.ranker.rank(&ctx, &weather, places);

    let summary = weather.summary();
    let response: Vec<PlaceResponse> = outcome
        .picks
        .iter()
        .map(|pick| PlaceResponse::from_pick(pick, &req.time, &summary))
        .collect();

    tracing::info!(
        "Returning {} recommendations for '{}' (from {} candidates)",
        response.len(),
        req.location,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(response)
}

fn location_not_found(location: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Location not found".to_string(),
        message: format!("Could not resolve '{}'", location),
        status_code: 404,
    })
}

/// Canned suggestions by local time of day
async fn suggestions() -> impl Responder {
    let hour = chrono::Local::now().hour();
    let picks: [&str; 3] = if hour < 11 {
        ["Morning Coffee Run", "Sunrise Park Walk", "Breakfast Spot"]
    } else if hour < 17 {
        ["Visit local Museum", "City Park Stroll", "Coworking Session"]
    } else {
        ["Sunset Viewpoint", "Cozy Dinner", "Night Walk"]
    };

    HttpResponse::Ok().json(picks)
}

async fn get_favorites(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.favorites().await)
}

async fn add_favorite(
    state: web::Data<AppState>,
    req: web::Json<AddFavoriteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let favorite = Favorite {
        name: req.name.clone(),
        location: req.location.clone(),
        score: req.score,
    };

    match state.store.add_favorite(favorite).await {
        Ok(added) => {
            tracing::debug!("Favorite '{}' {}", req.name, if added { "saved" } else { "already present" });
            HttpResponse::Ok().json(MessageResponse {
                message: "Saved".to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to save favorite '{}': {}", req.name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save favorite".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

async fn get_history(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.history().await)
}

/// Quest generation endpoint
///
/// POST /quest
async fn generate_quest(
    state: web::Data<AppState>,
    req: web::Json<QuestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let quest = state.quests.generate_quest(&req).await;

    tracing::info!(
        "Generated quest {} with {} steps",
        quest.quest_id,
        quest.steps.len()
    );

    HttpResponse::Ok().json(quest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_location_not_found_body() {
        let response = location_not_found("Atlantis");
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
