// Route exports
pub mod places;

pub use places::AppState;

use actix_web::web;

/// Paths stay unversioned for wire compatibility with existing clients
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(places::configure);
}
