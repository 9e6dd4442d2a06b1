pub mod health;
pub mod payments;

use actix_web::web;

/// Register every route the service exposes
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    payments::configure(cfg);
}
