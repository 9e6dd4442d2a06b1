use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::json_error_handler;
use crate::modules::payments::models::PayRequest;
use crate::modules::payments::services::PaymentGateway;

/// Prompt the customer's phone for payment
/// POST /api/pay
/// Returns the gateway's response body unchanged
pub async fn initiate_payment(
    gateway: web::Data<dyn PaymentGateway>,
    body: web::Json<PayRequest>,
) -> Result<HttpResponse, AppError> {
    let PayRequest { phone, amount } = body.into_inner();

    let response = gateway.initiate_stk_push(phone, amount).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/pay", web::post().to(initiate_payment)),
    );
}
