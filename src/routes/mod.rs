use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use log::warn;

use crate::constants::{
    CODE_BAD_REQUEST, CODE_INVALID_USER_ID, ERR_INVALID_USER_ID, ERR_MALFORMED_BODY,
    ERR_MALFORMED_QUERY, MSG_SERVER_RUNNING,
};
use crate::errors::ApiError;
use crate::handlers;
use crate::models::HealthResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                // Health check
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/users")
                        .route("", web::get().to(handlers::get_users))
                        .route("", web::post().to(handlers::create_user))
                        // Must be registered before /{id} to avoid conflict
                        .route("/search", web::get().to(handlers::search_users))
                        .route("/{id}", web::get().to(handlers::get_user))
                        .route("/{id}", web::put().to(handlers::update_user))
                        .route("/{id}", web::delete().to(handlers::delete_user)),
                ),
        );
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    ApiError::bad_request(CODE_BAD_REQUEST, ERR_MALFORMED_BODY).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected path parameter: {}", err);
    ApiError::bad_request(CODE_INVALID_USER_ID, ERR_INVALID_USER_ID).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected query string: {}", err);
    ApiError::bad_request(CODE_BAD_REQUEST, ERR_MALFORMED_QUERY).into()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    use super::*;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "OK");
    }
}
