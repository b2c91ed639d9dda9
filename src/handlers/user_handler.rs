//! User handlers: shape checks, dispatch, and status-code mapping.
//!
//! Every request is checked before it reaches the dispatcher, so a rejected
//! request never touches the database.

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{debug, info, warn};

use crate::commands::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand};
use crate::constants::{
    CODE_EMAIL_REQUIRED, CODE_ID_MISMATCH, CODE_INVALID_USER_ID, ERR_CREATE_USER,
    ERR_DELETE_USER, ERR_EMAIL_PARAM_REQUIRED, ERR_ID_MISMATCH, ERR_INVALID_USER_ID,
    ERR_UPDATE_USER,
};
use crate::dispatcher::Dispatcher;
use crate::errors::ApiError;
use crate::models::{CreateUserRequest, EmailSearchQuery, UpdateUserRequest};
use crate::queries::{GetAllUsersQuery, GetUserByIdQuery, SearchUsersByEmailQuery};
use crate::utils::{mask_email, mask_phone};
use crate::validators::{validate_create_user, validate_update_user};

fn require_positive_id(id: i64) -> Result<i64, ApiError> {
    if id <= 0 {
        warn!("Rejected non-positive user id: {}", id);
        return Err(ApiError::bad_request(CODE_INVALID_USER_ID, ERR_INVALID_USER_ID));
    }
    Ok(id)
}

/// List all active users, newest first.
pub async fn get_users(dispatcher: web::Data<Dispatcher>) -> Result<HttpResponse, ApiError> {
    let users = dispatcher.send(GetAllUsersQuery).await?;
    debug!("Returning {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

/// Get a specific active user by ID.
pub async fn get_user(
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = require_positive_id(path.into_inner())?;
    debug!("Fetching user with id: {}", id);

    let user = dispatcher
        .send(GetUserByIdQuery { id })
        .await?
        .ok_or_else(|| {
            warn!("User not found with id: {}", id);
            ApiError::user_not_found(id)
        })?;

    Ok(HttpResponse::Ok().json(user))
}

/// Search active users by a fragment of their email address.
pub async fn search_users(
    dispatcher: web::Data<Dispatcher>,
    query: web::Query<EmailSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let email = match query.into_inner().email {
        Some(email) if !email.trim().is_empty() => email,
        _ => {
            warn!("Email search without a usable email parameter");
            return Err(ApiError::bad_request(
                CODE_EMAIL_REQUIRED,
                ERR_EMAIL_PARAM_REQUIRED,
            ));
        }
    };

    debug!("Searching users by email: {}", mask_email(&email));
    let users = dispatcher.send(SearchUsersByEmailQuery { email }).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Create a user and answer with its id and location.
pub async fn create_user(
    dispatcher: web::Data<Dispatcher>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let errors = validate_create_user(&body);
    if !errors.is_empty() {
        warn!("Validation failed for create user: {:?}", errors);
        return Err(ApiError::validation(errors));
    }

    info!(
        "Creating user {} / {}",
        mask_email(&body.email),
        mask_phone(&body.phone)
    );
    let id = dispatcher
        .send(CreateUserCommand(body))
        .await
        .map_err(|e| e.during(ERR_CREATE_USER))?;

    info!("Successfully created user: {}", id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", id)))
        .json(id))
}

/// Replace the mutable fields of an active user.
pub async fn update_user(
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();

    if id != body.id {
        warn!("Path id {} does not match body id {}", id, body.id);
        return Err(ApiError::bad_request(CODE_ID_MISMATCH, ERR_ID_MISMATCH));
    }

    let errors = validate_update_user(&body);
    if !errors.is_empty() {
        warn!("Validation failed for update user: {:?}", errors);
        return Err(ApiError::validation(errors));
    }

    info!("Updating user: {}", id);
    let matched = dispatcher
        .send(UpdateUserCommand(body))
        .await
        .map_err(|e| e.during(ERR_UPDATE_USER))?;
    if !matched {
        warn!("Update matched no active user with id: {}", id);
        return Err(ApiError::user_not_found(id));
    }

    info!("Successfully updated user: {}", id);
    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete a user.
pub async fn delete_user(
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = require_positive_id(path.into_inner())?;

    info!("Deleting user: {}", id);
    let affected = dispatcher
        .send(DeleteUserCommand { id })
        .await
        .map_err(|e| e.during(ERR_DELETE_USER))?;
    if !affected {
        warn!("Delete matched no active user with id: {}", id);
        return Err(ApiError::user_not_found(id));
    }

    info!("Successfully deleted user: {}", id);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::database::test_support::TestDb;
    use crate::database::ConnectionFactory;
    use crate::models::User;
    use crate::routes::configure_routes;

    macro_rules! app {
        ($db:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Dispatcher::new($db.factory.clone())))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn john() -> Value {
        json!({
            "FirstName": "John",
            "LastName": "Doe",
            "Email": "john.doe@example.com",
            "Phone": "+1234567890"
        })
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let db = TestDb::new().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(john())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let id: i64 = test::read_body_json(resp).await;
        assert!(id > 0);
        assert_eq!(location, format!("/api/users/{}", id));

        let req = test::TestRequest::get().uri(&location).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let user: Value = test::read_body_json(resp).await;
        assert_eq!(user["Id"], id);
        assert_eq!(user["FirstName"], "John");
        assert_eq!(user["LastName"], "Doe");
        assert_eq!(user["Email"], "john.doe@example.com");
        assert_eq!(user["Phone"], "+1234567890");
        assert_eq!(user["IsActive"], true);
        assert!(user["CreatedDate"].is_string());
        assert!(user["UpdatedDate"].is_null());
    }

    #[actix_web::test]
    async fn test_create_with_empty_first_name_is_rejected() {
        let db = TestDb::new().await;
        let app = app!(db);

        let mut body = john();
        body["FirstName"] = json!("");
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "VALIDATION_FAILED");
        assert_eq!(err["errors"][0]["field"], "FirstName");

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let users: Vec<User> = test::call_and_read_body_json(&app, req).await;
        assert!(users.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let db = TestDb::new().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_user_bad_ids() {
        let db = TestDb::new().await;
        let app = app!(db);

        for (uri, status) in [
            ("/api/users/0", StatusCode::BAD_REQUEST),
            ("/api/users/-4", StatusCode::BAD_REQUEST),
            ("/api/users/abc", StatusCode::BAD_REQUEST),
            ("/api/users/42", StatusCode::NOT_FOUND),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_search_requires_email() {
        let db = TestDb::new().await;
        let app = app!(db);

        for uri in [
            "/api/users/search",
            "/api/users/search?email=",
            "/api/users/search?email=%20%20",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_search_matches_fragment() {
        let db = TestDb::new().await;
        let app = app!(db);

        let mut jane = john();
        jane["FirstName"] = json!("Jane");
        jane["LastName"] = json!("Smith");
        jane["Email"] = json!("jane.smith@example.com");
        for body in [john(), jane] {
            let req = test::TestRequest::post()
                .uri("/api/users")
                .set_json(body)
                .to_request();
            assert_eq!(
                test::call_service(&app, req).await.status(),
                StatusCode::CREATED
            );
        }

        let req = test::TestRequest::get()
            .uri("/api/users/search?email=doe")
            .to_request();
        let users: Vec<User> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "john.doe@example.com");
    }

    #[actix_web::test]
    async fn test_update_id_mismatch_does_not_mutate() {
        let db = TestDb::new().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(john())
            .to_request();
        let id: i64 = test::call_and_read_body_json(&app, req).await;

        let mut body = john();
        body["Id"] = json!(id + 2);
        body["FirstName"] = json!("Changed");
        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "ID_MISMATCH");

        let row = db.fetch_raw(id).await.unwrap();
        assert_eq!(row.first_name, "John");
        assert!(row.updated_date.is_none());
    }

    #[actix_web::test]
    async fn test_update_flow() {
        let db = TestDb::new().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(john())
            .to_request();
        let id: i64 = test::call_and_read_body_json(&app, req).await;

        let mut body = john();
        body["Id"] = json!(id);
        body["Phone"] = json!("+1999");
        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(&body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(db.fetch_raw(id).await.unwrap().phone, "+1999");

        body["Email"] = json!("broken");
        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(&body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        body["Id"] = json!(id + 50);
        body["Email"] = json!("fine@example.com");
        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id + 50))
            .set_json(&body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_delete_flow() {
        let db = TestDb::new().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(john())
            .to_request();
        let id: i64 = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/api/users/{}", id);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get().uri("/api/users").to_request();
        let users: Vec<User> = test::call_and_read_body_json(&app, req).await;
        assert!(users.iter().all(|u| u.id != id));

        let req = test::TestRequest::delete().uri(&uri).to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::delete().uri("/api/users/0").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_persistence_failure_is_generic_500() {
        let db = TestDb::new().await;
        let app = app!(db);

        let mut conn = db.factory.create_connection().await.unwrap();
        sqlx::raw_sql("DROP TABLE Users")
            .execute(&mut conn)
            .await
            .unwrap();
        db.factory.release(conn).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(john())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["code"], "INTERNAL_ERROR");
        assert_eq!(err["message"], ERR_CREATE_USER);
    }
}
