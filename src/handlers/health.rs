use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::error::Result;
use crate::store::UserStore;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub registered_users: usize,
}

#[get("/health")]
pub async fn health_check(users: Option<web::Data<UserStore>>) -> Result<HttpResponse> {
    let registered_users = users.map(|store| store.user_count()).unwrap_or(0);

    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        registered_users,
    };

    Ok(HttpResponse::Ok().json(response))
}
