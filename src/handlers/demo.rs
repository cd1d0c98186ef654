use actix_web::{http::header, route, web, HttpResponse};
use serde::Deserialize;

use super::INDEX_PATH;
use crate::demo;
use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::session::Flash;

#[derive(Debug, Deserialize)]
pub struct EnterDemoQuery {
    #[serde(default)]
    pub user: String,
}

#[route("/Application/EnterDemo", method = "GET", method = "POST")]
pub async fn enter_demo(
    query: web::Query<EnterDemoQuery>,
    current: CurrentUser,
) -> Result<HttpResponse> {
    match demo::enter(&query.user) {
        Ok(target) => {
            log::info!("User {} entering demo room", current.id);
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, target))
                .finish())
        }
        Err(err) => {
            log::info!("Demo entry rejected for user {}: {}", current.id, err);
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, INDEX_PATH))
                .cookie(Flash::error(err.message).into_cookie())
                .finish())
        }
    }
}
