pub mod auth;
pub mod demo;
pub mod health;
pub mod landing;

pub use auth::{auth_callback, logout};
pub use demo::enter_demo;
pub use health::health_check;
pub use landing::{index, root};

use actix_web::{http::header, HttpResponse};

pub const INDEX_PATH: &str = "/Application/Index";

pub(crate) fn redirect_to(target: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .finish()
}
