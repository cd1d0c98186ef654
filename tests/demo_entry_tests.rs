mod common;

use actix_web::http::StatusCode;
use actix_web::{middleware::from_fn, test, web, App};

use chat_lobby::handlers;
use chat_lobby::middleware::identity_middleware;
use chat_lobby::oauth::{OAuthExchanger, ProfileFetcher};
use chat_lobby::session::flash::FLASH_COOKIE;
use chat_lobby::store::UserStore;

use common::{http_client, location, oauth_config, test_codec, UNREACHABLE_BASE};

macro_rules! init_app {
    ($users:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($users.clone()))
                .app_data(web::Data::new(test_codec()))
                .app_data(web::Data::new(OAuthExchanger::new(
                    oauth_config(UNREACHABLE_BASE),
                    http_client(),
                )))
                .app_data(web::Data::new(ProfileFetcher::new(
                    oauth_config(UNREACHABLE_BASE).profile_url,
                    http_client(),
                )))
                .wrap(from_fn(identity_middleware))
                .service(handlers::index)
                .service(handlers::enter_demo),
        )
    };
}

#[actix_web::test]
async fn test_enter_with_name_redirects_to_room() {
    let users = UserStore::new();
    let app = init_app!(users).await;

    let req = test::TestRequest::get()
        .uri("/Application/EnterDemo?user=alice")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/websocket/room?user=alice");
}

#[actix_web::test]
async fn test_enter_via_post_redirects_to_room() {
    let users = UserStore::new();
    let app = init_app!(users).await;

    let req = test::TestRequest::post()
        .uri("/Application/EnterDemo?user=bob")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/websocket/room?user=bob");
}

#[actix_web::test]
async fn test_enter_encodes_the_display_name() {
    let users = UserStore::new();
    let app = init_app!(users).await;

    let req = test::TestRequest::get()
        .uri("/Application/EnterDemo?user=alice%20smith")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/websocket/room?user=alice%20smith");
}

#[actix_web::test]
async fn test_enter_without_name_flashes_and_redirects_to_index() {
    let users = UserStore::new();
    let app = init_app!(users).await;

    let req = test::TestRequest::get()
        .uri("/Application/EnterDemo?user=")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/Application/Index");

    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("flash cookie set");
    assert!(!flash.value().is_empty());

    // The landing page surfaces the message once and expires the cookie.
    let req = test::TestRequest::get()
        .uri("/Application/Index")
        .cookie(actix_web::cookie::Cookie::new(
            FLASH_COOKIE,
            flash.value().to_string(),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let removal = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("flash removal cookie");
    assert_eq!(
        removal.max_age(),
        Some(actix_web::cookie::time::Duration::seconds(0))
    );
    // Path must match the cookie being expired, or the browser keeps the
    // original and the message re-surfaces on every landing render.
    assert_eq!(removal.path(), Some("/"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Please choose a nick name and the demonstration type."
    );
}

#[actix_web::test]
async fn test_enter_with_missing_parameter_is_rejected() {
    let users = UserStore::new();
    let app = init_app!(users).await;

    let req = test::TestRequest::get()
        .uri("/Application/EnterDemo")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/Application/Index");
}
