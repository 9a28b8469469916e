#[macro_use]
extern crate rocket;

pub mod auth;
pub mod catchers;
pub mod config;
pub mod errors;
pub mod fairings;
pub mod logging;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

use config::AppConfig;
use fairings::trace::RequestTrace;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};

/// Routes, catchers and fairings of the posts API, without a store.
///
/// Callers attach [`fairings::db::DBConnection::mysql`] or manage a
/// `DBConnection` of their own before launching.
pub fn app() -> Rocket<Build> {
    rocket::build()
        .attach(AdHoc::config::<AppConfig>())
        .attach(RequestTrace)
        .mount(
            "/",
            routes![
                routes::post::get_posts,
                routes::post::get_post,
                routes::post::get_user_posts,
                routes::post::create_post,
                routes::post::update_post,
                routes::post::delete_post,
            ],
        )
        .register(
            "/",
            catchers![
                catchers::bad_request,
                catchers::unauthorized,
                catchers::not_found,
                catchers::unprocessable_entity,
                catchers::internal_server_error
            ],
        )
}
