//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;


use actix_web::web;

use crate::middleware::AdminOnly;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public pages
        .route("/", web::get().to(pages::index))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .route("/health", web::get().to(health::health_check))
        // Accounts
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        // Posts and comments
        .service(
            web::resource("/post/{post_id}")
                .route(web::get().to(posts::show_post))
                .route(web::post().to(posts::add_comment)),
        )
        // Admin only
        .service(
            web::resource("/new-post")
                .wrap(AdminOnly)
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{post_id}")
                .wrap(AdminOnly)
                .route(web::get().to(posts::edit_post_form))
                .route(web::post().to(posts::update_post)),
        )
        .service(
            web::resource("/delete/{post_id}")
                .wrap(AdminOnly)
                .route(web::get().to(posts::delete_post)),
        )
        .default_service(web::to(pages::not_found));
}
