//! HTTP handlers and route configuration.

mod health;
mod todo;
mod wedding;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Manager workspace. Every todo route is a POST.
            .service(
                web::scope("/todo")
                    .route("/create", web::post().to(todo::create))
                    .route("/get-one/{id}", web::post().to(todo::get_one))
                    .route("/find-one", web::get().to(todo::find_one))
                    .route("/get-list", web::post().to(todo::get_list))
                    .route("/update/{id}", web::post().to(todo::update))
                    .route("/delete/{id}", web::post().to(todo::delete))
                    .route("/hard-delete/{id}", web::post().to(todo::hard_delete)),
            )
            // Guestbook: signing is public, curation is admin-only
            .service(
                web::scope("/wedding")
                    .route("/comment", web::post().to(wedding::comment))
                    .route("/wish", web::post().to(wedding::wish))
                    .route("/upload-image", web::post().to(wedding::upload_image))
                    .route("/upload-video", web::post().to(wedding::upload_video))
                    .route("/get-comments", web::post().to(wedding::get_comments))
                    .route("/get-wishes", web::post().to(wedding::get_wishes))
                    .route("/get-users", web::post().to(wedding::get_users))
                    .route("/get-media", web::post().to(wedding::get_media)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;

    #[actix_web::test]
    async fn every_todo_route_answers_to_post() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let id = "00000000-0000-0000-0000-000000000000";

        for path in [
            "/api/v1/todo/create".to_owned(),
            format!("/api/v1/todo/get-one/{id}"),
            "/api/v1/todo/get-list".to_owned(),
            format!("/api/v1/todo/update/{id}"),
            format!("/api/v1/todo/delete/{id}"),
            format!("/api/v1/todo/hard-delete/{id}"),
        ] {
            let req = test::TestRequest::post().uri(&path).to_request();
            let res = test::call_service(&app, req).await;
            assert_ne!(
                res.status(),
                StatusCode::NOT_FOUND,
                "POST {path} is not routed"
            );
        }
    }
}
