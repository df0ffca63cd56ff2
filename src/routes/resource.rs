//! Resource CRUD routes: one generic router per resource, mounted under its path prefix.

use crate::handlers::resource::{create, delete as delete_handler, list, read, update};
use crate::resources::{Account, Comment, Live, Message, Post, Reel, Resource, User};
use crate::state::AppState;
use axum::{routing::get, Router};

/// `GET /`, `POST /`, `GET /:id`, `PUT /:id`, `DELETE /:id` for one resource.
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/:id",
            get(read::<R>).put(update::<R>).delete(delete_handler::<R>),
        )
}

fn mount<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&format!("/{}", R::PATH), resource_routes::<R>())
}

/// Every resource under its prefix (`/accounts`, `/users`, ...).
pub fn api_routes(state: AppState) -> Router {
    let router = Router::new();
    let router = mount::<Account>(router);
    let router = mount::<User>(router);
    let router = mount::<Post>(router);
    let router = mount::<Comment>(router);
    let router = mount::<Message>(router);
    let router = mount::<Live>(router);
    let router = mount::<Reel>(router);
    router.with_state(state)
}
