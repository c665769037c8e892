//! Admin pages
//!
//! Three static pages embedded in the binary: a landing page, the image
//! slot manager, and the resource manager. They talk to the REST endpoints
//! with `fetch`.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use crate::http::AppState;

const LAYOUT: &str = include_str!("../../assets/layout.html");
const HOME: &str = include_str!("../../assets/home.html");
const IMAGES: &str = include_str!("../../assets/images.html");
const RESOURCES: &str = include_str!("../../assets/resources.html");

const TITLE_MARKER: &str = "{{title}}";
const BODY_MARKER: &str = "{{body}}";
const ALLOWED_MARKER: &str = "{{allowed_images}}";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ui", get(home))
        .route("/ui/images", get(images))
        .route("/ui/resources", get(resources))
}

fn render(title: &str, body: &str) -> Html<String> {
    Html(LAYOUT.replace(TITLE_MARKER, title).replace(BODY_MARKER, body))
}

async fn home() -> Html<String> {
    render("Site Editor", HOME)
}

async fn images(State(state): State<AppState>) -> Html<String> {
    // Slot names are validated as plain lower-case .jpg names, safe to inline.
    let allowed =
        serde_json::to_string(&state.config.allowed_images).unwrap_or_else(|_| "[]".into());
    render("Edit Images", &IMAGES.replace(ALLOWED_MARKER, &allowed))
}

async fn resources() -> Html<String> {
    render("Edit Resources", RESOURCES)
}
