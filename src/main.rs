use axum::{
    Router,
    extract::Extension,
    routing::{get, post, put},
};
use axum::Json;
use bookworm::catalog::handlers::{
    handle_create_book, handle_delete_book, handle_featured_books, handle_get_book,
    handle_list_books, handle_update_book,
};
use bookworm::reviews::handlers::{
    handle_create_review, handle_delete_review, handle_list_reviews, handle_reviews_by_book,
    handle_reviews_by_user, handle_update_review, handle_vote_helpful,
};
use bookworm::seed::load_sample_data;
use bookworm::store::Store;
use bookworm::users::handlers::{handle_get_user, handle_update_user, handle_user_stats};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:5000".parse()?;
    let mut seed = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--seed" => {
                seed = true;
                i += 1;
            }
            _ => {
                eprintln!("Usage: {} [--bind <addr:port>] [--seed]", args[0]);
                std::process::exit(1);
            }
        }
    }

    let store = Arc::new(Store::new());

    if seed {
        load_sample_data(&store).await?;
    }

    let app = Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/books", get(handle_list_books).post(handle_create_book))
        .route("/api/books/featured", get(handle_featured_books))
        .route(
            "/api/books/:id",
            get(handle_get_book)
                .put(handle_update_book)
                .delete(handle_delete_book),
        )
        .route(
            "/api/reviews",
            get(handle_list_reviews).post(handle_create_review),
        )
        .route(
            "/api/reviews/:id",
            put(handle_update_review).delete(handle_delete_review),
        )
        .route("/api/reviews/:id/helpful", post(handle_vote_helpful))
        .route("/api/reviews/user/:user_id", get(handle_reviews_by_user))
        .route("/api/reviews/book/:book_id", get(handle_reviews_by_book))
        .route(
            "/api/users/:id",
            get(handle_get_user).put(handle_update_user),
        )
        .route("/api/users/:id/reviews", get(handle_reviews_by_user))
        .route("/api/users/:id/stats", get(handle_user_stats))
        .layer(Extension(store));

    tracing::info!("BookWorm API listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "BookWorm API is running",
    })
}
