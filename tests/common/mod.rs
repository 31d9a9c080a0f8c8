#![allow(dead_code)]

use link_resolver::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use link_resolver::state::AppState;
use link_resolver::utils::token_codec::TokenCodec;
use sqlx::PgPool;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";
pub const WEBSITE_URL: &str = "https://www.example.com";

pub async fn create_test_link(pool: &PgPool, destination: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (destination) VALUES ($1) RETURNING id")
        .bind(destination)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn get_views(pool: &PgPool, id: i64) -> i64 {
    sqlx::query_scalar("SELECT views FROM links WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    AppState::new(
        repo,
        TokenCodec::default(),
        BASE_URL,
        Some(WEBSITE_URL.to_string()),
    )
}

pub fn create_memory_state() -> AppState {
    AppState::new(
        Arc::new(MemoryLinkRepository::new()),
        TokenCodec::default(),
        BASE_URL,
        None,
    )
}
