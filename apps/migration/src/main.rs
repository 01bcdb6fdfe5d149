//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` (or `-u <url>`) and runs `up`, `down`, `status`,
//! `fresh`, `refresh` or `reset` against the blog schema. The CLI installs
//! its own tracing subscriber.

use quill_migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
