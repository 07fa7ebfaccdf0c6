//! Migration CLI tool.

use sea_orm_migration::prelude::*;

mod migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(migrator::Migrator).await;
}
