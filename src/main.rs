mod api;
mod cli;
mod columns;
mod config;
mod error;
mod models;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
