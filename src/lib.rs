mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use selfcheck_core::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
