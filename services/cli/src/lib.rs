mod batch;
mod cli;
mod console;
mod demo;
mod infra;

use expense_approval::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
