mod cli;
mod render;

use bnb_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
