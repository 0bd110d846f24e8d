use workout_log::{logging, AppResult, ServerConfig};

#[tokio::main]
async fn main() -> AppResult<()> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init();

  let config = ServerConfig::from_env()?;
  if let Err(e) = workout_log::run(config).await {
    tracing::error!(error = %e, "server exited with error");
    return Err(e);
  }

  Ok(())
}
