use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigService;
use std::io;
use tracing_subscriber::EnvFilter;

pub fn run() -> io::Result<()> {
    // a missing .env is normal
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = ConfigService::load()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    actix_web::rt::System::new().block_on(async move {
        bootstrap::serve(config)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    })
}
