use colored::Colorize;
use log::{error, info};
use std::{env, sync::Arc};
use thiserror::Error;

use stayvista_core::{PgDatabase, Stayvista, StayvistaConfig};
use stayvista_server::{run_server, ServerContext};

mod logging;

#[derive(Debug, Error)]
enum StartupError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),

    #[error("Could not initialize database: {0}")]
    Database(String),
}

impl StartupError {
    fn hint(&self) -> String {
        match self {
            StartupError::MissingVariable(_) => {
                "Set the variable in the environment or an .env file, then try again.".to_string()
            }
            StartupError::Database(_) => {
                "This is a database error. Make sure the postgres instance behind DATABASE_URL is running and reachable, then try again."
                    .to_string()
            }
        }
    }
}

fn required_var(name: &'static str) -> Result<String, StartupError> {
    env::var(name).map_err(|_| StartupError::MissingVariable(name))
}

async fn init() -> Result<ServerContext, StartupError> {
    let database_url = required_var("DATABASE_URL")?;

    let config = StayvistaConfig {
        token_secret: required_var("ACCESS_TOKEN_SECRET")?,
        stripe_secret_key: required_var("STRIPE_SECRET_KEY")?,
    };

    let secure_cookies = env::var("STAYVISTA_ENV")
        .map(|x| x == "production")
        .unwrap_or(false);

    info!("Connecting to database...");

    let database = PgDatabase::new(&database_url)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    Ok(ServerContext {
        stayvista: Arc::new(Stayvista::new(database, config)),
        secure_cookies,
    })
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_logger();

    match init().await {
        Ok(context) => {
            info!("Initialized successfully.");
            run_server(context).await;
        }
        Err(error) => {
            error!(
                "{} Read the error below to troubleshoot the issue. If you think this might be a bug, please report it by making a GitHub issue.",
                "StayVista failed to start!".bold().red()
            );
            error!("{}", error);
            error!(
                "{}",
                format!("Hint: {}", error.hint()).bright_black().italic()
            );
        }
    }
}
