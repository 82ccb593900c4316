use dotenvy::dotenv;
use order_settlement::errors::StartupError;
use order_settlement::{build_server, create_pool, run_migrations, Config};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.db_pool_size)?;
    run_migrations(&pool)?;

    log::info!(
        "Starting server at http://{}:{} (docs at /swagger-ui/)",
        config.host,
        config.port
    );

    build_server(pool, &config.host, config.port)?.await?;
    Ok(())
}
