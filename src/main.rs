use fuelmap::config::Config;
use fuelmap::engine::Engine;
use fuelmap::error::Error;
use fuelmap::server::serve;
use fuelmap::theme::ThemeStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    if let Err(err) = run().await {
        tracing::error!("fuelmap stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let engine = Engine::new(&config)?;

    serve(engine, ThemeStore::global().clone(), config.addr).await
}
