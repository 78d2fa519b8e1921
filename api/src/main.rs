use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use hill_calories_api::{
    application::http::server::http_server::{router, state},
    args::Args,
    logging::init_logger,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone())?;
    let router = router(app_state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Hill Calories listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
