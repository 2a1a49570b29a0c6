use std::net::TcpListener;

use env_logger::Env;
use prospector::{configuration::get_configuration, services::ApolloClient, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    let apollo_client = ApolloClient::new(&configuration.apollo)?;

    log::info!("Listening on {}", address);
    run(listener, apollo_client)?.await?;

    Ok(())
}
