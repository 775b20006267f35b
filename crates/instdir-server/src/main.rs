use instdir_server::{config::Config, init_tracing, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    start_server(Config::load()).await
}
