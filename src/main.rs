use exam_allocator::config::ServerConfig;
use exam_allocator::server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    server::run_server(config).await
}
