#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = task_server::config::Config::from_env()?;
    task_server::start_server(config).await
}
