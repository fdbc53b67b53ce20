#[tokio::main]
async fn main() -> anyhow::Result<()> {
    huffseed::cli::run_cli().await
}
