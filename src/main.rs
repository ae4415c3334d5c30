use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    aippt_cli::run_cli().await
}
