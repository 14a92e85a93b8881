use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    simpilot_cli::main_entry().await
}
