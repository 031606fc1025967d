pub mod commands;
pub mod platform;
pub mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    commands::run().await
}
