// SkillStudio CLI entry point

use skillstudio_cli::{output, router::CommandRouter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = CommandRouter::route().await {
        output::print_error(&e.user_message());
        tracing::debug!(error = ?e, "Command failed");
        std::process::exit(1);
    }
    Ok(())
}
