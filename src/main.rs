use anyhow::Context;

use skill_buddy::config::ServerConfig;
use skill_buddy::server::build_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    eprintln!("🎓 SkillBuddy v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);
    eprintln!("   Database: {}", config.db_path.display());
    match &config.students_path {
        Some(path) => eprintln!("   Students: {}", path.display()),
        None => eprintln!("   Students: built-in demo set"),
    }
    eprintln!(
        "   Sessions: pruned after {} idle minutes\n",
        config.session_idle_minutes
    );

    let router = build_app(&config)
        .await
        .context("failed to start SkillBuddy")?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "SkillBuddy server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
