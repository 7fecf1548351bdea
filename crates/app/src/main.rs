use chrono::Utc;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let mut engine = engine::Engine::builder()
        .current_user_name(settings.ledger.current_user_name.as_str())
        .current_user_avatar(settings.ledger.current_user_avatar.as_str())
        .build();

    if settings.ledger.seed_sample_data {
        tracing::info!("Seeding sample data...");
        engine::seed::sample_data(&mut engine, Utc::now().date_naive())?;
    }

    let drifts = engine.recompute_balances();
    if drifts.is_empty() {
        tracing::debug!("balances match the transaction log");
    }
    for drift in &drifts {
        tracing::warn!(
            user_id = %drift.user_id,
            cached = %drift.cached,
            replayed = %drift.replayed,
            "repaired balance drift"
        );
    }

    let addr = settings.address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };
    server::run_with_listener(engine, listener).await?;

    Ok(())
}
