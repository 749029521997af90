use ant_savings::{
    config::{database, expense_types},
    core::{expense_type, goal, report},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables can also be set externally
    if dotenv().is_err() {
        info!("No .env file found, using process environment");
    }

    // 3. Load the expense type catalogue
    let app_config = expense_types::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed expense types missing from the database
    expense_type::seed_expense_types(&db, &app_config.expense_types).await?;

    // 6. Complete any goal whose avoided total already reached its target
    let completed = goal::reconcile_active_goals(&db).await?;
    for finished in &completed {
        info!(goal_id = finished.id, name = %finished.name, "Goal reached its target");
    }

    // 7. Report on the goals that are still running
    let active = goal::get_active_goals(&db).await?;
    if active.is_empty() {
        warn!("No active savings goals");
    }
    for running in active {
        let summary = report::get_goal_summary(&db, running.id).await?;
        info!(
            goal_id = summary.id,
            owner = %summary.owner_name,
            saved = %format!("{:.2}/{:.2}", summary.total_avoided, summary.target_amount),
            progress = %format!("{:.1}%", summary.progress_percent),
            per_day = %format!("{:.2}", summary.daily_savings_needed),
            "{}",
            summary.name
        );
    }

    Ok(())
}
