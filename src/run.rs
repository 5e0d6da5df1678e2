//! Orchestration for a single audit run: preflight, connect, fetch, filter,
//! report, close. Every stage failure is terminal; the session is closed on
//! every path once it exists.

use crate::config::{AuditConfig, DirectoryCredentials};
use crate::directory::{DirectoryClient, Session};
use crate::error::Result;
use crate::{audit, report};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Execute one audit run end to end.
pub async fn run(config: AuditConfig) -> Result<()> {
    // Preflight before any network activity
    let credentials = DirectoryCredentials::from_env()?;
    let client = DirectoryClient::new(credentials)?;

    println!("Connecting to the directory...");
    let session = client.connect().await?;

    let outcome = audit_session(&client, &session, &config).await;
    client.close(session);
    outcome
}

async fn audit_session(
    client: &DirectoryClient,
    session: &Session,
    config: &AuditConfig,
) -> Result<()> {
    let accounts = client.fetch_accounts(session).await?;
    println!("Analyzing {} accounts...", accounts.len());

    let now = Utc::now();
    let candidates = audit::find_candidates(&accounts, config, now);
    info!(
        accounts = accounts.len(),
        candidates = candidates.len(),
        threshold_days = config.threshold_days,
        "filter complete"
    );

    if candidates.is_empty() {
        println!("No inactive high-cost license holders found. No report written.");
        return Ok(());
    }

    print!("{}", report::render_table(&candidates));

    let path = report::report_path(Path::new("."), now.date_naive());
    report::write_csv(&candidates, &path)?;
    println!(
        "Found {} candidate(s). Report written to {}",
        candidates.len(),
        path.display()
    );
    Ok(())
}
