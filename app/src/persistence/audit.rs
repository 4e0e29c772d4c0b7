use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

use models::domains::audit_logs;

/// Appends a human-readable note to the audit sink.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    scope: &str,
    message: String,
) -> Result<(), DbErr> {
    audit_logs::ActiveModel {
        scope: Set(scope.to_owned()),
        message: Set(message),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(())
}
