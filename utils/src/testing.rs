use migration::sea_orm::{Database, DatabaseConnection, DbErr};

/// Connects to a throwaway database (tests pass `sqlite::memory:`) and
/// brings it to the current schema.
pub async fn setup_test_db(url: &str) -> Result<DatabaseConnection, DbErr> {
    let conn = Database::connect(url).await?;
    crate::db::migrate(&conn).await?;
    Ok(conn)
}
