use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};

/// Creates a database connection
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Connected to {:?} database", db.get_database_backend());
    Ok(db)
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::DbBackend;

    #[tokio::test]
    async fn test_create_connection() {
        let db = create_connection("sqlite::memory:").await.unwrap();
        assert_eq!(db.get_database_backend(), DbBackend::Sqlite);
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_connection_rejects_unknown_scheme() {
        assert!(create_connection("nosuchdb://localhost").await.is_err());
    }
}
