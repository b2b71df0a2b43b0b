use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::user::Model as UserModel;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts a user with a display name derived from `username`.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> UserModel {
    UserModel::create(db, username, &format!("{username} (test)"))
        .await
        .expect("Failed to create test user")
}
