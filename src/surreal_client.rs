use surrealdb::engine::any::Any;
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::{ debug, info };

use crate::error::Result;
use crate::models::{ package_record, user_record, StarredRelation };

#[derive(Debug, Clone)]
pub struct SurrealConnectionConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
}

#[derive(Clone, Debug)]
pub struct SurrealClient {
    pub db: Surreal<Any>,
}

impl SurrealClient {
    /// Connect, sign in as root and select the namespace/database
    pub async fn connect(config: &SurrealConnectionConfig) -> Result<Self> {
        info!("Connecting to SurrealDB at {}", config.url);

        let db = surrealdb::engine::any::connect(&config.url).await?;

        db.signin(Root {
            username: &config.username,
            password: &config.password,
        }).await?;

        db.use_ns(&config.namespace).use_db(&config.database).await?;

        info!("Successfully connected to SurrealDB");
        Ok(Self { db })
    }

    /// Record that `username` starred `package`. Any earlier edge for the
    /// pair is replaced so a user holds at most one star per package.
    pub async fn star(&self, package: &str, username: &str) -> Result<()> {
        let query =
            r#"
            BEGIN TRANSACTION;
            UPSERT $user SET name = $username;
            UPSERT $package SET name = $package_name;
            DELETE starred WHERE in = $user AND out = $package;
            RELATE $user->starred->$package SET starred_at = time::now();
            COMMIT TRANSACTION;
        "#;

        self.db
            .query(query)
            .bind(("user", user_record(username)))
            .bind(("username", username.to_string()))
            .bind(("package", package_record(package)))
            .bind(("package_name", package.to_string())).await?
            .check()?;

        debug!("Stored star {} -> {}", username, package);
        Ok(())
    }

    pub async fn unstar(&self, package: &str, username: &str) -> Result<()> {
        let query =
            r#"
            DELETE starred WHERE in = $user AND out = $package;
        "#;

        self.db
            .query(query)
            .bind(("user", user_record(username)))
            .bind(("package", package_record(package))).await?
            .check()?;

        debug!("Removed star {} -> {}", username, package);
        Ok(())
    }

    pub async fn get_star(&self, package: &str, username: &str) -> Result<Option<StarredRelation>> {
        let query =
            r#"
            SELECT * FROM starred WHERE in = $user AND out = $package LIMIT 1;
        "#;

        let mut result = self.db
            .query(query)
            .bind(("user", user_record(username)))
            .bind(("package", package_record(package))).await?;

        let stars: Vec<StarredRelation> = result.take(0)?;
        Ok(stars.into_iter().next())
    }

    pub async fn ping(&self) -> Result<()> {
        self.db.query("SELECT 1").await?.check()?;
        Ok(())
    }
}
