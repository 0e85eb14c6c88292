use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;
use surrealdb::RecordId;

pub const USER_TABLE: &str = "registry_user";
pub const PACKAGE_TABLE: &str = "package";
pub const STARRED_TABLE: &str = "starred";

/// Registry user node, keyed by username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryUser {
    pub id: RecordId,
    pub name: String,
}

/// Package node, keyed by package name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: RecordId,
    pub name: String,
}

/// Starred relationship (registry_user -> starred -> package)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarredRelation {
    pub id: RecordId,
    pub r#in: RecordId,
    pub out: RecordId,
    pub starred_at: Datetime,
}

pub fn user_record(username: &str) -> RecordId {
    RecordId::from((USER_TABLE, username))
}

pub fn package_record(package: &str) -> RecordId {
    RecordId::from((PACKAGE_TABLE, package))
}
