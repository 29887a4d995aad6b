use serde::{Deserialize, Serialize};

/// A persisted user row.
///
/// `person_id` is externally assigned and immutable once the row exists;
/// `uuid` is generated at creation and never changes. Only `name` and
/// `surname` are mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub person_id: String,
    pub uuid: String,
}
