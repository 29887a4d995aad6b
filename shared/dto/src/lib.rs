use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/users`. All three fields are required and must be
/// non-blank; the handler rejects the request before it reaches the workflow
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    #[serde(rename = "personID")]
    pub person_id: String,
}

/// Body of `PUT /api/v1/users/:id`.
///
/// Absent and empty-string fields both mean "keep the existing value"; there
/// is deliberately no way to clear a field to empty through this request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

/// The summary projection returned by the list/get endpoints by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// The detail projection, the only place `person_id` and `uuid` are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: i64,
    pub name: String,
    pub surname: String,
    #[serde(rename = "personID")]
    pub person_id: String,
    pub uuid: String,
}
