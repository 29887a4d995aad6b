use std::sync::Arc;

use dto::{CreateUserRequest, UpdateUserRequest, UserDetail, UserSummary};
use models::User;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::{StoreError, UserStore};
use crate::whitelist::PersonIdWhitelist;

/// Orchestrates validation and persistence for the user CRUD operations.
/// Each operation is a single round trip of at most two store calls.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    whitelist: Arc<PersonIdWhitelist>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, whitelist: Arc<PersonIdWhitelist>) -> Self {
        Self { store, whitelist }
    }

    /// Create a user. The whitelist check runs before any store call and the
    /// uniqueness check before the insert, so an invalid personID never
    /// reaches the database and a used one never triggers an insert.
    pub async fn create(&self, req: CreateUserRequest) -> Result<UserDetail, ApiError> {
        tracing::info!(
            name = %req.name,
            surname = %req.surname,
            person_id = %req.person_id,
            "creating user"
        );

        if !self.whitelist.is_valid(&req.person_id) {
            return Err(ApiError::InvalidPersonId(req.person_id));
        }

        if self.store.exists_by_person_id(&req.person_id).await? {
            return Err(ApiError::PersonIdAlreadyUsed(req.person_id));
        }

        let uuid = Uuid::new_v4().to_string();
        let id = match self
            .store
            .insert(&req.name, &req.surname, &req.person_id, &uuid)
            .await
        {
            Ok(id) => id,
            // The unique constraint is the authoritative uniqueness signal;
            // the exists check above is only fast-path rejection and two
            // concurrent creates can both get past it.
            Err(StoreError::DuplicatePersonId) => {
                return Err(ApiError::PersonIdAlreadyUsed(req.person_id));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(id, %uuid, "user created");

        Ok(UserDetail {
            id,
            name: req.name,
            surname: req.surname,
            person_id: req.person_id,
            uuid,
        })
    }

    pub async fn get(&self, id: i64) -> Result<UserSummary, ApiError> {
        tracing::debug!(id, "fetching user (basic)");

        let user = self.find_existing(id).await?;
        Ok(UserSummary {
            id: user.id,
            name: user.name,
            surname: user.surname,
        })
    }

    pub async fn get_detail(&self, id: i64) -> Result<UserDetail, ApiError> {
        tracing::debug!(id, "fetching user (detail)");

        let user = self.find_existing(id).await?;
        Ok(detail_view(user))
    }

    pub async fn get_all(&self) -> Result<Vec<UserSummary>, ApiError> {
        tracing::debug!("fetching all users (basic)");

        let users = self.store.find_all().await?;
        Ok(users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                name: u.name,
                surname: u.surname,
            })
            .collect())
    }

    pub async fn get_all_detail(&self) -> Result<Vec<UserDetail>, ApiError> {
        tracing::debug!("fetching all users (detail)");

        let users = self.store.find_all().await?;
        Ok(users.into_iter().map(detail_view).collect())
    }

    /// Partial update: a supplied non-empty value wins, anything else keeps
    /// the stored value. Empty string and absent field are equivalent; there
    /// is no way to clear a field to empty.
    pub async fn update(&self, id: i64, req: UpdateUserRequest) -> Result<(), ApiError> {
        tracing::info!(id, "updating user");

        let current = self.find_existing(id).await?;
        let name = merge(req.name, current.name);
        let surname = merge(req.surname, current.surname);

        self.store.update(id, &name, &surname).await?;
        tracing::info!(id, "user updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        tracing::info!(id, "deleting user");

        self.find_existing(id).await?;
        self.store.delete(id).await?;
        tracing::info!(id, "user deleted");
        Ok(())
    }

    async fn find_existing(&self, id: i64) -> Result<User, ApiError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound(id))
    }
}

fn detail_view(user: User) -> UserDetail {
    UserDetail {
        id: user.id,
        name: user.name,
        surname: user.surname,
        person_id: user.person_id,
        uuid: user.uuid,
    }
}

fn merge(supplied: Option<String>, existing: String) -> String {
    match supplied {
        Some(value) if !value.is_empty() => value,
        _ => existing,
    }
}
