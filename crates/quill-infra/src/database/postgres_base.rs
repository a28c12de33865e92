use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, OwnedRepository};

/// An entity that belongs to a user through an owner column.
pub trait OwnedEntity: EntityTrait {
    fn id_column() -> Self::Column;

    fn owner_column() -> Self::Column;
}

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Name of the violated constraint in a Postgres error message.
fn constraint_name(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("constraint \"")?;
    rest.split_once('"').map(|(name, _)| name)
}

/// Driver errors that only carry Postgres' message text (the mock driver, for one).
fn classify_message(message: &str) -> Option<SqlErr> {
    if message.contains("violates unique constraint") {
        Some(SqlErr::UniqueConstraintViolation(message.to_string()))
    } else if message.contains("violates foreign key constraint") {
        Some(SqlErr::ForeignKeyConstraintViolation(message.to_string()))
    } else {
        None
    }
}

/// Map a sea-orm error to a `RepoError`.
///
/// Constraint violations keep only the constraint name, so the raw SQL error
/// never leaves this crate.
pub(crate) fn query_error(err: DbErr) -> RepoError {
    let message = err.to_string();
    let classified = err.sql_err().or_else(|| classify_message(&message));

    match classified {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Unique constraint violated");
            RepoError::Constraint(constraint_name(&detail).unwrap_or("unique").to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Foreign key constraint violated");
            RepoError::ForeignKey(constraint_name(&detail).unwrap_or("foreign_key").to_string())
        }
        _ => RepoError::Query(message),
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        Ok(model.into())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepoError::NotFound,
            other => query_error(other),
        })?;

        Ok(model.into())
    }
}

#[async_trait]
impl<E, T> OwnedRepository<T> for PostgresBaseRepository<E>
where
    E: OwnedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> Result<Option<T>, RepoError> {
        tracing::debug!(%id, %owner_id, "Owner-scoped lookup");

        let result = E::find()
            .filter(E::id_column().eq(id))
            .filter(E::owner_column().eq(owner_id))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> Result<(), RepoError> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .filter(E::owner_column().eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::constraint_name;

    #[test]
    fn extracts_constraint_name() {
        assert_eq!(
            constraint_name(r#"duplicate key value violates unique constraint "users_email_key""#),
            Some("users_email_key")
        );
        assert_eq!(constraint_name("connection reset"), None);
    }
}
