use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{DbConn, EntityTrait, PrimaryKeyTrait};

use quill_core::error::RepoError;

use super::errors::db_error;

/// Generic SeaORM repository over one entity.
///
/// The concrete repositories are type aliases of this struct; the port
/// traits are implemented per entity. Repositories share one connection
/// handle through an `Arc`.
pub struct SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Fetch a row by integer primary key.
    pub(crate) async fn find_model(&self, id: i32) -> Result<Option<E::Model>, RepoError>
    where
        E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    {
        E::find_by_id(id).one(self.db.as_ref()).await.map_err(db_error)
    }
}

impl<E> Clone for SeaOrmRepository<E>
where
    E: EntityTrait,
{
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.db))
    }
}
