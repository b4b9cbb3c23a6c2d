use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use tracing::instrument;

use crate::{
    entities::supplier::{ActiveModel as SupplierActiveModel, Entity as SupplierEntity, Model as SupplierModel},
    errors::ServiceError,
};

/// Supplier directory. Restock-order creation checks references against it.
#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DatabaseConnection>,
}

impl SupplierService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SupplierModel>, ServiceError> {
        let db = &*self.db;
        Ok(SupplierEntity::find().all(db).await?)
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: String) -> Result<i32, ServiceError> {
        let db = &*self.db;
        let supplier = SupplierActiveModel {
            name: Set(name),
            ..Default::default()
        };
        let inserted = supplier.insert(db).await?;
        Ok(inserted.id)
    }
}
