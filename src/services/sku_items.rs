use std::sync::Arc;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter,
};
use tracing::{info, instrument};

use crate::{
    entities::{
        sku::Entity as SkuEntity,
        sku_item::{self, ActiveModel as SkuItemActiveModel, Entity as SkuItemEntity, Model as SkuItemModel},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

/// CRUD over individually RFID-tagged physical stock units.
#[derive(Clone)]
pub struct SkuItemService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl SkuItemService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SkuItemModel>, ServiceError> {
        let db = &*self.db;
        Ok(SkuItemEntity::find().all(db).await?)
    }

    /// Lists the available instances of one SKU. The SKU itself must exist.
    #[instrument(skip(self))]
    pub async fn list_by_sku(&self, sku_id: i32) -> Result<Vec<SkuItemModel>, ServiceError> {
        let db = &*self.db;

        SkuEntity::find_by_id(sku_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Provided id [{}] does not match any SKU", sku_id))
            })?;

        Ok(SkuItemEntity::find()
            .filter(sku_item::Column::SkuId.eq(sku_id))
            .filter(sku_item::Column::Available.eq(true))
            .all(db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, rfid: &str) -> Result<Option<SkuItemModel>, ServiceError> {
        let db = &*self.db;
        Ok(SkuItemEntity::find_by_id(rfid.to_string()).one(db).await?)
    }

    /// Registers a new instance, unavailable until stocked. The referenced
    /// SKU must exist.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        rfid: String,
        sku_id: i32,
        date_of_stock: Option<String>,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let sku = SkuEntity::find_by_id(sku_id).one(db).await?;
        if sku.is_none() {
            return Err(ServiceError::DependencyViolation(format!(
                "Provided id [{}] does not match any SKU",
                sku_id
            )));
        }

        let item = SkuItemActiveModel {
            rfid: Set(rfid.clone()),
            sku_id: Set(sku_id),
            available: Set(false),
            date_of_stock: Set(date_of_stock),
        };
        item.insert(db).await?;

        info!(%rfid, sku_id, "SKU item registered");
        self.event_sender
            .send_or_log(Event::SkuItemRegistered { rfid, sku_id })
            .await;

        Ok(())
    }

    /// Rewrites RFID, availability, and stock date in place. The RFID is the
    /// primary key, so this goes through an update-by-filter rather than the
    /// active model.
    #[instrument(skip(self))]
    pub async fn modify(
        &self,
        rfid: &str,
        new_rfid: String,
        new_available: bool,
        new_date_of_stock: Option<String>,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let result = SkuItemEntity::update_many()
            .col_expr(sku_item::Column::Rfid, Expr::value(new_rfid.clone()))
            .col_expr(sku_item::Column::Available, Expr::value(new_available))
            .col_expr(
                sku_item::Column::DateOfStock,
                Expr::value(new_date_of_stock),
            )
            .filter(sku_item::Column::Rfid.eq(rfid))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(
                "No SKU item with matching rfid".to_string(),
            ));
        }

        self.event_sender
            .send_or_log(Event::SkuItemUpdated { rfid: new_rfid })
            .await;

        Ok(())
    }

    /// Deletes by RFID. Idempotent.
    #[instrument(skip(self))]
    pub async fn delete(&self, rfid: &str) -> Result<(), ServiceError> {
        let db = &*self.db;

        let result = SkuItemEntity::delete_many()
            .filter(sku_item::Column::Rfid.eq(rfid))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            self.event_sender
                .send_or_log(Event::SkuItemDeleted {
                    rfid: rfid.to_string(),
                })
                .await;
        }

        Ok(())
    }
}
