use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter,
};
use tracing::{info, instrument};

use crate::{
    entities::{
        internal_order_product,
        position::{self, Entity as PositionEntity, Model as PositionModel},
        restock_order_product,
        sku::{self, ActiveModel as SkuActiveModel, Entity as SkuEntity, Model as SkuModel},
        sku_item, test_descriptor,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Replacement field set applied by a SKU modification.
#[derive(Debug, Clone)]
pub struct SkuUpdate {
    pub description: String,
    pub weight: i32,
    pub volume: i32,
    pub notes: Option<String>,
    pub price: Decimal,
    pub available_quantity: i32,
}

/// A SKU with its denormalized read-model fields: the 12-digit id of the
/// held position (if any) and the attached test-descriptor ids.
#[derive(Debug, Clone)]
pub struct SkuRecord {
    pub sku: SkuModel,
    pub position: Option<String>,
    pub test_descriptors: Vec<i32>,
}

/// SKU catalog operations plus the capacity propagator: whenever an assigned
/// SKU's quantity or position changes, the occupied weight/volume of the
/// affected position rows are rewritten to match.
///
/// Detaching resets the old position's occupancy to zero rather than
/// subtracting this SKU's contribution. That is correct under the
/// one-SKU-per-position assignment rule enforced here and keeps the ledger
/// self-healing; shared positions would need signed delta accounting.
#[derive(Clone)]
pub struct SkuService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl SkuService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SkuRecord>, ServiceError> {
        let db = &*self.db;
        let skus = SkuEntity::find().all(db).await?;

        let mut records = Vec::with_capacity(skus.len());
        for sku in skus {
            records.push(self.load_record(sku).await?);
        }
        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, sku_id: i32) -> Result<Option<SkuRecord>, ServiceError> {
        let db = &*self.db;
        match SkuEntity::find_by_id(sku_id).one(db).await? {
            Some(sku) => Ok(Some(self.load_record(sku).await?)),
            None => Ok(None),
        }
    }

    /// Creates a SKU with no position assigned.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        description: String,
        weight: i32,
        volume: i32,
        notes: Option<String>,
        price: Decimal,
        available_quantity: i32,
    ) -> Result<i32, ServiceError> {
        let db = &*self.db;

        let sku = SkuActiveModel {
            description: Set(description),
            weight: Set(weight),
            volume: Set(volume),
            notes: Set(notes),
            price: Set(price),
            available_quantity: Set(available_quantity),
            position_id: Set(None),
            ..Default::default()
        };
        let inserted = sku.insert(db).await?;

        info!(sku_id = inserted.id, "SKU created");
        self.event_sender
            .send_or_log(Event::SkuCreated(inserted.id))
            .await;

        Ok(inserted.id)
    }

    /// Applies a field update. When the SKU holds a position and the
    /// available quantity changes, the position's occupied figures are
    /// rewritten as `new_quantity x new_weight` / `new_quantity x new_volume`
    /// before the SKU row itself is touched.
    #[instrument(skip(self, update))]
    pub async fn modify(&self, sku_id: i32, update: SkuUpdate) -> Result<(), ServiceError> {
        let db = &*self.db;

        let sku = SkuEntity::find_by_id(sku_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No SKU with matching id".to_string()))?;

        if let Some(position_id) = sku.position_id {
            if update.available_quantity != sku.available_quantity {
                let position = PositionEntity::find_by_id(position_id)
                    .one(db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound("The provided position does not exist.".to_string())
                    })?;
                self.write_occupancy(
                    position,
                    update.available_quantity * update.weight,
                    update.available_quantity * update.volume,
                )
                .await?;
            }
        }

        let mut active: SkuActiveModel = sku.into();
        active.description = Set(update.description);
        active.weight = Set(update.weight);
        active.volume = Set(update.volume);
        active.notes = Set(update.notes);
        active.price = Set(update.price);
        active.available_quantity = Set(update.available_quantity);
        active.update(db).await?;

        self.event_sender.send_or_log(Event::SkuUpdated(sku_id)).await;

        Ok(())
    }

    /// Moves the SKU onto the position named by the 12-digit id. The target
    /// position receives this SKU's full weight/volume contribution; the
    /// previously held position (if any) is reset to zero occupancy. A
    /// position already assigned to another SKU is refused.
    #[instrument(skip(self))]
    pub async fn assign_position(
        &self,
        sku_id: i32,
        position_id: &str,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let sku = SkuEntity::find_by_id(sku_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No SKU with matching id".to_string()))?;

        let target = PositionEntity::find()
            .filter(position::Column::PositionId.eq(position_id))
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("The provided position does not exist.".to_string())
            })?;

        if sku.position_id == Some(target.id) {
            return Ok(());
        }

        let occupant = SkuEntity::find()
            .filter(sku::Column::PositionId.eq(target.id))
            .filter(sku::Column::Id.ne(sku_id))
            .count(db)
            .await?;
        if occupant > 0 {
            return Err(ServiceError::ValidationError(
                "Position already assigned to another SKU.".to_string(),
            ));
        }

        let new_weight = target.occupied_weight + sku.available_quantity * sku.weight;
        let new_volume = target.occupied_volume + sku.available_quantity * sku.volume;
        let target_public_id = target.position_id.clone();
        self.write_occupancy(target.clone(), new_weight, new_volume)
            .await?;

        if let Some(old_position_id) = sku.position_id {
            if let Some(old_position) = PositionEntity::find_by_id(old_position_id).one(db).await? {
                self.write_occupancy(old_position, 0, 0).await?;
            }
        }

        let mut active: SkuActiveModel = sku.into();
        active.position_id = Set(Some(target.id));
        active.update(db).await?;

        info!(sku_id, position_id = %target_public_id, "SKU position assigned");
        self.event_sender
            .send_or_log(Event::SkuPositionAssigned {
                sku_id,
                position_id: target_public_id,
            })
            .await;

        Ok(())
    }

    /// Deletes the SKU. Refused while physical instances, test descriptors,
    /// or order lines still reference it; a held position is released (reset
    /// to zero occupancy) first.
    #[instrument(skip(self))]
    pub async fn delete(&self, sku_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db;

        let sku = match SkuEntity::find_by_id(sku_id).one(db).await? {
            Some(sku) => sku,
            None => return Ok(()),
        };

        if self.is_referenced(sku_id).await? {
            return Err(ServiceError::ValidationError(
                "SKU is referenced by other records. Delete aborted.".to_string(),
            ));
        }

        if let Some(position_id) = sku.position_id {
            if let Some(position) = PositionEntity::find_by_id(position_id).one(db).await? {
                self.write_occupancy(position, 0, 0).await?;
            }
        }

        sku.delete(db).await?;
        self.event_sender.send_or_log(Event::SkuDeleted(sku_id)).await;

        Ok(())
    }

    async fn is_referenced(&self, sku_id: i32) -> Result<bool, ServiceError> {
        let db = &*self.db;

        let instances = sku_item::Entity::find()
            .filter(sku_item::Column::SkuId.eq(sku_id))
            .count(db)
            .await?;
        if instances > 0 {
            return Ok(true);
        }

        let descriptors = test_descriptor::Entity::find()
            .filter(test_descriptor::Column::IdSku.eq(sku_id))
            .count(db)
            .await?;
        if descriptors > 0 {
            return Ok(true);
        }

        let restock_lines = restock_order_product::Entity::find()
            .filter(restock_order_product::Column::SkuId.eq(sku_id))
            .count(db)
            .await?;
        if restock_lines > 0 {
            return Ok(true);
        }

        let internal_lines = internal_order_product::Entity::find()
            .filter(internal_order_product::Column::SkuId.eq(sku_id))
            .count(db)
            .await?;
        Ok(internal_lines > 0)
    }

    async fn write_occupancy(
        &self,
        position: PositionModel,
        occupied_weight: i32,
        occupied_volume: i32,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;
        let public_id = position.position_id.clone();

        let mut active: position::ActiveModel = position.into();
        active.occupied_weight = Set(occupied_weight);
        active.occupied_volume = Set(occupied_volume);
        active.update(db).await?;

        self.event_sender
            .send_or_log(Event::PositionOccupancyChanged {
                position_id: public_id,
                occupied_weight,
                occupied_volume,
            })
            .await;

        Ok(())
    }

    async fn load_record(&self, sku: SkuModel) -> Result<SkuRecord, ServiceError> {
        let db = &*self.db;

        let position = match sku.position_id {
            Some(position_id) => PositionEntity::find_by_id(position_id)
                .one(db)
                .await?
                .map(|p| p.position_id),
            None => None,
        };

        let test_descriptors = test_descriptor::Entity::find()
            .filter(test_descriptor::Column::IdSku.eq(sku.id))
            .all(db)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        Ok(SkuRecord {
            sku,
            position,
            test_descriptors,
        })
    }
}
