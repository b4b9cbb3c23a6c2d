use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};
use tracing::{info, instrument};

use crate::{
    entities::{
        position::{
            self, ActiveModel as PositionActiveModel, Entity as PositionEntity,
            Model as PositionModel,
        },
        sku::{self, Entity as SkuEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    validation::split_position_id,
};

/// Replacement field set applied by a position modification. The public id
/// is recomputed from the three segments.
#[derive(Debug, Clone)]
pub struct PositionUpdate {
    pub aisle: String,
    pub row: String,
    pub col: String,
    pub max_weight: i32,
    pub max_volume: i32,
    pub occupied_weight: i32,
    pub occupied_volume: i32,
}

/// The position ledger: slot capacity and current occupancy. Occupancy is
/// written by the SKU capacity propagator and by the full-field modify
/// operation; `occupied <= max` is documented but not enforced here.
#[derive(Clone)]
pub struct PositionService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl PositionService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PositionModel>, ServiceError> {
        let db = &*self.db;
        Ok(PositionEntity::find().all(db).await?)
    }

    /// Creates an empty position. The 12-digit id must equal the
    /// concatenation of the three segments (checked by the caller) and must
    /// not already exist.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        position_id: String,
        aisle: String,
        row: String,
        col: String,
        max_weight: i32,
        max_volume: i32,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        if self.find_by_public_id(&position_id).await?.is_some() {
            return Err(ServiceError::ValidationError(
                "Position already in database.".to_string(),
            ));
        }

        let row_model = PositionActiveModel {
            position_id: Set(position_id.clone()),
            aisle: Set(aisle),
            row: Set(row),
            col: Set(col),
            max_weight: Set(max_weight),
            max_volume: Set(max_volume),
            occupied_weight: Set(0),
            occupied_volume: Set(0),
            ..Default::default()
        };
        row_model.insert(db).await?;

        info!(%position_id, "Position created");
        self.event_sender
            .send_or_log(Event::PositionCreated(position_id))
            .await;

        Ok(())
    }

    /// Full-field rewrite, occupied figures included. The public id is
    /// re-derived from the new segments; moving onto an id that is already
    /// taken is refused.
    #[instrument(skip(self, update))]
    pub async fn modify(
        &self,
        position_id: &str,
        update: PositionUpdate,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let current = self
            .find_by_public_id(position_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No position with matching id".to_string()))?;

        let new_public_id = format!("{}{}{}", update.aisle, update.row, update.col);
        if new_public_id != current.position_id
            && self.find_by_public_id(&new_public_id).await?.is_some()
        {
            return Err(ServiceError::ValidationError(
                "New position already in database.".to_string(),
            ));
        }

        let occupied_weight = update.occupied_weight;
        let occupied_volume = update.occupied_volume;

        let mut active: PositionActiveModel = current.into();
        active.position_id = Set(new_public_id.clone());
        active.aisle = Set(update.aisle);
        active.row = Set(update.row);
        active.col = Set(update.col);
        active.max_weight = Set(update.max_weight);
        active.max_volume = Set(update.max_volume);
        active.occupied_weight = Set(occupied_weight);
        active.occupied_volume = Set(occupied_volume);
        active.update(db).await?;

        self.event_sender
            .send_or_log(Event::PositionOccupancyChanged {
                position_id: new_public_id,
                occupied_weight,
                occupied_volume,
            })
            .await;

        Ok(())
    }

    /// Renames the position to another (validated) 12-digit id; the segments
    /// are re-derived from the new id.
    #[instrument(skip(self))]
    pub async fn change_id(
        &self,
        position_id: &str,
        new_position_id: &str,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let current = self
            .find_by_public_id(position_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No position with matching id".to_string()))?;

        if new_position_id != current.position_id
            && self.find_by_public_id(new_position_id).await?.is_some()
        {
            return Err(ServiceError::ValidationError(
                "New position already in database.".to_string(),
            ));
        }

        let (aisle, row, col) = split_position_id(new_position_id).ok_or_else(|| {
            ServiceError::ValidationError("Invalid position id.".to_string())
        })?;

        let mut active: PositionActiveModel = current.into();
        active.position_id = Set(new_position_id.to_string());
        active.aisle = Set(aisle);
        active.row = Set(row);
        active.col = Set(col);
        active.update(db).await?;

        Ok(())
    }

    /// Deletes the position, clearing the referencing SKU's backreference
    /// first. Idempotent: an absent id is a no-op.
    #[instrument(skip(self))]
    pub async fn delete(&self, position_id: &str) -> Result<(), ServiceError> {
        let db = &*self.db;

        if let Some(current) = self.find_by_public_id(position_id).await? {
            let holders = SkuEntity::find()
                .filter(sku::Column::PositionId.eq(current.id))
                .all(db)
                .await?;
            for holder in holders {
                let mut active: sku::ActiveModel = holder.into();
                active.position_id = Set(None);
                active.update(db).await?;
            }

            current.delete(db).await?;
            self.event_sender
                .send_or_log(Event::PositionDeleted(position_id.to_string()))
                .await;
        }

        Ok(())
    }

    async fn find_by_public_id(
        &self,
        position_id: &str,
    ) -> Result<Option<PositionModel>, ServiceError> {
        let db = &*self.db;
        Ok(PositionEntity::find()
            .filter(position::Column::PositionId.eq(position_id))
            .one(db)
            .await?)
    }
}
