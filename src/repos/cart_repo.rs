use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::cart::{self, LineItem};
use crate::error::AppError;

/// Cart persistence. Only the operations the stubbed cart flow needs exist;
/// item merging and checkout are deliberately not modeled.
pub struct CartRepo;

impl CartRepo {
    /// Look a cart up by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<cart::Model>, AppError> {
        let cart = cart::Entity::find_by_id(id).one(db).await?;
        Ok(cart)
    }

    /// Insert a new cart holding the given line items.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if serialization or the insert fails.
    pub async fn insert(
        db: &DatabaseConnection,
        items: &[LineItem],
    ) -> Result<cart::Model, AppError> {
        let now = Utc::now().fixed_offset();
        let record = cart::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            code: Set(None),
            items: Set(serde_json::to_value(items)?),
        };
        let cart = record.insert(db).await?;
        Ok(cart)
    }
}
