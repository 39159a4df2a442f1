use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::platform;
use crate::error::AppError;

/// A fully assembled platform record ready for insertion, slug included.
#[derive(Debug, Clone)]
pub struct PlatformDraft {
    pub name: String,
    pub slug: String,
    pub logo_url: String,
    pub logo_width: f64,
    pub logo_height: f64,
}

/// Field-wise changes merged onto an existing platform. `None` keeps the
/// stored value (last write wins, no concurrency check).
#[derive(Debug, Clone, Default)]
pub struct PlatformPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub logo_width: Option<f64>,
    pub logo_height: Option<f64>,
}

pub struct PlatformRepo;

impl PlatformRepo {
    /// All platforms, stable order by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<platform::Model>, AppError> {
        let platforms = platform::Entity::find()
            .order_by_asc(platform::Column::Name)
            .all(db)
            .await?;
        Ok(platforms)
    }

    /// Look a platform up by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_by_slug(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<platform::Model>, AppError> {
        let platform = platform::Entity::find()
            .filter(platform::Column::Slug.eq(slug))
            .one(db)
            .await?;
        Ok(platform)
    }

    /// Whether a slug is already used by a platform other than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn slug_taken(
        db: &DatabaseConnection,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut find = platform::Entity::find().filter(platform::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            find = find.filter(platform::Column::Id.ne(id));
        }
        let existing = find.one(db).await?;
        Ok(existing.is_some())
    }

    /// Insert a new platform.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the insert fails.
    pub async fn insert(
        db: &DatabaseConnection,
        draft: PlatformDraft,
    ) -> Result<platform::Model, AppError> {
        let now = Utc::now().fixed_offset();
        let record = platform::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            name: Set(draft.name),
            slug: Set(draft.slug),
            logo_url: Set(draft.logo_url),
            logo_width: Set(draft.logo_width),
            logo_height: Set(draft.logo_height),
        };
        let platform = record.insert(db).await?;
        Ok(platform)
    }

    /// Merge a patch onto an existing platform and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the update fails.
    pub async fn update(
        db: &DatabaseConnection,
        existing: platform::Model,
        patch: PlatformPatch,
    ) -> Result<platform::Model, AppError> {
        let mut active: platform::ActiveModel = existing.into();
        active.updated_at = Set(Utc::now().fixed_offset());

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(url) = patch.logo_url {
            active.logo_url = Set(url);
        }
        if let Some(width) = patch.logo_width {
            active.logo_width = Set(width);
        }
        if let Some(height) = patch.logo_height {
            active.logo_height = Set(height);
        }

        let platform = active.update(db).await?;
        Ok(platform)
    }

    /// Delete a platform by id. Hard delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the delete fails.
    pub async fn remove(db: &DatabaseConnection, id: Uuid) -> Result<(), AppError> {
        platform::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
