use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{game, platform};
use crate::error::AppError;

/// A fully assembled game record ready for insertion. The platform
/// reference is already resolved to its id.
#[derive(Debug, Clone)]
pub struct GameDraft {
    pub name: String,
    pub slug: String,
    pub platform_id: Uuid,
    pub summary: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub cover_url: Option<String>,
}

/// Field-wise changes merged onto an existing game.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub platform_id: Option<Uuid>,
    pub summary: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub cover_url: Option<String>,
}

pub struct GameRepo;

impl GameRepo {
    /// All games, stable order by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<game::Model>, AppError> {
        let games = game::Entity::find()
            .order_by_asc(game::Column::Name)
            .all(db)
            .await?;
        Ok(games)
    }

    /// All games with their platform, stable order by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_all_with_platforms(
        db: &DatabaseConnection,
    ) -> Result<Vec<(game::Model, Option<platform::Model>)>, AppError> {
        let games = game::Entity::find()
            .find_also_related(platform::Entity)
            .order_by_asc(game::Column::Name)
            .all(db)
            .await?;
        Ok(games)
    }

    /// Look a game up by its slug, carrying its platform along.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_by_slug_with_platform(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<(game::Model, Option<platform::Model>)>, AppError> {
        let found = game::Entity::find()
            .filter(game::Column::Slug.eq(slug))
            .find_also_related(platform::Entity)
            .one(db)
            .await?;
        Ok(found)
    }

    /// Look a game up by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_by_slug(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<game::Model>, AppError> {
        let game = game::Entity::find()
            .filter(game::Column::Slug.eq(slug))
            .one(db)
            .await?;
        Ok(game)
    }

    /// All games belonging to one platform.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn find_by_platform(
        db: &DatabaseConnection,
        platform_id: Uuid,
    ) -> Result<Vec<game::Model>, AppError> {
        let games = game::Entity::find()
            .filter(game::Column::PlatformId.eq(platform_id))
            .order_by_asc(game::Column::Name)
            .all(db)
            .await?;
        Ok(games)
    }

    /// Whether a slug is already used by a game other than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the database query fails.
    pub async fn slug_taken(
        db: &DatabaseConnection,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut find = game::Entity::find().filter(game::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            find = find.filter(game::Column::Id.ne(id));
        }
        let existing = find.one(db).await?;
        Ok(existing.is_some())
    }

    /// Insert a new game.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the insert fails.
    pub async fn insert(db: &DatabaseConnection, draft: GameDraft) -> Result<game::Model, AppError> {
        let now = Utc::now().fixed_offset();
        let record = game::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            name: Set(draft.name),
            slug: Set(draft.slug),
            platform_id: Set(draft.platform_id),
            summary: Set(draft.summary),
            genre: Set(draft.genre),
            release_year: Set(draft.release_year),
            cover_url: Set(draft.cover_url),
        };
        let game = record.insert(db).await?;
        Ok(game)
    }

    /// Merge a patch onto an existing game and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the update fails.
    pub async fn update(
        db: &DatabaseConnection,
        existing: game::Model,
        patch: GamePatch,
    ) -> Result<game::Model, AppError> {
        let mut active: game::ActiveModel = existing.into();
        active.updated_at = Set(Utc::now().fixed_offset());

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(platform_id) = patch.platform_id {
            active.platform_id = Set(platform_id);
        }
        if let Some(summary) = patch.summary {
            active.summary = Set(Some(summary));
        }
        if let Some(genre) = patch.genre {
            active.genre = Set(Some(genre));
        }
        if let Some(year) = patch.release_year {
            active.release_year = Set(Some(year));
        }
        if let Some(url) = patch.cover_url {
            active.cover_url = Set(Some(url));
        }

        let game = active.update(db).await?;
        Ok(game)
    }

    /// Delete a game by id. Hard delete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the delete fails.
    pub async fn remove(db: &DatabaseConnection, id: Uuid) -> Result<(), AppError> {
        game::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
