//! Category directory operations.

use sea_orm::{Condition, QueryFilter, QueryOrder, prelude::*};

use crate::{Category, CategoryKind, EngineError, ResultEngine, categories};

use super::Engine;

/// Payload for creating a private custom category.
#[derive(Clone, Debug)]
pub struct CategoryDraft {
    pub slug: String,
    pub name: String,
    pub kind: CategoryKind,
}

impl Engine {
    /// Lists categories visible to a user: system-wide rows plus their own,
    /// in sort order.
    pub async fn list_categories(&self, user_id: &str) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(
                Condition::any()
                    .add(categories::Column::UserId.is_null())
                    .add(categories::Column::UserId.eq(user_id)),
            )
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Slug)
            .all(&self.database)
            .await?;

        models.into_iter().map(Category::try_from).collect()
    }

    /// Creates a private custom category; the (slug, kind) pair must be new
    /// within the user's visible set.
    pub async fn create_category(
        &self,
        user_id: &str,
        draft: CategoryDraft,
    ) -> ResultEngine<Category> {
        let visible = self.list_categories(user_id).await?;
        if visible
            .iter()
            .any(|c| c.slug == draft.slug && c.kind == draft.kind)
        {
            return Err(EngineError::ExistingKey(draft.slug));
        }

        let sort_order = visible.iter().map(|c| c.sort_order).max().unwrap_or(0) + 1;
        let category = Category::new(
            draft.slug,
            draft.name,
            draft.kind,
            Some(user_id.to_string()),
            sort_order,
        )?;
        categories::ActiveModel::from(&category)
            .insert(&self.database)
            .await?;
        Ok(category)
    }

    /// Resolves a category id to a category visible to the user.
    pub(super) async fn visible_category(
        &self,
        id: &str,
        user_id: &str,
    ) -> ResultEngine<Category> {
        let model = categories::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))?;
        let category = Category::try_from(model)?;
        if category
            .user_id
            .as_deref()
            .is_some_and(|owner| owner != user_id)
        {
            return Err(EngineError::KeyNotFound("category not exists".to_string()));
        }
        Ok(category)
    }
}
