use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, SqlErr,
};

use crate::entity::{self, ActiveModel, Model};
use crate::error::{EventError, EventResult};
use crate::filter::EventFilter;
use crate::pagination::{Page, PageRequest, SortField};
use crate::repository::{EventRepository, active_identifier};

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: &PageRequest,
    ) -> EventResult<Page<Model>> {
        let (field, direction) = page.order();
        let mut query = query.order_by(field.column(), direction.order());
        if field != SortField::Id {
            query = query.order_by_asc(entity::Column::Id);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let totals = paginator.num_items_and_pages().await?;
        let content = paginator.fetch_page(page.page).await?;

        Ok(Page::new(content, totals.number_of_items, page))
    }
}

/// A unique index violation means the identifier is taken
fn map_save_error(err: DbErr, identifier: Option<String>) -> EventError {
    match (err.sql_err(), identifier) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(identifier)) => {
            EventError::IdentifierAlreadyExists(identifier)
        }
        _ => err.into(),
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn save(&self, event: ActiveModel) -> EventResult<Model> {
        let identifier = active_identifier(&event);

        let model = if matches!(event.id, ActiveValue::NotSet) {
            event.insert(&self.db).await
        } else {
            event.update(&self.db).await
        }
        .map_err(|e| map_save_error(e, identifier))?;

        tracing::debug!(event_id = model.id, "Saved event");
        Ok(model)
    }

    async fn find_by_id(&self, id: i64) -> EventResult<Option<Model>> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self, page: PageRequest) -> EventResult<Page<Model>> {
        self.fetch_page(entity::Entity::find(), &page).await
    }

    async fn exists_by_identifier(&self, identifier: &str) -> EventResult<bool> {
        let existing = entity::Entity::find()
            .filter(entity::Column::Identifier.eq(identifier))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }

    async fn find_by_filters(
        &self,
        filter: &EventFilter,
        page: PageRequest,
    ) -> EventResult<Page<Model>> {
        let query = entity::Entity::find().filter(filter.to_condition());
        self.fetch_page(query, &page).await
    }
}
