use sea_orm::{EnumIter, Iterable};
use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(EventType::Enum)
                    .values(EventType::iter().skip(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(EventStatus::Enum)
                    .values(EventStatus::iter().skip(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Events::Name, 255))
                    .col(text_null(Events::Description))
                    .col(string_len(Events::Identifier, 100))
                    .col(timestamp_with_time_zone(Events::StartAt))
                    .col(timestamp_with_time_zone(Events::EndAt))
                    .col(string_len(Events::Location, 255))
                    .col(integer(Events::Capacity))
                    .col(
                        ColumnDef::new(Events::Type)
                            .enumeration(EventType::Enum, EventType::iter().skip(1))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::Status)
                            .enumeration(EventStatus::Enum, EventStatus::iter().skip(1))
                            .not_null()
                            .default("draft"),
                    )
                    .col(text_null(Events::CancelReason))
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Events::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_identifier")
                    .table(Events::Table)
                    .col(Events::Identifier)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_start_at")
                    .table(Events::Table)
                    .col(Events::StartAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_status")
                    .table(Events::Table)
                    .col(Events::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_type")
                    .table(Events::Table)
                    .col(Events::Type)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EventType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Name,
    Description,
    Identifier,
    StartAt,
    EndAt,
    Location,
    Capacity,
    Type,
    Status,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}

// The first variant names the postgres type; the rest are its values.
#[derive(DeriveIden, EnumIter)]
enum EventType {
    #[sea_orm(iden = "event_type")]
    Enum,
    Conference,
    Workshop,
    Seminar,
    Webinar,
    Meetup,
    Concert,
    Festival,
    Competition,
    NetworkingEvent,
    Lecture,
    PanelDiscussion,
    Training,
    Exhibition,
    LaunchEvent,
    Fundraiser,
}

#[derive(DeriveIden, EnumIter)]
enum EventStatus {
    #[sea_orm(iden = "event_status")]
    Enum,
    Draft,
    Open,
    Completed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_query::PostgresQueryBuilder;

    #[test]
    fn test_enum_values_are_snake_case() {
        let sql = Type::create()
            .as_enum(EventType::Enum)
            .values(EventType::iter().skip(1))
            .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with("CREATE TYPE \"event_type\" AS ENUM"));
        assert!(sql.contains("'networking_event'"));
        assert!(sql.contains("'panel_discussion'"));
        assert!(!sql.contains("'enum'"));
    }

    #[test]
    fn test_status_type_lists_lifecycle_states() {
        let sql = Type::create()
            .as_enum(EventStatus::Enum)
            .values(EventStatus::iter().skip(1))
            .to_string(PostgresQueryBuilder);

        for status in ["draft", "open", "completed", "cancelled"] {
            assert!(sql.contains(&format!("'{status}'")), "missing {status}: {sql}");
        }
    }
}
