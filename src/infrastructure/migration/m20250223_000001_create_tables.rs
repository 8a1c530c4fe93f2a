use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Surname).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Patronymic).string().not_null())
                    // backstop for the application-level email check
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Age).integer().not_null())
                    .col(ColumnDef::new(Users::Nationality).string().not_null())
                    .col(ColumnDef::new(Users::Country).string().not_null())
                    .col(ColumnDef::new(Users::Gender).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(timestamp(Users::CreatedAt))
                    .col(timestamp(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(reference_table(Interests::Table, Interests::Id, Interests::Name))
            .await?;
        manager
            .create_table(reference_table(Skills::Table, Skills::Id, Skills::Name))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserInterests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserInterests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserInterests::UserId).integer().not_null())
                    .col(ColumnDef::new(UserInterests::InterestId).integer().not_null())
                    .col(timestamp(UserInterests::CreatedAt))
                    .col(timestamp(UserInterests::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_interests_user_id")
                            .from(UserInterests::Table, UserInterests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_interests_interest_id")
                            .from(UserInterests::Table, UserInterests::InterestId)
                            .to(Interests::Table, Interests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSkills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSkills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserSkills::UserId).integer().not_null())
                    .col(ColumnDef::new(UserSkills::SkillId).integer().not_null())
                    .col(timestamp(UserSkills::CreatedAt))
                    .col(timestamp(UserSkills::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_user_id")
                            .from(UserSkills::Table, UserSkills::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_skill_id")
                            .from(UserSkills::Table, UserSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSkills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserInterests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Interests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn reference_table<T, I, N>(table: T, id: I, name: N) -> TableCreateStatement
where
    T: IntoIden + 'static,
    I: IntoIden,
    N: IntoIden,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(name).string().not_null().unique_key())
        .col(timestamp(Alias::new("created_at")))
        .col(timestamp(Alias::new("updated_at")))
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Surname,
    Name,
    Patronymic,
    Email,
    Age,
    Nationality,
    Country,
    Gender,
    FullName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Interests {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserInterests {
    Table,
    Id,
    UserId,
    InterestId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserSkills {
    Table,
    Id,
    UserId,
    SkillId,
    CreatedAt,
    UpdatedAt,
}
