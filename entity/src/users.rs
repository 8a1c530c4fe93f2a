use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
    pub nationality: String,
    pub country: String,
    pub gender: String,
    pub full_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_interests::Entity")]
    UserInterests,
    #[sea_orm(has_many = "super::user_skills::Entity")]
    UserSkills,
}

impl Related<super::user_interests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserInterests.def()
    }
}

impl Related<super::user_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSkills.def()
    }
}

impl Related<super::interests::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_interests::Relation::Interest.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_interests::Relation::User.def().rev())
    }
}

impl Related<super::skills::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_skills::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_skills::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
