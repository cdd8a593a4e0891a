//! Department database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Department;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Department {
    fn from(model: Model) -> Self {
        Department {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Department> for ActiveModel {
    fn from(department: &Department) -> Self {
        ActiveModel {
            id: Set(department.id),
            name: Set(department.name.clone()),
            description: Set(department.description.clone()),
            created_at: Set(department.created_at),
            updated_at: Set(department.updated_at),
        }
    }
}
