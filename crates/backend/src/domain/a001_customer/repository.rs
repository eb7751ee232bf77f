use anyhow::Result;
use contracts::domain::a001_customer::aggregate::{Customer, Sector};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

/// `clientes` table. Shared by the generator (writes) and the dashboard (reads).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: i32,
    pub name: String,
    pub sector: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::a002_order::repository::Entity")]
    Orders,
}

impl Related<crate::domain::a002_order::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Customer> for ActiveModel {
    fn from(c: &Customer) -> Self {
        ActiveModel {
            customer_id: Set(c.id),
            name: Set(c.name.clone()),
            sector: Set(c.sector.code().to_string()),
        }
    }
}

impl TryFrom<Model> for Customer {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let sector: Sector = m.sector.parse().map_err(anyhow::Error::msg)?;
        Ok(Customer {
            id: m.customer_id,
            name: m.name,
            sector,
        })
    }
}

/// Keeps each statement under SQLite's bound-parameter limit
const INSERT_CHUNK: usize = 300;

pub async fn insert_all<C: ConnectionTrait>(conn: &C, customers: &[Customer]) -> Result<usize> {
    for chunk in customers.chunks(INSERT_CHUNK) {
        Entity::insert_many(chunk.iter().map(ActiveModel::from))
            .exec(conn)
            .await?;
    }
    Ok(customers.len())
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Customer>> {
    Entity::find()
        .order_by_asc(Column::CustomerId)
        .all(conn)
        .await?
        .into_iter()
        .map(Customer::try_from)
        .collect()
}
