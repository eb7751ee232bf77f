use anyhow::{Context, Result};
use chrono::NaiveDate;
use contracts::domain::a002_order::aggregate::{Category, Order};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

/// Storage format of the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `pedidos` table; `customer_id` references `clientes`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: i32,
    pub customer_id: i32,
    pub date: String,
    pub total: f64,
    pub product: String,
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::a001_customer::repository::Entity",
        from = "Column::CustomerId",
        to = "crate::domain::a001_customer::repository::Column::CustomerId"
    )]
    Customer,
}

impl Related<crate::domain::a001_customer::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Order> for ActiveModel {
    fn from(o: &Order) -> Self {
        ActiveModel {
            order_id: Set(o.id),
            customer_id: Set(o.customer_id),
            date: Set(o.date.format(DATE_FORMAT).to_string()),
            total: Set(o.total),
            product: Set(o.product.clone()),
            category: Set(o.category.code().to_string()),
        }
    }
}

impl TryFrom<Model> for Order {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&m.date, DATE_FORMAT)
            .with_context(|| format!("order {}: bad date '{}'", m.order_id, m.date))?;
        let category: Category = m.category.parse().map_err(anyhow::Error::msg)?;
        Ok(Order {
            id: m.order_id,
            customer_id: m.customer_id,
            date,
            total: m.total,
            product: m.product,
            category,
        })
    }
}

const INSERT_CHUNK: usize = 150;

pub async fn insert_all<C: ConnectionTrait>(conn: &C, orders: &[Order]) -> Result<usize> {
    for chunk in orders.chunks(INSERT_CHUNK) {
        Entity::insert_many(chunk.iter().map(ActiveModel::from))
            .exec(conn)
            .await?;
    }
    Ok(orders.len())
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Order>> {
    Entity::find()
        .order_by_asc(Column::OrderId)
        .all(conn)
        .await?
        .into_iter()
        .map(Order::try_from)
        .collect()
}
