//! Customer entity - A household or shop that receives water jars.
//!
//! The price per jar is kept as a two-decimal string (e.g. `"10.00"`) and parsed
//! into a fixed-point decimal by [`crate::core::money`] whenever it is used in a
//! calculation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer name (at most 100 characters)
    pub name: String,
    /// Normalized mobile number, unique per owner
    pub phone: String,
    /// Delivery address
    pub address: Option<String>,
    /// Price charged per delivered jar, as a decimal string
    pub price_per_jar: String,
    /// Owning user ID
    pub user_id: String,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each customer belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// One customer has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One customer has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
