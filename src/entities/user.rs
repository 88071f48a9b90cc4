//! User entity - The signed-in supplier account (tenant).
//!
//! Every customer, order and payment is owned, directly or through its customer,
//! by exactly one user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Random UUID assigned on creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Sign-in email address, unique across accounts
    #[sea_orm(unique)]
    pub email: Option<String>,
    /// When the identity provider verified the email
    pub email_verified: Option<DateTimeUtc>,
    /// Avatar URL
    pub image: Option<String>,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many customers
    #[sea_orm(has_many = "super::customer::Entity")]
    Customers,
    /// One user has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
    /// One user records many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
