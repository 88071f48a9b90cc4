//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod order;
pub mod payment;
pub mod session;
pub mod user;

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
