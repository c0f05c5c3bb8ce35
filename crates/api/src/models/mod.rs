//! Domain models for the API.
//!
//! Database rows are mapped into these types by the repositories in
//! [`crate::db`]. Route handlers define their own request and response
//! shapes on top of them rather than serializing models directly.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::Order;
pub use product::{NewProduct, Product, ProductPatch};
pub use user::User;
