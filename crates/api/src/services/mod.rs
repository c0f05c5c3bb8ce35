//! Business logic services.
//!
//! Services own validation and orchestration; the repositories in
//! [`crate::db`] own SQL. Route handlers construct a service per request
//! from the shared pool.
//!
//! - `auth` - Registration, login, and user lookup
//! - `catalog` - Product management behind the admin gate
//! - `checkout` - The cart and order workflow

pub mod auth;
pub mod catalog;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use checkout::{CheckoutError, CheckoutService};
