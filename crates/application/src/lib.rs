//! Restcheck Application - Verification facade and API services
//!
//! This crate defines the application layer with:
//! - The HTTP client port
//! - [`AssertableResponse`], the fluent verification facade
//! - Services for the user and store APIs
//! - Fixtures and random test data

pub mod assertable;
pub mod error;
pub mod fixtures;
pub mod ports;
pub mod services;
pub mod test_data;

#[cfg(test)]
mod mock_client;

pub use assertable::AssertableResponse;
pub use error::{ApplicationError, ApplicationResult};
pub use fixtures::{AdminUser, AuthenticatedUser, FixtureProvider, RandomUser, authenticated};
pub use ports::{HttpClient, HttpClientError};
pub use services::{StoreService, UserService};
