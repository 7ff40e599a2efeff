//! Payload models of the APIs under test.
#![allow(missing_docs)]

pub mod store;
pub mod user;

pub use store::{Address, AuthData, Geolocation, Name, SortOrder, StoreUser, UserQuery};
pub use user::{Dlc, FullUser, Game, Info, JwtAuthData, PasswordChange, Requirements, SimilarDlc};
