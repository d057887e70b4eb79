//! # Roster Service
//!
//! Business logic service layer for Roster.
//! Orchestrates the repository, the DTO mappers, and the hypermedia
//! link builder for each user operation.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;

pub use dto::*;
pub use mappers::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
