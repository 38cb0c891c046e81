//! # Menu Infrastructure
//!
//! Remote backend implementations (adapters): PostgREST tables and GoTrue auth.

pub mod error;
pub mod http;
pub mod postgrest;
pub mod gotrue;

pub use error::RemoteError;
pub use http::create_http_client;
pub use postgrest::{PostgrestCategoryRepository, PostgrestClient, PostgrestMenuItemRepository, TableQuery};
pub use gotrue::GoTrueIdentityProvider;
