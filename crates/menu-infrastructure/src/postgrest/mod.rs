//! PostgREST adapters (tables under `/rest/v1`)

pub mod client;
pub mod query;
pub mod category_repo_impl;
pub mod menu_item_repo_impl;

pub use client::PostgrestClient;
pub use query::TableQuery;
pub use category_repo_impl::PostgrestCategoryRepository;
pub use menu_item_repo_impl::PostgrestMenuItemRepository;
