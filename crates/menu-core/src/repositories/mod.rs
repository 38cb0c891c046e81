//! Repository traits (ports)

pub mod category_repository;
pub mod menu_item_repository;
pub mod identity_provider;

pub use category_repository::CategoryRepository;
pub use menu_item_repository::MenuItemRepository;
pub use identity_provider::IdentityProvider;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
