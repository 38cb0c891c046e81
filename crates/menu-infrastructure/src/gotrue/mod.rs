//! GoTrue adapters (accounts under `/auth/v1`)

pub mod identity_provider_impl;

pub use identity_provider_impl::GoTrueIdentityProvider;
