//! Authentication providers.
//!
//! This module defines traits for all external dependencies used by the
//! auth store. The reducer depends on these traits; the composition root
//! picks concrete implementations.
//!
//! ```text
//! ┌──────────────────┐    AuthApi          ┌─────────────────────┐
//! │ AuthReducer      │───────────────────▶ │ REST auth service   │
//! │ (effects only)   │    IdentityProvider ├─────────────────────┤
//! │                  │───────────────────▶ │ OAuth popup / SDK   │
//! │                  │    KeyValueStorage  ├─────────────────────┤
//! │                  │───────────────────▶ │ token + userData    │
//! └──────────────────┘                     └─────────────────────┘
//! ```
//!
//! - **Testing**: mocks from [`crate::mocks`] and [`InMemoryStorage`]
//! - **Production**: [`HttpAuthApi`] and [`FileStorage`]

pub mod auth_api;
pub mod http;
pub mod identity;
pub mod storage;

pub use auth_api::{AuthApi, LoginRequest, RegisterRequest};
pub use http::HttpAuthApi;
pub use identity::{IdentityProvider, NoopIdentityProvider};
pub use storage::{FileStorage, InMemoryStorage, KeyValueStorage};
