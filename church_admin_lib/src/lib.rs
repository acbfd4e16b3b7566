//! Library layer for the church admin tools: configuration, input validation,
//! and the reusable paginated-list state shared by every list view.
//!
//! Wraps the `church_admin_api` crate, which does the HTTP work.

pub mod config;
pub mod error;
pub mod pager;
pub mod validation;

pub use church_admin_api;
pub use church_admin_api::types;
pub use church_admin_api::{
    ChurchQuery, Client, FinanceQuery, Filters, PagedResourceClient, Query, SortDirection,
    UserQuery, ZoneQuery,
};

pub use config::AdminConfig;
pub use error::AdminError;
pub use pager::{LoadState, Outcome, PageView, Pager};
