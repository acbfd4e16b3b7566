mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, PagedResourceClient, DEFAULT_TIMEOUT};
pub use self::errors::{Error, ErrorBody, GENERIC_FAILURE_MESSAGE, SERVER_ERROR_MESSAGE};
pub use self::query::{
    ChurchQuery, FinanceQuery, Filters, Query, QueryCommon, SortDirection, UserQuery, ZoneQuery,
};
