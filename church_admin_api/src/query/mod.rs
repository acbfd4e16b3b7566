mod common;
pub use self::common::{Filters, Query, QueryCommon, SortDirection};

mod finance;
pub use self::finance::FinanceQuery;

mod directory;
pub use self::directory::{ChurchQuery, UserQuery, ZoneQuery};
