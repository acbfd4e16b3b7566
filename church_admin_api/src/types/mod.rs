mod page;
pub use self::page::{Cursor, HasStatus, Page};
pub(crate) use self::page::RawPage;

mod scalar;
pub use self::scalar::{Amount, RecordId};

mod finance;
pub use self::finance::{Expense, FundTransfer, Remittance, TopUp};

mod directory;
pub use self::directory::{Church, User, Zone};

mod resource;
pub use self::resource::Resource;
