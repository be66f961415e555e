pub mod block;
pub mod lookup;
pub mod popularity;
pub mod transaction;

pub use block::BlockchairBlock;
pub use block::BlockchairBlockDashboard;
pub use block::BlockchairDashboard;
pub use block::BlockchairResponse;
pub use lookup::AddressDetail;
pub use lookup::TransactionLookup;
pub use popularity::SearchCount;
pub use popularity::SearchSubject;
pub use popularity::TopAddress;
pub use popularity::TopTransaction;
pub use transaction::EsploraTransaction;
