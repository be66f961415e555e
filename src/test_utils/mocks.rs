use async_trait::async_trait;
use mockall::mock;

use crate::Result;
use crate::error::ProviderError;
use crate::model::AddressDetail;
use crate::model::BlockchairBlock;
use crate::model::EsploraTransaction;
use crate::model::SearchCount;
use crate::model::SearchSubject;
use crate::model::TransactionLookup;
use crate::provider::BlockSource;
use crate::provider::ChainLookup;
use crate::provider::TransactionSource;
use crate::storage::CacheStore;
use crate::storage::PopularityStore;

// Provider A
mock! {
    pub BlockSource {}

    #[async_trait]
    impl BlockSource for BlockSource {
        async fn latest_block(&self) -> std::result::Result<BlockchairBlock, ProviderError>;
        async fn block_transaction_hashes(&self, block_id: u64) -> std::result::Result<Vec<String>, ProviderError>;
    }
}

// Provider B
mock! {
    pub TransactionSource {}

    #[async_trait]
    impl TransactionSource for TransactionSource {
        async fn transaction(&self, txid: &str) -> std::result::Result<EsploraTransaction, ProviderError>;
    }
}

// Provider C
mock! {
    pub ChainLookup {}

    #[async_trait]
    impl ChainLookup for ChainLookup {
        async fn address_detail(&self, address: &str) -> std::result::Result<AddressDetail, ProviderError>;
        async fn transaction_detail(&self, hash: &str) -> std::result::Result<TransactionLookup, ProviderError>;
    }
}

mock! {
    pub CacheStore {}

    #[async_trait]
    impl CacheStore for CacheStore {
        async fn get(&self, key: &str) -> Result<Option<String>>;
        async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;
    }
}

mock! {
    pub PopularityStore {}

    #[async_trait]
    impl PopularityStore for PopularityStore {
        async fn increment_search_count(&self, subject: SearchSubject, key: &str) -> Result<u64>;
        async fn top(&self, subject: SearchSubject, limit: usize) -> Result<Vec<SearchCount>>;
    }
}

/// Block source answering block `id` with the given transaction hashes, once each.
pub fn create_mock_block_source(
    id: u64,
    hashes: Vec<String>,
) -> MockBlockSource {
    let mut mock = MockBlockSource::new();

    mock.expect_latest_block()
        .times(1)
        .returning(move || Ok(crate::test_utils::fixtures::block(id)));

    mock.expect_block_transaction_hashes()
        .withf(move |block_id| *block_id == id)
        .times(1)
        .returning(move |_| Ok(hashes.clone()));

    mock
}
