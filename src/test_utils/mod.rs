#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod stores;

pub(crate) use http::{
    TEST_JWT_SECRET, create_transaction, get_test_app_state, get_test_server, register_user,
    transaction_body,
};
pub(crate) use stores::FailingTransactionStore;
