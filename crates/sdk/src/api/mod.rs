//! Mono API endpoint groups.

pub mod accounts;
pub mod customers;
pub mod lookup;
pub mod verification;
pub mod wallet;

pub use accounts::{AccountsApi, TransactionFilter, TransactionType};
pub use customers::CustomersApi;
pub use lookup::LookupApi;
pub use verification::{
    AddressVerification, CreditHistoryRequest, DriversLicenseVerification, NinVerification,
    PassportVerification, TinVerification, VerificationApi,
};
pub use wallet::WalletApi;
