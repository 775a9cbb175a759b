//! Identity verification API endpoints.
//!
//! Every endpoint here is a POST with a typed JSON body.

use crate::client::MonoClient;
use crate::error::MonoResult;
use serde::{Deserialize, Serialize};

/// Verification API for KYC lookups.
pub struct VerificationApi<'a> {
    client: &'a MonoClient,
}

impl<'a> VerificationApi<'a> {
    pub(crate) fn new(client: &'a MonoClient) -> Self {
        Self { client }
    }

    /// Verify a residential address against a utility meter.
    pub async fn address(&self, request: &AddressVerification) -> MonoResult<String> {
        self.client.http.post(&["v3", "lookup", "address"], request).await
    }

    /// Verify an international passport.
    pub async fn passport(&self, request: &PassportVerification) -> MonoResult<String> {
        self.client.http.post(&["v3", "lookup", "passport"], request).await
    }

    /// Verify a tax identification number.
    pub async fn tin(&self, request: &TinVerification) -> MonoResult<String> {
        self.client.http.post(&["v3", "lookup", "tin"], request).await
    }

    /// Verify a national identification number.
    pub async fn nin(&self, request: &NinVerification) -> MonoResult<String> {
        self.client.http.post(&["v3", "lookup", "nin"], request).await
    }

    /// Verify a driver's license.
    pub async fn drivers_license(
        &self,
        request: &DriversLicenseVerification,
    ) -> MonoResult<String> {
        self.client
            .http
            .post(&["v3", "lookup", "driver_license"], request)
            .await
    }

    /// Credit history for a BVN from the given bureau (e.g. `crc`, `xds`, `all`).
    pub async fn credit_history(
        &self,
        provider: &str,
        request: &CreditHistoryRequest,
    ) -> MonoResult<String> {
        self.client
            .http
            .post(&["v3", "lookup", "credit-history", provider], request)
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressVerification {
    pub meter_number: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportVerification {
    pub passport_number: String,
    pub last_name: String,
    pub date_of_birth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinVerification {
    pub number: String,
    /// Lookup channel, `tin` or `cac`.
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinVerification {
    pub nin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriversLicenseVerification {
    pub license_number: String,
    pub date_of_birth: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditHistoryRequest {
    pub bvn: String,
}
