//! Company (CAC) lookup API endpoints.

use crate::client::MonoClient;
use crate::error::MonoResult;
use crate::transport::Query;

/// Lookup API for registered businesses.
pub struct LookupApi<'a> {
    client: &'a MonoClient,
}

impl<'a> LookupApi<'a> {
    pub(crate) fn new(client: &'a MonoClient) -> Self {
        Self { client }
    }

    /// Search the company registry by name or RC number.
    pub async fn search_company(&self, search: &str) -> MonoResult<String> {
        let query = Query::new().push("search", search);
        self.client.http.get(&["v3", "lookup", "cac"], &query).await
    }

    /// Shareholders of a company.
    pub async fn company_shareholders(&self, cac_id: &str) -> MonoResult<String> {
        self.company(cac_id, "shareholders").await
    }

    /// Registry profile by RC number.
    pub async fn company_profile(&self, rc_number: &str) -> MonoResult<String> {
        self.client
            .http
            .get(&["v3", "lookup", "cac", "profile", rc_number], &Query::new())
            .await
    }

    /// Company secretary.
    pub async fn company_secretary(&self, cac_id: &str) -> MonoResult<String> {
        self.company(cac_id, "secretary").await
    }

    /// Directors of a company.
    pub async fn company_directors(&self, cac_id: &str) -> MonoResult<String> {
        self.company(cac_id, "directors").await
    }

    async fn company(&self, cac_id: &str, resource: &str) -> MonoResult<String> {
        self.client
            .http
            .get(&["v3", "lookup", "cac", "company", cac_id, resource], &Query::new())
            .await
    }
}
