pub mod accounts;
pub mod customers;
pub mod lookup;
pub mod verification;
pub mod wallet;
mod registry;

pub use accounts::{AccountLookup, AccountLookupTool, ListAccountsTool, TransactionHistoryTool};
pub use customers::{CustomerTransactionsTool, ListCustomersTool};
pub use lookup::{CompanyLookup, CompanyLookupTool, CompanyProfileTool, CompanySearchTool};
pub use registry::{
    json_schema_boolean, json_schema_enum, json_schema_integer, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};
pub(crate) use registry::{parse_args, respond};
pub use verification::{Verification, VerificationTool};
pub use wallet::WalletBalanceTool;

use anyhow::Result;
use mono_sdk::MonoClient;
use std::sync::Arc;

/// Build a registry holding every banking tool, all sharing one client.
pub fn banking_registry(client: Arc<MonoClient>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    // Wallet and customers
    registry.register(Arc::new(WalletBalanceTool::new(client.clone())))?;
    registry.register(Arc::new(ListCustomersTool::new(client.clone())))?;
    registry.register(Arc::new(CustomerTransactionsTool::new(client.clone())))?;

    // Linked accounts
    registry.register(Arc::new(ListAccountsTool::new(client.clone())))?;
    for lookup in AccountLookup::ALL {
        registry.register(Arc::new(AccountLookupTool::new(client.clone(), lookup)))?;
    }
    registry.register(Arc::new(TransactionHistoryTool::new(client.clone())))?;

    // Company registry
    registry.register(Arc::new(CompanySearchTool::new(client.clone())))?;
    registry.register(Arc::new(CompanyProfileTool::new(client.clone())))?;
    for lookup in CompanyLookup::ALL {
        registry.register(Arc::new(CompanyLookupTool::new(client.clone(), lookup)))?;
    }

    // Verification
    for kind in Verification::ALL {
        registry.register(Arc::new(VerificationTool::new(client.clone(), kind)))?;
    }

    tracing::debug!("Registered {} banking tools", registry.len());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ToolRegistry) {
        let server = MockServer::start().await;
        let client = MonoClient::builder()
            .secret_key("test_sk_abc")
            .base_url(server.uri())
            .build()
            .unwrap();
        let registry = banking_registry(Arc::new(client)).unwrap();
        (server, registry)
    }

    async fn call(registry: &ToolRegistry, name: &str, arguments: Value) -> CallToolResultView {
        let tool = registry.get(name).unwrap();
        let result = tool.execute(arguments).await.unwrap();
        CallToolResultView {
            text: result.first_text().unwrap_or_default().to_string(),
            is_error: result.is_error.unwrap_or(false),
        }
    }

    struct CallToolResultView {
        text: String,
        is_error: bool,
    }

    #[tokio::test]
    async fn test_registry_holds_every_tool() {
        let (_server, registry) = setup().await;

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "get_account_balance",
                "get_account_credits",
                "get_account_debits",
                "get_account_identity",
                "get_account_information",
                "get_all_customers",
                "get_company_directors",
                "get_company_profile",
                "get_company_secretary",
                "get_company_shareholders",
                "get_credit_history",
                "get_customer_transactions",
                "get_income_information",
                "get_linked_accounts",
                "get_transaction_history",
                "get_wallet_balance",
                "lookup_company",
                "verify_address",
                "verify_drivers_license",
                "verify_international_passport",
                "verify_nin",
                "verify_tin",
            ]
        );
    }

    #[tokio::test]
    async fn test_schemas_are_objects_with_required_lists() {
        let (_server, registry) = setup().await;

        for schema in registry.list_schemas() {
            assert_eq!(schema.input_schema["type"], "object", "{}", schema.name);
            assert!(schema.input_schema["required"].is_array(), "{}", schema.name);
            assert!(!schema.description.is_empty(), "{}", schema.name);
        }

        let schema = registry.get("get_transaction_history").unwrap().schema();
        assert_eq!(schema.input_schema["required"], json!(["accountId"]));
        assert_eq!(
            schema.input_schema["properties"]["type"]["enum"],
            json!(["debit", "credit"])
        );
    }

    #[tokio::test]
    async fn test_account_balance_is_pretty_printed() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/acct_123/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": 500})))
            .mount(&server)
            .await;

        let result = call(&registry, "get_account_balance", json!({"accountId": "acct_123"})).await;
        assert!(!result.is_error);
        assert_eq!(result.text, "{\n  \"balance\": 500\n}");
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_error_envelope() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = call(&registry, "get_wallet_balance", json!({})).await;
        assert!(result.is_error);
        assert!(result.text.starts_with("Error:"), "{}", result.text);
        assert!(result.text.contains("500"));
    }

    #[tokio::test]
    async fn test_linked_accounts_omits_missing_filters() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let result = call(&registry, "get_linked_accounts", json!({})).await;
        assert!(!result.is_error);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_transaction_history_maps_filters() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/accounts/acct_1/transactions"))
            .and(query_param("type", "credit"))
            .and(query_param("start", "01-10-2020"))
            .and(query_param("end", "07-10-2020"))
            .and(query_param("paginate", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &registry,
            "get_transaction_history",
            json!({
                "accountId": "acct_1",
                "type": "credit",
                "startDate": "01-10-2020",
                "endDate": "07-10-2020",
                "paginate": false
            }),
        )
        .await;
        assert!(!result.is_error, "{}", result.text);
    }

    #[tokio::test]
    async fn test_customer_transactions_passes_account() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v2/customers/cus_1/transactions"))
            .and(query_param("period", "last6months"))
            .and(query_param("page", "1"))
            .and(query_param("account", "acct_9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &registry,
            "get_customer_transactions",
            json!({
                "customerId": "cus_1",
                "period": "last6months",
                "page": 1,
                "accountId": "acct_9"
            }),
        )
        .await;
        assert!(!result.is_error, "{}", result.text);
    }

    #[tokio::test]
    async fn test_company_secretary_path() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v3/lookup/cac/company/cac_7/secretary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Jane"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(&registry, "get_company_secretary", json!({"cacId": "cac_7"})).await;
        assert!(!result.is_error, "{}", result.text);
    }

    #[tokio::test]
    async fn test_drivers_license_body() {
        let (server, registry) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v3/lookup/driver_license"))
            .and(body_json(json!({
                "license_number": "LAG123",
                "date_of_birth": "1990-01-01",
                "first_name": "Ada",
                "last_name": "Obi"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"verified": true})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &registry,
            "verify_drivers_license",
            json!({
                "licenseNumber": "LAG123",
                "dateOfBirth": "1990-01-01",
                "firstName": "Ada",
                "lastName": "Obi"
            }),
        )
        .await;
        assert!(!result.is_error, "{}", result.text);
    }

    #[tokio::test]
    async fn test_credit_history_uses_provider_segment() {
        let (server, registry) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v3/lookup/credit-history/xds"))
            .and(body_json(json!({"bvn": "22222222222"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &registry,
            "get_credit_history",
            json!({"provider": "xds", "bvn": "22222222222"}),
        )
        .await;
        assert!(!result.is_error, "{}", result.text);
    }

    // Smallest argument object the schema accepts: required fields only.
    fn minimal_args(schema: &Value) -> Value {
        let mut args = serde_json::Map::new();
        let required = schema["required"].as_array().cloned().unwrap_or_default();
        for field in required {
            let field = field.as_str().unwrap();
            let property = &schema["properties"][field];
            let value = match property["type"].as_str() {
                Some("string") => match property["enum"].as_array() {
                    Some(choices) => choices[0].clone(),
                    None => json!("x"),
                },
                Some("integer") => json!(1),
                Some("boolean") => json!(false),
                other => panic!("unhandled type {:?} for {}", other, field),
            };
            args.insert(field.to_string(), value);
        }
        Value::Object(args)
    }

    #[tokio::test]
    async fn test_every_tool_reports_remote_failure() {
        let (server, registry) = setup().await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .mount(&server)
            .await;

        for schema in registry.list_schemas() {
            let args = minimal_args(&schema.input_schema);
            let result = call(&registry, &schema.name, args).await;
            assert!(result.is_error, "{} did not flag the failure", schema.name);
            assert!(result.text.starts_with("Error:"), "{}: {}", schema.name, result.text);
        }

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), registry.len());
    }

    #[tokio::test]
    async fn test_optional_fields_are_not_sent_when_absent() {
        let cases = [
            ("get_all_customers", json!({}), None),
            (
                "get_customer_transactions",
                json!({"customerId": "cus_1", "period": "last12months", "page": 1}),
                Some("account"),
            ),
            ("get_transaction_history", json!({"accountId": "acct_1"}), None),
            ("get_linked_accounts", json!({}), None),
        ];

        for (name, args, absent_key) in cases {
            let (server, registry) = setup().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
                .mount(&server)
                .await;

            let result = call(&registry, name, args).await;
            assert!(!result.is_error, "{}: {}", name, result.text);

            let requests = server.received_requests().await.unwrap();
            assert_eq!(requests.len(), 1, "{}", name);
            let url = &requests[0].url;
            match absent_key {
                Some(key) => assert!(
                    url.query_pairs().all(|(k, _)| k != key),
                    "{} sent {}: {}",
                    name,
                    key,
                    url
                ),
                None => assert_eq!(url.query(), None, "{}", name),
            }
        }
    }

    #[tokio::test]
    async fn test_missing_required_argument_is_rejected() {
        let (server, registry) = setup().await;

        let tool = registry.get("verify_nin").unwrap();
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("verify_nin"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
