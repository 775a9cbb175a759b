// Company registry (CAC) lookup tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_object, json_schema_string, parse_args, respond, Tool};
use anyhow::Result;
use mono_sdk::MonoClient;
use serde::Deserialize;
use std::sync::Arc;

/// Tool to search the company registry
pub struct CompanySearchTool {
    client: Arc<MonoClient>,
}

impl CompanySearchTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CompanySearchArgs {
    search: String,
}

#[async_trait::async_trait]
impl Tool for CompanySearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "lookup_company".to_string(),
            title: Some("Lookup a Company".to_string()),
            description: "Search the Corporate Affairs Commission registry for a business".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "search": json_schema_string("Business name or RC number to search for")
                }),
                vec!["search"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CompanySearchArgs = parse_args("lookup_company", arguments)?;
        let outcome = self.client.lookup().search_company(&args.search).await;
        Ok(respond("lookup_company", outcome))
    }
}

/// Tool to fetch a company profile by RC number
pub struct CompanyProfileTool {
    client: Arc<MonoClient>,
}

impl CompanyProfileTool {
    pub fn new(client: Arc<MonoClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyProfileArgs {
    rc_number: String,
}

#[async_trait::async_trait]
impl Tool for CompanyProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_company_profile".to_string(),
            title: Some("Get Company Profile".to_string()),
            description: "Return the registry profile of a company by its RC number".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "rcNumber": json_schema_string("The company's RC number")
                }),
                vec!["rcNumber"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CompanyProfileArgs = parse_args("get_company_profile", arguments)?;
        let outcome = self.client.lookup().company_profile(&args.rc_number).await;
        Ok(respond("get_company_profile", outcome))
    }
}

/// Reads about a company keyed by its registry ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyLookup {
    Shareholders,
    Secretary,
    Directors,
}

impl CompanyLookup {
    pub const ALL: [CompanyLookup; 3] = [Self::Shareholders, Self::Secretary, Self::Directors];

    fn name(&self) -> &'static str {
        match self {
            Self::Shareholders => "get_company_shareholders",
            Self::Secretary => "get_company_secretary",
            Self::Directors => "get_company_directors",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Shareholders => "Get Company Shareholders",
            Self::Secretary => "Get Company Secretary",
            Self::Directors => "Get Company Directors",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Shareholders => "Return the shareholders of a registered company",
            Self::Secretary => "Return the company secretary of a registered company",
            Self::Directors => "Return the directors of a registered company",
        }
    }
}

/// Tool for the company reads in [`CompanyLookup`]
pub struct CompanyLookupTool {
    client: Arc<MonoClient>,
    lookup: CompanyLookup,
}

impl CompanyLookupTool {
    pub fn new(client: Arc<MonoClient>, lookup: CompanyLookup) -> Self {
        Self { client, lookup }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyArgs {
    cac_id: String,
}

#[async_trait::async_trait]
impl Tool for CompanyLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.lookup.name().to_string(),
            title: Some(self.lookup.title().to_string()),
            description: self.lookup.description().to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "cacId": json_schema_string("The company ID returned by lookup_company")
                }),
                vec!["cacId"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let name = self.lookup.name();
        let args: CompanyArgs = parse_args(name, arguments)?;

        let lookup = self.client.lookup();
        let outcome = match self.lookup {
            CompanyLookup::Shareholders => lookup.company_shareholders(&args.cac_id).await,
            CompanyLookup::Secretary => lookup.company_secretary(&args.cac_id).await,
            CompanyLookup::Directors => lookup.company_directors(&args.cac_id).await,
        };
        Ok(respond(name, outcome))
    }
}
