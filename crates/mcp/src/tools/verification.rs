// KYC verification tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_enum, json_schema_object, json_schema_string, parse_args, respond, Tool,
};
use anyhow::Result;
use mono_sdk::{
    AddressVerification, CreditHistoryRequest, DriversLicenseVerification, MonoClient,
    NinVerification, PassportVerification, TinVerification,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Verification checks exposed as tools. Each one posts a typed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Address,
    Passport,
    Tin,
    Nin,
    DriversLicense,
    CreditHistory,
}

impl Verification {
    pub const ALL: [Verification; 6] = [
        Self::Address,
        Self::Passport,
        Self::Tin,
        Self::Nin,
        Self::DriversLicense,
        Self::CreditHistory,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Address => "verify_address",
            Self::Passport => "verify_international_passport",
            Self::Tin => "verify_tin",
            Self::Nin => "verify_nin",
            Self::DriversLicense => "verify_drivers_license",
            Self::CreditHistory => "get_credit_history",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Address => "Verify Address",
            Self::Passport => "Verify International Passport",
            Self::Tin => "Verify TIN",
            Self::Nin => "Verify NIN",
            Self::DriversLicense => "Verify Driver's License",
            Self::CreditHistory => "Get Credit History",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Address => "Verify a residential address using the meter number of the property",
            Self::Passport => "Verify an international passport against the holder's last name and date of birth",
            Self::Tin => "Verify a tax identification number",
            Self::Nin => "Verify a national identification number",
            Self::DriversLicense => "Verify a driver's license against the holder's name and date of birth",
            Self::CreditHistory => "Return the credit history of a customer by BVN from a credit bureau",
        }
    }

    fn properties(&self) -> (Value, Vec<&'static str>) {
        match self {
            Self::Address => (
                json!({
                    "meterNumber": json_schema_string("Meter number of the property"),
                    "address": json_schema_string("Full residential address")
                }),
                vec!["meterNumber", "address"],
            ),
            Self::Passport => (
                json!({
                    "passportNumber": json_schema_string("International passport number"),
                    "lastName": json_schema_string("Last name of the passport holder"),
                    "dateOfBirth": json_schema_string("Date of birth, YYYY-MM-DD")
                }),
                vec!["passportNumber", "lastName", "dateOfBirth"],
            ),
            Self::Tin => (
                json!({
                    "number": json_schema_string("Tax identification number"),
                    "channel": json_schema_enum(&["tin", "cac"], "Lookup channel")
                }),
                vec!["number", "channel"],
            ),
            Self::Nin => (
                json!({
                    "nin": json_schema_string("National identification number")
                }),
                vec!["nin"],
            ),
            Self::DriversLicense => (
                json!({
                    "licenseNumber": json_schema_string("Driver's license number"),
                    "dateOfBirth": json_schema_string("Date of birth, YYYY-MM-DD"),
                    "firstName": json_schema_string("First name of the license holder"),
                    "lastName": json_schema_string("Last name of the license holder")
                }),
                vec!["licenseNumber", "dateOfBirth", "firstName", "lastName"],
            ),
            Self::CreditHistory => (
                json!({
                    "provider": json_schema_enum(&["crc", "xds", "all"], "Credit bureau to query"),
                    "bvn": json_schema_string("Bank verification number of the customer")
                }),
                vec!["provider", "bvn"],
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressArgs {
    meter_number: String,
    address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PassportArgs {
    passport_number: String,
    last_name: String,
    date_of_birth: String,
}

#[derive(Debug, Deserialize)]
struct TinArgs {
    number: String,
    channel: String,
}

#[derive(Debug, Deserialize)]
struct NinArgs {
    nin: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriversLicenseArgs {
    license_number: String,
    date_of_birth: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct CreditHistoryArgs {
    provider: String,
    bvn: String,
}

/// Tool for the checks in [`Verification`]
pub struct VerificationTool {
    client: Arc<MonoClient>,
    kind: Verification,
}

impl VerificationTool {
    pub fn new(client: Arc<MonoClient>, kind: Verification) -> Self {
        Self { client, kind }
    }
}

#[async_trait::async_trait]
impl Tool for VerificationTool {
    fn schema(&self) -> ToolSchema {
        let (properties, required) = self.kind.properties();
        ToolSchema {
            name: self.kind.name().to_string(),
            title: Some(self.kind.title().to_string()),
            description: self.kind.description().to_string(),
            input_schema: json_schema_object(properties, required),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let name = self.kind.name();
        let verification = self.client.verification();

        let outcome = match self.kind {
            Verification::Address => {
                let args: AddressArgs = parse_args(name, arguments)?;
                verification
                    .address(&AddressVerification {
                        meter_number: args.meter_number,
                        address: args.address,
                    })
                    .await
            }
            Verification::Passport => {
                let args: PassportArgs = parse_args(name, arguments)?;
                verification
                    .passport(&PassportVerification {
                        passport_number: args.passport_number,
                        last_name: args.last_name,
                        date_of_birth: args.date_of_birth,
                    })
                    .await
            }
            Verification::Tin => {
                let args: TinArgs = parse_args(name, arguments)?;
                verification
                    .tin(&TinVerification {
                        number: args.number,
                        channel: args.channel,
                    })
                    .await
            }
            Verification::Nin => {
                let args: NinArgs = parse_args(name, arguments)?;
                verification.nin(&NinVerification { nin: args.nin }).await
            }
            Verification::DriversLicense => {
                let args: DriversLicenseArgs = parse_args(name, arguments)?;
                verification
                    .drivers_license(&DriversLicenseVerification {
                        license_number: args.license_number,
                        date_of_birth: args.date_of_birth,
                        first_name: args.first_name,
                        last_name: args.last_name,
                    })
                    .await
            }
            Verification::CreditHistory => {
                let args: CreditHistoryArgs = parse_args(name, arguments)?;
                verification
                    .credit_history(&args.provider, &CreditHistoryRequest { bvn: args.bvn })
                    .await
            }
        };
        Ok(respond(name, outcome))
    }
}
