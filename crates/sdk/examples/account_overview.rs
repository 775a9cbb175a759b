//! Account overview example.
//!
//! Prints the balance and the most recent debits for a linked account.
//!
//! Run with: MONO_SECRET_KEY=... cargo run --example account_overview -- <account-id>

use mono_sdk::{MonoClient, MonoResult, TransactionFilter, TransactionType};

#[tokio::main]
async fn main() -> MonoResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let secret_key = std::env::var("MONO_SECRET_KEY").unwrap_or_default();
    let account_id = std::env::args().nth(1).unwrap_or_else(|| "acct_demo".to_string());

    let client = MonoClient::builder().secret_key(secret_key).build()?;

    println!("Balance for {}:", account_id);
    println!("{}", client.accounts().balance(&account_id).await?);

    let filter = TransactionFilter {
        transaction_type: Some(TransactionType::Debit),
        paginate: Some(false),
        ..Default::default()
    };
    println!("\nDebit transactions:");
    println!("{}", client.accounts().transactions(&account_id, &filter).await?);

    Ok(())
}
