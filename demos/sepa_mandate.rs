//! Submit a SEPA mandate transaction.
//!
//! This example demonstrates:
//! - Building SEPA mandate data and a transaction request
//! - Submitting it to the signature service
//! - Following the transaction up
//!
//! Run with:
//! ```bash
//! UNIVERSIGN_USER=xxx UNIVERSIGN_PASS=xxx RUST_LOG=universign=debug cargo run --example sepa_mandate
//! ```

use universign::{
    BasicAuthConfig, CertificateType, Client, ClientConfig, DocumentType, HandwrittenSignatureMode,
    Language, SEPAData, SEPADataOptions, SEPAThirdParty, SEPAThirdPartyOptions,
    TransactionDocument, TransactionDocumentOptions, TransactionRequest,
    TransactionRequestOptions, TransactionSigner, TransactionSignerOptions,
};

fn third_party(name: &str, address: &str) -> universign::Result<SEPAThirdParty> {
    SEPAThirdParty::new(SEPAThirdPartyOptions {
        name: Some(name.to_string()),
        address: Some(address.to_string()),
        postal_code: Some("34000".to_string()),
        city: Some("Montpellier".to_string()),
        country: Some("France".to_string()),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let user = std::env::var("UNIVERSIGN_USER").expect("UNIVERSIGN_USER environment variable required");
    let pass = std::env::var("UNIVERSIGN_PASS").expect("UNIVERSIGN_PASS environment variable required");
    let url = std::env::var("UNIVERSIGN_URL").ok();

    let client = Client::with_config(ClientConfig {
        url,
        basic_auth: Some(BasicAuthConfig::with_credentials(user, pass)?),
        ..Default::default()
    })?;

    println!("Building transaction request...");
    let mandate = TransactionDocument::new(TransactionDocumentOptions {
        document_type: Some(DocumentType::Sepa),
        file_name: Some("Mandat SEPA de Test".to_string()),
        sepa_data: Some(SEPAData::new(SEPADataOptions {
            rum: Some("REF_TEST_001".to_string()),
            ics: Some("FR12ZZZ123456".to_string()),
            iban: Some("FR7630001007941234567890185".to_string()),
            bic: Some("BDFEFR2L".to_string()),
            recurring: Some(false),
            debtor: Some(third_party("John Doe", "1 rue de quelque part")?),
            creditor: Some(third_party("MyCompany", "1 Rue du Mas de Verchant")?),
        })?),
        ..Default::default()
    })?;

    let request = TransactionRequest::new(TransactionRequestOptions {
        signers: Some(vec![TransactionSigner::new(TransactionSignerOptions {
            firstname: Some("john".to_string()),
            lastname: Some("doe".to_string()),
            email_address: Some("john@doe.com".to_string()),
            ..Default::default()
        })?]),
        documents: Some(vec![mandate]),
        must_contact_first_signer: Some(true),
        handwritten_signature_mode: Some(HandwrittenSignatureMode::Enabled),
        certificate_type: Some(CertificateType::Simple),
        language: Some(Language::French),
        ..Default::default()
    })?;

    println!("Submitting transaction...");
    let response = client.requester().request_transaction(&request).await?;
    println!("  ID:  {}", response.id);
    println!("  URL: {}", response.url);

    println!("\nFetching transaction info...");
    let info = client.requester().get_transaction_info(&response.id).await?;
    println!("  Status: {:?}", info.get("status"));

    println!("\nDone!");
    Ok(())
}
