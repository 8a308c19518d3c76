//! # Universign Rust SDK
//!
//! Client library for the Universign electronic signature service.
//!
//! A transaction bundles one or more documents and one or more signers. Every
//! piece of a transaction is built through a validating constructor: an
//! entity either exists fully valid or is not built at all, so a
//! [`TransactionRequest`] is always well formed by the time it reaches the
//! network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use universign::{
//!     BasicAuthConfig, Client, DocumentType, SEPAData, SEPADataOptions, SEPAThirdParty,
//!     SEPAThirdPartyOptions, TransactionDocument, TransactionDocumentOptions,
//!     TransactionRequest, TransactionRequestOptions, TransactionSigner,
//!     TransactionSignerOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(BasicAuthConfig::with_credentials("user@example.com", "secret")?)?;
//!
//!     let party = |name: &str| {
//!         SEPAThirdParty::new(SEPAThirdPartyOptions {
//!             name: Some(name.to_string()),
//!             address: Some("1 Rue du Mas de Verchant".to_string()),
//!             postal_code: Some("34000".to_string()),
//!             city: Some("Montpellier".to_string()),
//!             country: Some("France".to_string()),
//!         })
//!     };
//!
//!     let mandate = TransactionDocument::new(TransactionDocumentOptions {
//!         document_type: Some(DocumentType::Sepa),
//!         file_name: Some("SEPA mandate".to_string()),
//!         sepa_data: Some(SEPAData::new(SEPADataOptions {
//!             rum: Some("REF_TEST_001".to_string()),
//!             ics: Some("FR12ZZZ123456".to_string()),
//!             iban: Some("FR7630001007941234567890185".to_string()),
//!             bic: Some("BDFEFR2L".to_string()),
//!             recurring: Some(false),
//!             debtor: Some(party("John Doe")?),
//!             creditor: Some(party("MyCompany")?),
//!         })?),
//!         ..Default::default()
//!     })?;
//!
//!     let request = TransactionRequest::new(TransactionRequestOptions {
//!         signers: Some(vec![TransactionSigner::new(TransactionSignerOptions {
//!             email_address: Some("john@doe.com".to_string()),
//!             ..Default::default()
//!         })?]),
//!         documents: Some(vec![mandate]),
//!         must_contact_first_signer: Some(true),
//!         ..Default::default()
//!     })?;
//!
//!     let response = client.requester().request_transaction(&request).await?;
//!     println!("Sign at {}", response.url);
//!     Ok(())
//! }
//! ```
//!
//! ## Raw options
//!
//! Every entity can also be built from a JSON options bag with
//! [`Validate::from_json`]. Unknown keys are ignored; values of the wrong type
//! are rejected.
//!
//! ## Error Handling
//!
//! All operations return `Result<T, UniversignError>`:
//!
//! ```rust,no_run
//! use universign::{BasicAuthConfig, BasicAuthConfigOptions, UniversignError};
//!
//! match BasicAuthConfig::new(BasicAuthConfigOptions {
//!     pass: Some("foo".to_string()),
//!     ..Default::default()
//! }) {
//!     Ok(_) => unreachable!(),
//!     Err(UniversignError::Validation { entity, field, .. }) => {
//!         println!("{entity} is missing {field}");
//!     }
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

pub mod auth;
pub mod client;
pub mod document;
pub mod error;
pub mod request;
pub mod requester;
pub mod sepa;
pub mod signature_field;
pub mod signer;
pub mod transport;
pub mod types;
pub mod validation;
pub mod xmlrpc;

// Re-export main types at the crate root
pub use auth::{BasicAuthConfig, BasicAuthConfigOptions};
pub use client::{Client, ClientConfig};
pub use document::{MetaValue, TransactionDocument, TransactionDocumentOptions};
pub use error::{Result, UniversignError};
pub use request::{TransactionRequest, TransactionRequestOptions};
pub use requester::RequesterClient;
pub use sepa::{SEPAData, SEPADataOptions, SEPAThirdParty, SEPAThirdPartyOptions};
pub use signature_field::{
    DocSignatureField, DocSignatureFieldInput, DocSignatureFieldOptions, DocumentField,
    SignatureField, SignatureFieldOptions,
};
pub use signer::{TransactionSigner, TransactionSignerOptions};
pub use transport::{HttpTransport, Transport};
pub use types::{
    CertificateType, ChainingMode, DocumentType, HandwrittenSignatureMode, Language, Role,
    SignedDocument, TransactionResponse,
};
pub use validation::Validate;
pub use xmlrpc::Value;
