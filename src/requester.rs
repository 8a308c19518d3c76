//! Transaction operations of the `requester` service.
//!
//! This module provides the RequesterClient for submitting transactions and
//! following them up.

use crate::client::Client;
use crate::error::{Result, UniversignError};
use crate::request::TransactionRequest;
use crate::types::{SignedDocument, TransactionResponse};
use crate::xmlrpc::Value;

const REQUEST_TRANSACTION: &str = "requester.requestTransaction";
const GET_TRANSACTION_INFO: &str = "requester.getTransactionInfo";
const GET_DOCUMENTS: &str = "requester.getDocuments";

/// Client for transaction operations.
///
/// Access via `client.requester()`.
pub struct RequesterClient {
    client: Client,
}

impl RequesterClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Submit a validated transaction request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use universign::{
    ///     BasicAuthConfig, Client, TransactionDocument, TransactionDocumentOptions,
    ///     TransactionRequest, TransactionRequestOptions, TransactionSigner,
    ///     TransactionSignerOptions,
    /// };
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(BasicAuthConfig::with_credentials("user@example.com", "secret")?)?;
    ///
    ///     let request = TransactionRequest::new(TransactionRequestOptions {
    ///         signers: Some(vec![TransactionSigner::new(TransactionSignerOptions {
    ///             email_address: Some("john@doe.com".to_string()),
    ///             ..Default::default()
    ///         })?]),
    ///         documents: Some(vec![TransactionDocument::new(TransactionDocumentOptions {
    ///             url: Some("https://example.com/contract.pdf".to_string()),
    ///             file_name: Some("contract.pdf".to_string()),
    ///             ..Default::default()
    ///         })?]),
    ///         ..Default::default()
    ///     })?;
    ///
    ///     let response = client.requester().request_transaction(&request).await?;
    ///     println!("Transaction {} at {}", response.id, response.url);
    ///     Ok(())
    /// }
    /// ```
    pub async fn request_transaction(&self, request: &TransactionRequest) -> Result<TransactionResponse> {
        let value = self
            .client
            .call(REQUEST_TRANSACTION, vec![Value::from(request)])
            .await?;
        TransactionResponse::try_from(value)
    }

    /// Get the status and details of a transaction, as returned by the service.
    pub async fn get_transaction_info(&self, transaction_id: &str) -> Result<Value> {
        self.client
            .call(GET_TRANSACTION_INFO, vec![Value::from(transaction_id)])
            .await
    }

    /// Download the documents of a transaction.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use universign::{BasicAuthConfig, Client};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new(BasicAuthConfig::with_credentials("user@example.com", "secret")?)?;
    ///
    ///     for document in client.requester().get_documents("38c5be21-cf9c-4bc2").await? {
    ///         println!("{:?}: {} bytes", document.file_name, document.content.len());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_documents(&self, transaction_id: &str) -> Result<Vec<SignedDocument>> {
        let value = self
            .client
            .call(GET_DOCUMENTS, vec![Value::from(transaction_id)])
            .await?;

        match value {
            Value::Array(items) => items.into_iter().map(SignedDocument::try_from).collect(),
            other => Err(UniversignError::Decode(format!(
                "expected an array of documents, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_client_creation() {
        let client = Client::with_config(Default::default()).unwrap();
        let _requester = client.requester();
    }
}
