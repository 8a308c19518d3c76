//! SEPA mandate data.
//!
//! When a document has the `sepa` type no PDF is uploaded: the service renders
//! the mandate from a [`SEPAData`] structure.

use crate::error::{Result, UniversignError};
use crate::validation::{FieldRule, Schema, Validate};
use crate::xmlrpc::{StructBuilder, Value};
use serde::Deserialize;

/// Options for [`SEPAThirdParty::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SEPAThirdPartyOptions {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// The debtor or the creditor of a SEPA mandate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SEPAThirdPartyOptions")]
pub struct SEPAThirdParty {
    name: String,
    address: String,
    postal_code: String,
    city: String,
    country: String,
}

impl SEPAThirdParty {
    /// Validate the options and build the third party. Every field is
    /// mandatory.
    pub fn new(options: SEPAThirdPartyOptions) -> Result<Self> {
        Self::validate(options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl Validate for SEPAThirdParty {
    const ENTITY: &'static str = "SEPAThirdParty";
    type Options = SEPAThirdPartyOptions;

    fn validate(options: SEPAThirdPartyOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            name: schema.required("name", options.name)?,
            address: schema.required("address", options.address)?,
            postal_code: schema.required("postalCode", options.postal_code)?,
            city: schema.required("city", options.city)?,
            country: schema.required("country", options.country)?,
        })
    }
}

impl TryFrom<SEPAThirdPartyOptions> for SEPAThirdParty {
    type Error = UniversignError;

    fn try_from(options: SEPAThirdPartyOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl FieldRule for SEPAThirdParty {}

impl From<&SEPAThirdParty> for Value {
    fn from(party: &SEPAThirdParty) -> Self {
        StructBuilder::new()
            .member("name", party.name.as_str())
            .member("address", party.address.as_str())
            .member("postalCode", party.postal_code.as_str())
            .member("city", party.city.as_str())
            .member("country", party.country.as_str())
            .build()
    }
}

/// Options for [`SEPAData::new`].
///
/// `debtor` and `creditor` are already validated third parties; they are not
/// checked again.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SEPADataOptions {
    /// Unique mandate reference (RUM).
    pub rum: Option<String>,
    /// Creditor identifier (ICS).
    pub ics: Option<String>,
    /// Debtor IBAN.
    pub iban: Option<String>,
    /// Debtor BIC.
    pub bic: Option<String>,
    /// Recurring payment (`true`) or one-off payment (`false`).
    pub recurring: Option<bool>,
    pub debtor: Option<SEPAThirdParty>,
    pub creditor: Option<SEPAThirdParty>,
}

/// Data needed by the service to generate a SEPA mandate PDF.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SEPADataOptions")]
pub struct SEPAData {
    rum: String,
    ics: String,
    iban: String,
    bic: String,
    recurring: bool,
    debtor: SEPAThirdParty,
    creditor: SEPAThirdParty,
}

impl SEPAData {
    /// Validate the options and build the mandate data. Every field is
    /// mandatory.
    pub fn new(options: SEPADataOptions) -> Result<Self> {
        Self::validate(options)
    }

    /// Unique mandate reference.
    pub fn rum(&self) -> &str {
        &self.rum
    }

    /// Creditor identifier.
    pub fn ics(&self) -> &str {
        &self.ics
    }

    /// Debtor IBAN.
    pub fn iban(&self) -> &str {
        &self.iban
    }

    /// Debtor bank BIC.
    pub fn bic(&self) -> &str {
        &self.bic
    }

    /// `true` for a recurring mandate, `false` for a one-off payment.
    pub fn recurring(&self) -> bool {
        self.recurring
    }

    /// The party being debited.
    pub fn debtor(&self) -> &SEPAThirdParty {
        &self.debtor
    }

    /// The party collecting the payment.
    pub fn creditor(&self) -> &SEPAThirdParty {
        &self.creditor
    }
}

impl Validate for SEPAData {
    const ENTITY: &'static str = "SEPAData";
    type Options = SEPADataOptions;

    fn validate(options: SEPADataOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            rum: schema.required("rum", options.rum)?,
            ics: schema.required("ics", options.ics)?,
            iban: schema.required("iban", options.iban)?,
            bic: schema.required("bic", options.bic)?,
            recurring: schema.required("recurring", options.recurring)?,
            debtor: schema.required("debtor", options.debtor)?,
            creditor: schema.required("creditor", options.creditor)?,
        })
    }
}

impl TryFrom<SEPADataOptions> for SEPAData {
    type Error = UniversignError;

    fn try_from(options: SEPADataOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl FieldRule for SEPAData {}

impl From<&SEPAData> for Value {
    fn from(data: &SEPAData) -> Self {
        StructBuilder::new()
            .member("rum", data.rum.as_str())
            .member("ics", data.ics.as_str())
            .member("iban", data.iban.as_str())
            .member("bic", data.bic.as_str())
            .member("recurring", data.recurring)
            .member("debtor", &data.debtor)
            .member("creditor", &data.creditor)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str) -> SEPAThirdParty {
        SEPAThirdParty::new(SEPAThirdPartyOptions {
            name: Some(name.to_string()),
            address: Some("1 rue de quelque part".to_string()),
            postal_code: Some("34000".to_string()),
            city: Some("Montpellier".to_string()),
            country: Some("France".to_string()),
        })
        .unwrap()
    }

    fn mandate() -> SEPADataOptions {
        SEPADataOptions {
            rum: Some("REF_TEST_001".to_string()),
            ics: Some("FR12ZZZ123456".to_string()),
            iban: Some("FR7630001007941234567890185".to_string()),
            bic: Some("BDFEFR2L".to_string()),
            recurring: Some(false),
            debtor: Some(party("John Doe")),
            creditor: Some(party("MyCompany")),
        }
    }

    #[test]
    fn test_third_party_all_fields_mandatory() {
        let err = SEPAThirdParty::new(SEPAThirdPartyOptions {
            name: Some("John Doe".to_string()),
            address: Some("1 rue".to_string()),
            city: Some("Montpellier".to_string()),
            country: Some("France".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "SEPAThirdParty - \"postalCode\" is required");
    }

    #[test]
    fn test_sepa_data() {
        let data = SEPAData::new(mandate()).unwrap();
        assert_eq!(data.debtor().name(), "John Doe");
        assert_eq!(data.creditor().name(), "MyCompany");
        assert!(!data.recurring());

        let value = Value::from(&data);
        assert_eq!(value.get("recurring"), Some(&Value::Bool(false)));
        assert_eq!(
            value
                .get("creditor")
                .and_then(|c| c.get("postalCode"))
                .and_then(Value::as_str),
            Some("34000")
        );
    }

    #[test]
    fn test_sepa_data_requires_parties() {
        let err = SEPAData::new(SEPADataOptions {
            creditor: None,
            ..mandate()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "SEPAData - \"creditor\" is required");

        let err = SEPAData::new(SEPADataOptions {
            recurring: None,
            ..mandate()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "SEPAData - \"recurring\" is required");
    }

    #[test]
    fn test_sepa_data_from_json_validates_nested_parties() {
        let err = SEPAData::from_json(serde_json::json!({
            "rum": "R", "ics": "I", "iban": "FR76", "bic": "B", "recurring": true,
            "debtor": { "name": "John Doe" },
            "creditor": { "name": "MyCompany" }
        }))
        .unwrap_err();

        assert!(err.is_validation_error());
        assert!(err.to_string().contains("SEPAThirdParty - \"address\" is required"));
    }
}
