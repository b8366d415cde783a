//! Curated charity table.
//!
//! The table is loaded once and never mutated. Each record is either a
//! direct on-chain recipient (with a published address) or an external
//! redirect (with a donation-processor URL), never both.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::DonationError;

/// How a charity accepts donations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharityMode {
    /// Transfer straight to the charity's published address.
    Direct,
    /// Link out to a donation processor (e.g. The Giving Block).
    #[serde(alias = "givingblock")]
    ExternalRedirect,
}

/// Where a charity's details were checked, for trust display in the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub source_label: String,
    /// `YYYY-MM-DD`
    pub verified_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub verify_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mode: CharityMode,
    pub verification: Verification,
    /// Required for `Direct`, forbidden otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Required for `ExternalRedirect`, forbidden otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_url: Option<String>,
}

impl CharityRecord {
    pub fn is_direct(&self) -> bool {
        self.mode == CharityMode::Direct
    }

    /// The published on-chain recipient.
    pub fn recipient_address(&self) -> Result<&str, DonationError> {
        self.address
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| DonationError::MissingRecipientAddress(self.id.clone()))
    }

    pub fn redirect_url(&self) -> Result<&str, DonationError> {
        self.donation_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DonationError::MissingRedirectUrl(self.id.clone()))
    }

    /// Check every invariant a loaded record must satisfy.
    pub fn validate(&self) -> Result<(), DonationError> {
        let invalid = |what: &str| DonationError::InvalidRegistry(format!("{}: {what}", self.id));

        if self.id.is_empty() {
            return Err(DonationError::InvalidRegistry("charity id is empty".into()));
        }
        if self.name.is_empty() {
            return Err(invalid("name is empty"));
        }

        let v = &self.verification;
        if v.source_label.is_empty() || v.verify_url.is_empty() {
            return Err(invalid("verification metadata is incomplete"));
        }
        if !is_iso_date(&v.verified_at) {
            return Err(invalid("verified_at must be YYYY-MM-DD"));
        }

        match self.mode {
            CharityMode::Direct => {
                let address = self.recipient_address()?;
                if self.donation_url.is_some() {
                    return Err(invalid("direct charity must not carry a donation URL"));
                }
                chain_sol::validate_address(address)
                    .map_err(|e| DonationError::InvalidRecipient(format!("{}: {e}", self.id)))?;
            }
            CharityMode::ExternalRedirect => {
                self.redirect_url()?;
                if self.address.is_some() {
                    return Err(invalid("external charity must not carry an on-chain address"));
                }
            }
        }

        Ok(())
    }
}

/// `YYYY-MM-DD` naming a real calendar day.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return false;
    }

    let (Ok(year), Ok(month), Ok(day)) = (
        s[0..4].parse::<u32>(),
        s[5..7].parse::<u32>(),
        s[8..10].parse::<u32>(),
    ) else {
        return false;
    };
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}

/// Immutable, validated charity table.
#[derive(Debug, Clone)]
pub struct CharityRegistry {
    records: Vec<CharityRecord>,
}

impl CharityRegistry {
    /// Build a registry, rejecting duplicate ids and invalid records.
    pub fn from_records(records: Vec<CharityRecord>) -> Result<Self, DonationError> {
        let mut seen = HashSet::new();
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(DonationError::InvalidRegistry(format!(
                    "duplicate charity id: {}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    /// Load a registry from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, DonationError> {
        let records: Vec<CharityRecord> = serde_json::from_str(json)
            .map_err(|e| DonationError::InvalidRegistry(format!("malformed JSON: {e}")))?;
        let registry = Self::from_records(records)?;
        tracing::debug!(charities = registry.records.len(), "loaded charity registry");
        Ok(registry)
    }

    /// The built-in table, initialized on first use and shared process-wide.
    pub fn builtin() -> &'static CharityRegistry {
        static BUILTIN: OnceLock<CharityRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| CharityRegistry {
            records: builtin_records(),
        })
    }

    pub fn lookup(&self, id: &str) -> Result<&CharityRecord, DonationError> {
        self.records.iter().find(|c| c.id == id).ok_or_else(|| {
            tracing::warn!(charity_id = id, "unknown charity id");
            DonationError::UnknownCharity(id.to_string())
        })
    }

    /// Records in table order; external-redirect charities only when asked.
    pub fn list(&self, include_external: bool) -> Vec<&CharityRecord> {
        self.records
            .iter()
            .filter(|c| include_external || c.is_direct())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn builtin_records() -> Vec<CharityRecord> {
    vec![
        CharityRecord {
            id: "rfus".into(),
            name: "Rainforest Foundation US".into(),
            description: "Protects rainforests and supports Indigenous and local communities \
                          through conservation and advocacy. (Direct SOL transfer.)"
                .into(),
            mode: CharityMode::Direct,
            verification: Verification {
                source_label: "Rainforest Foundation US crypto donation page".into(),
                verified_at: "2025-12-28".into(),
                notes: Some("Direct SOL transfer address published by the charity.".into()),
                verify_url: "https://rainforestfoundation.org/give/cryptocurrency/#donate-crypto"
                    .into(),
            },
            address: Some("8r2EpKVHLf1ASuDtj2up8TDwjkTbHbDY94UcT7jcEQ1s".into()),
            donation_url: None,
        },
        CharityRecord {
            id: "stc".into(),
            name: "Save the Children".into(),
            description: "Supports children worldwide with health, education, protection and \
                          emergency aid. (Donate via Giving Block.)"
                .into(),
            mode: CharityMode::ExternalRedirect,
            verification: Verification {
                source_label: "Save the Children donation page (The Giving Block)".into(),
                verified_at: "2025-12-28".into(),
                notes: Some(
                    "Donation handled via Giving Block; no direct on-chain recipient address \
                     shown in-app."
                        .into(),
                ),
                verify_url: "https://www.savethechildren.net/donate/donate-cryptocurrency".into(),
            },
            address: None,
            donation_url: Some("https://thegivingblock.com/donate/save-the-children/".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(id: &str) -> CharityRecord {
        let mut record = builtin_records().remove(0);
        record.id = id.into();
        record
    }

    #[test]
    fn builtin_table_satisfies_invariants() {
        let registry = CharityRegistry::builtin();
        for record in registry.list(true) {
            record.validate().unwrap();
            assert_ne!(record.address.is_some(), record.donation_url.is_some());
            assert_eq!(record.address.is_some(), record.is_direct());
        }
        CharityRegistry::from_records(builtin_records()).unwrap();
    }

    #[test]
    fn builtin_is_shared() {
        assert!(std::ptr::eq(CharityRegistry::builtin(), CharityRegistry::builtin()));
    }

    #[test]
    fn lookup_known_and_unknown() {
        let registry = CharityRegistry::builtin();
        assert_eq!(registry.lookup("rfus").unwrap().name, "Rainforest Foundation US");
        assert_eq!(registry.lookup("stc").unwrap().mode, CharityMode::ExternalRedirect);

        let err = registry.lookup("unicef").unwrap_err();
        assert!(matches!(err, DonationError::UnknownCharity(ref id) if id == "unicef"));
    }

    #[test]
    fn list_filters_external_charities() {
        let registry = CharityRegistry::builtin();
        let all: Vec<&str> = registry.list(true).iter().map(|c| c.id.as_str()).collect();
        let direct: Vec<&str> = registry.list(false).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(all, vec!["rfus", "stc"]);
        assert_eq!(direct, vec!["rfus"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CharityRegistry::from_records(vec![direct("a"), direct("a")]).unwrap_err();
        assert!(err.to_string().contains("duplicate charity id: a"));
    }

    #[test]
    fn direct_record_without_address_is_rejected() {
        let mut record = direct("a");
        record.address = None;
        assert!(matches!(
            record.validate(),
            Err(DonationError::MissingRecipientAddress(_))
        ));
    }

    #[test]
    fn record_with_both_destinations_is_rejected() {
        let mut record = direct("a");
        record.donation_url = Some("https://example.org/donate".into());
        assert!(record.validate().is_err());
    }

    #[test]
    fn external_record_without_url_is_rejected() {
        let mut record = builtin_records().remove(1);
        record.donation_url = Some(String::new());
        assert!(matches!(
            record.validate(),
            Err(DonationError::MissingRedirectUrl(_))
        ));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let mut record = direct("a");
        record.address = Some("not-base58!".into());
        assert!(matches!(record.validate(), Err(DonationError::InvalidRecipient(_))));
    }

    #[test]
    fn empty_verification_is_rejected() {
        let mut record = direct("a");
        record.verification.source_label.clear();
        assert!(record.validate().is_err());

        let mut record = direct("b");
        record.verification.verified_at = "28/12/2025".into();
        assert!(record.validate().is_err());
    }

    #[test]
    fn verified_at_must_be_a_calendar_day() {
        for bad in ["2025-99-99", "2025-00-10", "2025-04-31", "2025-02-29", "2025-12-00"] {
            assert!(!is_iso_date(bad), "{bad}");
        }
        for good in ["2025-12-28", "2024-02-29", "2000-02-29", "2025-01-31"] {
            assert!(is_iso_date(good), "{good}");
        }
        assert!(!is_iso_date("1900-02-29"));

        let mut record = direct("a");
        record.verification.verified_at = "2025-99-99".into();
        assert!(record.validate().is_err());
    }

    #[test]
    fn from_json_accepts_legacy_mode_name() {
        let json = r#"[{
            "id": "stc",
            "name": "Save the Children",
            "description": "Link-out donation",
            "mode": "givingblock",
            "verification": {
                "source_label": "Giving Block page",
                "verified_at": "2025-12-28",
                "verify_url": "https://www.savethechildren.net/donate/donate-cryptocurrency"
            },
            "donation_url": "https://thegivingblock.com/donate/save-the-children/"
        }]"#;
        let registry = CharityRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("stc").unwrap().mode, CharityMode::ExternalRedirect);
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = CharityRegistry::from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
