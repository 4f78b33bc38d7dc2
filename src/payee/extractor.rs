use serde::{Deserialize, Serialize};

use super::normalize::{match_prefix_ignore_case, normalize, rfind_ignore_case};
use super::registry::PayeeRegistry;
use crate::types::TransactionCategory;

/// Payee reported when no strategy could identify the counterparty.
pub const UNKNOWN_PAYEE: &str = "Unknown";

/// Legal-entity suffixes, tried in this order. A later entry that occurs
/// anywhere in the narration overrides every earlier one, regardless of
/// where either occurs.
pub const CORPORATE_SUFFIXES: &[&str] = &[
    "e. V.", "KG", "GmbH", "AG", "OHG", "GbR", "PartG", "UG", "SE", "Inc.", "Ltd.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub payee: String,
    pub memo: String,
    /// `false` means the payee fell back to [`UNKNOWN_PAYEE`].
    pub matched: bool,
}

/// Splits narrations into payee and memo.
///
/// Strategies, first applicable wins:
/// 1. fees always go to the institution itself
/// 2. prefix match against the [`PayeeRegistry`]
/// 3. split after a corporate suffix (see [`CORPORATE_SUFFIXES`])
/// 4. fall back to [`UNKNOWN_PAYEE`] with the whole text as memo
///
/// Extraction never fails and never logs; callers decide what an unmatched
/// payee means for them.
#[derive(Debug, Clone)]
pub struct PayeeExtractor {
    registry: PayeeRegistry,
    institution: String,
}

impl PayeeExtractor {
    pub fn new(registry: PayeeRegistry, institution: impl Into<String>) -> Self {
        Self {
            registry,
            institution: institution.into(),
        }
    }

    pub fn registry(&self) -> &PayeeRegistry {
        &self.registry
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn extract(&self, text: &str, category: TransactionCategory) -> ExtractionResult {
        if category == TransactionCategory::Fee {
            return ExtractionResult {
                payee: self.institution.clone(),
                memo: normalize(text),
                matched: true,
            };
        }
        self.extract_counterparty(text)
    }

    /// Extraction for narrations without a usable category: registry,
    /// suffix heuristic and fallback only.
    pub fn extract_counterparty(&self, text: &str) -> ExtractionResult {
        let memo = normalize(text);

        if let Some(result) = self
            .match_registry(&memo)
            .or_else(|| split_at_corporate_suffix(&memo))
        {
            return result;
        }

        ExtractionResult {
            payee: UNKNOWN_PAYEE.to_string(),
            memo,
            matched: false,
        }
    }

    fn match_registry(&self, memo: &str) -> Option<ExtractionResult> {
        self.registry.iter().find_map(|(canonical, variations)| {
            variations.iter().find_map(|variation| {
                match_prefix_ignore_case(memo, variation).map(|len| ExtractionResult {
                    payee: canonical.to_string(),
                    memo: memo[len..].trim().to_string(),
                    matched: true,
                })
            })
        })
    }
}

fn split_at_corporate_suffix(memo: &str) -> Option<ExtractionResult> {
    let split = CORPORATE_SUFFIXES
        .iter()
        .filter_map(|suffix| rfind_ignore_case(memo, suffix))
        .map(|(_, end)| end)
        .last()?;

    Some(ExtractionResult {
        payee: memo[..split].to_string(),
        memo: memo[split..].trim().to_string(),
        matched: true,
    })
}
