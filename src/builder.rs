use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    config::{ImportConfig, RegistryPolicy},
    errors::StatementParseError,
    parsers::prelude::*,
    payee::{PayeeExtractor, PayeeRegistry},
    types::Transaction,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Non-fatal conditions met during an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// The registry could not be loaded; every non-fee payee was resolved
    /// without it.
    RegistryUnavailable { reason: String },
    /// No strategy identified the payee; it was exported as "Unknown" with
    /// the normalized narration as `memo`.
    PayeeUnknown { line: u64, memo: String },
}

#[derive(Debug)]
pub struct RejectedRecord {
    pub line: u64,
    pub error: StatementParseError,
}

/// Result of one batch: what made it, what did not, and what looked off.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
    registry: Option<PayeeRegistry>,
    registry_path: Option<PathBuf>,
    config: ImportConfig,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    /// Use an already loaded registry. Takes precedence over [`Self::payees_file`].
    pub fn registry(mut self, registry: PayeeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Load the known-payee registry from a JSON file when parsing.
    pub fn payees_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = Some(path.into());
        self
    }

    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parse(self) -> Result<ImportReport, StatementParseError> {
        let content = match self.content {
            Some(content) => content,
            None => self
                .filepath
                .as_deref()
                .ok_or(StatementParseError::MissingContentAndFilepath)
                .and_then(|path| fs::read_to_string(path).map_err(Into::into))?,
        };

        if self.config.has_header
            && !CommerzbankParser::is_supported(self.filepath.as_deref(), &content)
        {
            return Err(StatementParseError::UnsupportedFormat);
        }

        let mut report = ImportReport::default();
        let registry = match (self.registry, self.registry_path) {
            (Some(registry), _) => registry,
            (None, Some(path)) => {
                load_registry(&path, self.config.registry_policy, &mut report.diagnostics)?
            }
            (None, None) => {
                debug!("No payee registry configured");
                PayeeRegistry::new()
            }
        };
        let extractor = PayeeExtractor::new(registry, self.config.institution.as_str());

        let rows = CommerzbankParser::new(&self.config).parse(&content)?;
        for CommerzbankRow { line, record } in rows {
            let raw = match record {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(line, %error, "Dropping record");
                    report.rejected.push(RejectedRecord { line, error });
                    continue;
                }
            };

            let parsed = CommerzbankTransaction::from_raw(raw, &extractor, self.config.timezone);
            if !parsed.payee_matched {
                warn!(line, memo = %parsed.memo, "{}", StatementParseError::PayeeUnknown);
                report.diagnostics.push(Diagnostic::PayeeUnknown {
                    line,
                    memo: parsed.memo.clone(),
                });
            }

            match Transaction::try_from(parsed) {
                Ok(transaction) => report.transactions.push(transaction),
                Err(error) => {
                    warn!(line, %error, "Dropping record");
                    report.rejected.push(RejectedRecord { line, error });
                }
            }
        }

        debug!(
            transactions = report.transactions.len(),
            rejected = report.rejected.len(),
            "Parsed Commerzbank statement"
        );
        Ok(report)
    }
}

fn load_registry(
    path: &Path,
    policy: RegistryPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<PayeeRegistry, StatementParseError> {
    match PayeeRegistry::load(path) {
        Ok(registry) => {
            debug!(payees = registry.len(), path = %path.display(), "Loaded payee registry");
            Ok(registry)
        }
        Err(error) if policy == RegistryPolicy::FailSoft => {
            warn!(%error, "Continuing without known payees");
            diagnostics.push(Diagnostic::RegistryUnavailable {
                reason: error.to_string(),
            });
            Ok(PayeeRegistry::new())
        }
        Err(error) => Err(error),
    }
}
