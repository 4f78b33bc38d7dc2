use thiserror::Error;

use crate::parsers::commerzbank::prelude::CommerzbankTransaction;

/// Erros possíveis durante a conversão de extratos bancários
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Formato do arquivo não é suportado pela biblioteca
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// Erro ao gravar o arquivo de saída
    #[error("Failed to write output: {0}")]
    WriteFailed(std::io::Error),

    /// Falha no enquadramento CSV (cabeçalho ilegível, aspas quebradas, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Erros por registro ──────────────────────────────────────────────────────

    /// Registro com número de campos diferente do esperado; descartado inteiro
    #[error("Invalid record length (need {expected}): {found}")]
    MalformedRecord { expected: usize, found: usize },

    /// Data fora do formato DD.MM.AAAA
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Valor não numérico (separador decimal é vírgula)
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0:?}")]
    UnknownCurrency(String),

    #[error("Unknown transaction category: {0:?}")]
    UnknownCategory(String),

    /// Todos os erros de campo de um registro, agregados. O registro parcial
    /// continua disponível para diagnóstico.
    #[error("Record rejected: {}", join_errors(.errors))]
    RecordRejected {
        errors: Vec<StatementParseError>,
        partial: Box<CommerzbankTransaction>,
    },

    // ── Condições não fatais ────────────────────────────────────────────────────

    /// Tabela de favorecidos conhecidos ausente ou malformada
    #[error("Payee registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Nenhuma estratégia identificou o favorecido
    #[error("Payee unknown")]
    PayeeUnknown,
}

fn join_errors(errors: &[StatementParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;
