use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DartError {
    #[error("document could not be parsed: {0}")]
    MalformedDocument(String),

    #[error("overview heading not found. The document must contain a '1. 지배기업의 개요' or '1. 회사의 개요' paragraph")]
    OverviewNotFound,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("DART API returned status {status}: {message}")]
    Api { status: String, message: String },

    #[error("company '{0}' not found in the DART corporation index")]
    CompanyNotFound(String),

    #[error("no {report} filings found for {company} around {year}")]
    NoFilings {
        company: String,
        year: String,
        report: String,
    },

    #[error("filing {rcept_no} has no '연결재무제표 주석' sub-document")]
    NotesNotFound { rcept_no: String },

    #[error("corporation index archive is invalid: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("corporation index XML is invalid: {0}")]
    Xml(String),

    #[error("cannot read document {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("unknown report kind '{0}' (expected 사업/반기/분기/1분기/3분기 보고서)")]
    UnknownReportKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
