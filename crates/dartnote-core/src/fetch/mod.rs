pub mod corp_index;
pub mod viewer;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::DartError;
use crate::model::{FilingMeta, ReportKind};

const CORP_CODE_URL: &str = "https://opendart.fss.or.kr/api/corpCode.xml";
const LIST_URL: &str = "https://opendart.fss.or.kr/api/list.json";
const VIEWER_MAIN_URL: &str = "https://dart.fss.or.kr/dsaf001/main.do";

const STATUS_OK: &str = "000";
const STATUS_NO_DATA: &str = "013";

/// Bodies shorter than this are viewer error pages, not documents.
const MIN_DOCUMENT_LEN: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub list: Vec<FilingSummary>,
}

/// One filing from the `list.json` API.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingSummary {
    pub rcept_no: String,
    #[serde(default)]
    pub rcept_dt: String,
    #[serde(default)]
    pub report_nm: String,
    #[serde(default)]
    pub corp_name: String,
}

/// A downloaded consolidated-notes document with its provenance.
#[derive(Debug, Clone)]
pub struct FetchedNotes {
    pub meta: FilingMeta,
    pub rcept_no: String,
    pub rcept_dt: String,
    pub title: String,
    pub url: String,
    pub html: String,
}

/// Blocking client for the DART open API and document viewer.
///
/// One client per run; the cookie store carries the viewer session between
/// the tree page and the document request.
pub struct DartClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl DartClient {
    pub fn new(api_key: impl Into<String>) -> Result<DartClient, DartError> {
        let http = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()?;
        Ok(DartClient {
            http,
            api_key: api_key.into(),
        })
    }

    /// Resolve a company name to its 8-digit DART corporation code.
    pub fn corp_code(&self, company: &str) -> Result<String, DartError> {
        info!(company, "looking up corporation code");
        let bytes = self
            .http
            .get(CORP_CODE_URL)
            .query(&[("crtfc_key", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .bytes()?;

        let xml = corp_index::unzip_corp_index(&bytes)?;
        let entries = corp_index::parse_corp_index(&xml)?;
        corp_index::find_exact(&entries, company)
            .map(|e| e.corp_code.clone())
            .ok_or_else(|| DartError::CompanyNotFound(company.to_string()))
    }

    /// List the periodic filings matching the requested report kind.
    ///
    /// Filings are sometimes received under the prior year, so the requested
    /// year and the two before it are tried in order.
    pub fn filings(
        &self,
        corp_code: &str,
        meta: &FilingMeta,
    ) -> Result<Vec<FilingSummary>, DartError> {
        for year in candidate_years(&meta.year) {
            debug!(%year, "querying filing list");
            let bgn_de = format!("{year}0101");
            let end_de = format!("{year}1231");
            let response: ListResponse = self
                .http
                .get(LIST_URL)
                .query(&[
                    ("crtfc_key", self.api_key.as_str()),
                    ("corp_code", corp_code),
                    ("bgn_de", bgn_de.as_str()),
                    ("end_de", end_de.as_str()),
                    ("pblntf_ty", "A"),
                    ("page_no", "1"),
                    ("page_count", "100"),
                ])
                .send()?
                .error_for_status()?
                .json()?;

            if response.status == STATUS_NO_DATA {
                debug!(status = %response.status, message = %response.message, "no filings in year");
                continue;
            }
            if response.status != STATUS_OK {
                return Err(DartError::Api {
                    status: response.status,
                    message: response.message,
                });
            }

            let matching = filter_filings(response.list, meta.report);
            if !matching.is_empty() {
                info!(count = matching.len(), %year, "found matching filings");
                return Ok(matching);
            }
        }

        Err(DartError::NoFilings {
            company: meta.company.clone(),
            year: meta.year.clone(),
            report: meta.report.label().to_string(),
        })
    }

    /// Download the consolidated-notes sub-document of one filing.
    pub fn notes_document(&self, rcept_no: &str) -> Result<(viewer::SubDocument, String), DartError> {
        // The tree page also establishes the viewer session cookie.
        let page = self
            .http
            .get(VIEWER_MAIN_URL)
            .query(&[("rcpNo", rcept_no)])
            .send()?
            .error_for_status()?
            .text()?;

        let documents = viewer::parse_sub_documents(&page);
        debug!(count = documents.len(), rcept_no, "parsed sub-document tree");

        let notes = viewer::find_notes_document(&documents)
            .cloned()
            .ok_or_else(|| DartError::NotesNotFound {
                rcept_no: rcept_no.to_string(),
            })?;

        let html = self
            .http
            .get(&notes.url)
            .send()?
            .error_for_status()?
            .text()?;

        if html.trim().len() < MIN_DOCUMENT_LEN {
            return Err(DartError::NotesNotFound {
                rcept_no: rcept_no.to_string(),
            });
        }

        Ok((notes, html))
    }

    /// Full pipeline: company name -> corp code -> filing list -> first
    /// filing with a downloadable consolidated-notes document.
    pub fn fetch_notes(&self, meta: &FilingMeta) -> Result<FetchedNotes, DartError> {
        let corp_code = self.corp_code(&meta.company)?;
        let filings = self.filings(&corp_code, meta)?;

        let mut last_rcept = String::new();
        for filing in &filings {
            last_rcept = filing.rcept_no.clone();
            match self.notes_document(&filing.rcept_no) {
                Ok((notes, html)) => {
                    info!(rcept_no = %filing.rcept_no, title = %notes.title, "downloaded notes document");
                    return Ok(FetchedNotes {
                        meta: meta.clone(),
                        rcept_no: filing.rcept_no.clone(),
                        rcept_dt: filing.rcept_dt.clone(),
                        title: notes.title,
                        url: notes.url,
                        html,
                    });
                }
                Err(e) => {
                    warn!(rcept_no = %filing.rcept_no, error = %e, "filing has no usable notes document");
                }
            }
        }

        Err(DartError::NotesNotFound {
            rcept_no: last_rcept,
        })
    }
}

/// Requested year plus the two before it.
fn candidate_years(year: &str) -> Vec<String> {
    match year.parse::<i32>() {
        Ok(y) => vec![y.to_string(), (y - 1).to_string(), (y - 2).to_string()],
        Err(_) => vec![year.to_string()],
    }
}

/// Keep filings whose title contains the requested report label.
fn filter_filings(filings: Vec<FilingSummary>, kind: ReportKind) -> Vec<FilingSummary> {
    filings
        .into_iter()
        .filter(|f| f.report_nm.contains(kind.label()))
        .collect()
}
