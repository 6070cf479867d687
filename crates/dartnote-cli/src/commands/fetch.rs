use std::path::PathBuf;

use dartnote_core::error::DartError;
use dartnote_core::fetch::DartClient;
use dartnote_core::model::{FilingMeta, ReportKind};

pub fn run(company: &str, year: &str, report: &str, out_dir: PathBuf) -> Result<(), DartError> {
    let kind = ReportKind::from_str_loose(report)?;
    let meta = FilingMeta::new(company, year, kind)?;

    let api_key = std::env::var("DART_API_KEY").map_err(|_| {
        DartError::ConfigInvalid(
            "DART_API_KEY is not set. Export it or put it in a .env file".into(),
        )
    })?;

    let client = DartClient::new(api_key)?;
    let notes = client.fetch_notes(&meta)?;

    std::fs::create_dir_all(&out_dir)?;
    let path = out_dir.join(meta.notes_filename());
    std::fs::write(&path, &notes.html)?;

    eprintln!(
        "Saved '{}' from filing {} ({}) to {}",
        notes.title,
        notes.rcept_no,
        notes.rcept_dt,
        path.display()
    );

    Ok(())
}
