use std::path::{Path, PathBuf};

use dartnote_core::config::{load_batch_config, CompanyJob};
use dartnote_core::error::DartError;

use crate::output;

/// Process every configured company sequentially. One company's failure is
/// reported and counted, never propagated to the others.
pub fn run(config_file: PathBuf, data_dir: PathBuf) -> Result<(), DartError> {
    let config = load_batch_config(&config_file)?;
    let total = config.companies.len();
    let mut succeeded = 0usize;

    for job in &config.companies {
        match process_company(job, &data_dir) {
            Ok(()) => succeeded += 1,
            Err(e) => eprintln!("{}: {e}", job.company_name),
        }
    }

    eprintln!("{succeeded}/{total} companies processed");
    Ok(())
}

fn process_company(job: &CompanyJob, data_dir: &Path) -> Result<(), DartError> {
    let meta = job.meta()?;
    let input_path = data_dir.join(meta.notes_filename());

    let html = std::fs::read_to_string(&input_path).map_err(|e| DartError::DocumentRead {
        path: input_path.clone(),
        reason: e.to_string(),
    })?;

    let extraction = dartnote_core::extract_tables(&html, &meta)?;

    let out_path = data_dir.join(meta.csv_filename());
    output::csv::write_rows(&out_path, &extraction.rows)?;

    eprintln!(
        "{}: {} table(s), {} row(s) -> {}",
        meta.company,
        extraction.table_count,
        extraction.data_row_count,
        out_path.display()
    );

    Ok(())
}
