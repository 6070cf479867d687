use std::fs::File;
use std::io::Write;
use std::path::Path;

use dartnote_core::error::DartError;

/// Write rows as CSV with a UTF-8 BOM so Excel renders Hangul correctly.
///
/// The writer is flexible: header lines and data lines of different groups
/// legitimately differ in width.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<(), DartError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| DartError::Io(std::io::Error::other(e)))?;
    }
    writer
        .flush()
        .map_err(|e| DartError::Io(std::io::Error::other(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_bom_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = vec![
            vec!["회사명".to_string(), "금액".to_string()],
            vec!["A사".to_string(), "19,818".to_string()],
        ];
        write_rows(&path, &rows).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.starts_with("회사명,금액"));
        // Values containing commas are quoted.
        assert!(text.contains("\"19,818\""));
    }

    #[test]
    fn test_rows_of_differing_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ];
        assert!(write_rows(&path, &rows).is_ok());
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        write_rows(&path, &[vec!["x".to_string()]]).unwrap();
        assert!(path.exists());
    }
}
