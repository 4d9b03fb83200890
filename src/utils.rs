use crate::constants::DATE_FORMAT;
use crate::error::WorkflowError;
use anyhow::Result;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;

/// Compute Blake3 hash of file contents
pub fn compute_file_hash(file_path: &std::path::Path) -> Result<String> {
    let mut file = File::open(file_path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// Get file extension from path (without the dot)
pub fn get_extension(path: &std::path::Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Lowercase, hyphen-separated form of a title, safe for ids
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Parse an ISO calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, WorkflowError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| WorkflowError::InvalidDate(s.to_string()))
}

/// Format a date as YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_compute_file_hash() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "frame data").unwrap();
        file.flush().unwrap();

        let hash = compute_file_hash(file.path()).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, compute_file_hash(file.path()).unwrap());
    }

    #[test]
    fn test_get_extension_lowercase() {
        let path = std::path::Path::new("/footage/Clip.MOV");
        assert_eq!(get_extension(path), Some("mov".to_string()));
    }

    #[test]
    fn test_get_extension_no_extension() {
        let path = std::path::Path::new("/footage/raw");
        assert_eq!(get_extension(path), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Kitchen Remodel - Demo Day!"), "kitchen-remodel-demo-day");
        assert_eq!(slugify("  Q&A  "), "q-a");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-03-09 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert_eq!(
            parse_date("03/09/2024"),
            Err(WorkflowError::InvalidDate("03/09/2024".to_string()))
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "2024-03-09");
    }
}
