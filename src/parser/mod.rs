//! CSV to JSON loader with encoding and delimiter auto-detection.
//!
//! Converts spreadsheet rows into JSON objects keyed by the header labels.
//! No celestial-body logic here; column renaming and row transformation
//! happen downstream in [`crate::transform`].
//!
//! The source material is a Russian-language sheet, so the encoding
//! detector has to cope with `windows-1251` and `koi8-r` exports as well
//! as UTF-8.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records as JSON objects
    pub records: Vec<Value>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers, in source order
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 wins outright; chardet only arbitrates between the legacy
/// single-byte encodings, where it is actually needed.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "windows-1251" | "cp1251" => "windows-1251".to_string(),
        "koi8-r" | "koi8r" => "koi8-r".to_string(),
        "maccyrillic" | "x-mac-cyrillic" => "x-mac-cyrillic".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string()),
        "windows-1251" | "cp1251" => encoding_rs::WINDOWS_1251.decode(bytes).0.to_string(),
        "koi8-r" | "koi8r" => encoding_rs::KOI8_R.decode(bytes).0.to_string(),
        "maccyrillic" | "x-mac-cyrillic" => encoding_rs::X_MAC_CYRILLIC.decode(bytes).0.to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        // Fallback: UTF-8 with lossy conversion
        _ => String::from_utf8_lossy(bytes).to_string(),
    };
    Ok(decoded)
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON objects with explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers. Cells are
/// kept as strings; numeric interpretation happens in the transform.
///
/// # Example
/// ```ignore
/// use orrery::csv_to_json;
///
/// let csv = "name;age\nAlice;30\nBob;25";
/// let rows = csv_to_json(csv, ';').unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0]["name"], "Alice");
/// ```
pub fn csv_to_json(csv: &str, delimiter: char) -> CsvResult<Vec<Value>> {
    Ok(parse_string_with_metadata(csv, delimiter, "utf-8".to_string())?.records)
}

/// Parse CSV string with explicit delimiter and return metadata.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_matches('"').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;

        // Skip fully blank lines
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            // A short row means trailing cells are missing, not an error
            let raw_value = row.get(i).map(|s| s.trim().trim_matches('"')).unwrap_or("");
            obj.insert(header.clone(), json!(raw_value));
        }

        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse CSV file with auto-detection of encoding and delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("solar_system.csv")?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Records: {}", result.records.len());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name;age\nAlice;30\nBob;25";
        let rows = csv_to_json(csv, ';').unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["age"], "30");
        assert_eq!(rows[1]["name"], "Bob");
        assert_eq!(rows[1]["age"], "25");
    }

    #[test]
    fn test_russian_headers() {
        let csv = "Небесное тело;Тип\nЗемля;Планета";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.headers, vec!["Небесное тело", "Тип"]);
        assert_eq!(result.records[0]["Небесное тело"], "Земля");
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name;value\n\"Юпитер\";\"9.9 часов\"";
        let rows = csv_to_json(csv, ';').unwrap();

        assert_eq!(rows[0]["name"], "Юпитер");
        assert_eq!(rows[0]["value"], "9.9 часов");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a;b\n1;2\n;\n3;4\n";
        let rows = csv_to_json(csv, ';').unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_trailing_cells() {
        let csv = "a;b;c\n1;;3\n4";
        let rows = csv_to_json(csv, ';').unwrap();

        assert_eq!(rows[0]["b"], "");
        assert_eq!(rows[1]["a"], "4");
        assert_eq!(rows[1]["c"], "");
    }

    #[test]
    fn test_empty_csv_error() {
        let result = csv_to_json("", ';');
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "name;age\nAlice;30\nBob;25";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.headers, vec!["name", "age"]);
    }

    #[test]
    fn test_windows_1251_decoding() {
        // "Земля" in windows-1251
        let bytes: &[u8] = &[0xC7, 0xE5, 0xEC, 0xEB, 0xFF];
        let decoded = decode_content(bytes, "windows-1251").unwrap();
        assert_eq!(decoded, "Земля");
    }

    #[test]
    fn test_koi8_r_decoding_differs_from_1251() {
        let bytes: &[u8] = &[0xC7, 0xE5, 0xEC, 0xEB, 0xFF];
        let koi = decode_content(bytes, "koi8-r").unwrap();
        assert_ne!(koi, "Земля");
    }

    #[test]
    fn test_parse_file_auto() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Небесное тело;Диаметр (км)\nМарс;6779").unwrap();

        let result = parse_csv_file_auto(file.path()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0]["Диаметр (км)"], "6779");
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = parse_csv_file_auto("/no/such/file.csv");
        assert!(matches!(result, Err(CsvError::IoError(_))));
    }
}
