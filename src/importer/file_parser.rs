// ==========================================
// EventFab Element Import - File Parser Implementations
// ==========================================
// Supports: Excel (.xlsx/.xls) / CSV (.csv)
// Stage 0 of the pipeline: worksheet file -> raw rows.
// Blank rows are kept (not skipped) so downstream error and warning
// row numbers match what the uploader sees in their spreadsheet.
// ==========================================

use crate::domain::element::RawRow;
use crate::importer::element_importer_trait::FileParser;
use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> Result<Vec<RawRow>, Box<dyn std::error::Error>> {
        let path = file_path;

        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(Box::new(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                )));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged row lengths
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(Box::new(ImportError::MissingHeaderRow));
        }

        let mut rows = Vec::new();
        for (record_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut cells = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    cells.insert(header.clone(), value.trim().to_string());
                }
            }

            // Header line is worksheet row 1; data rows start at 2.
            rows.push(RawRow::new(record_idx + 2, cells));
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_rows(&self, file_path: &Path) -> Result<Vec<RawRow>, Box<dyn std::error::Error>> {
        let path = file_path;

        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(Box::new(ImportError::UnsupportedFormat(ext.to_string())));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // Read the first sheet.
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(Box::new(ImportError::ExcelParseError(
                "workbook has no worksheets".to_string(),
            )));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or(ImportError::MissingHeaderRow)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, data_row) in sheet_rows.enumerate() {
            let mut cells = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    cells.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // Header row is worksheet row 1; data rows start at 2.
            rows.push(RawRow::new(row_idx + 2, cells));
        }

        Ok(rows)
    }
}

// ==========================================
// Universal parser (dispatch on extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn new() -> Self {
        UniversalFileParser
    }
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for UniversalFileParser {
    fn parse_to_rows(&self, file_path: &Path) -> Result<Vec<RawRow>, Box<dyn std::error::Error>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_rows(file_path),
            _ => Err(Box::new(ImportError::UnsupportedFormat(ext))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = temp_csv(
            "element_id,element_name,quantity\n\
             E001,Main Stage,8\n\
             E002,Backdrop 1,12\n",
        );

        let rows = CsvParser.parse_to_rows(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].cells.get("element_id"), Some(&"E001".to_string()));
        assert_eq!(rows[1].row_number, 3);
        assert_eq!(
            rows[1].cells.get("element_name"),
            Some(&"Backdrop 1".to_string())
        );
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_rows(Path::new("does_not_exist.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_parser_keeps_blank_rows_for_numbering() {
        let file = temp_csv(
            "element_id,element_name\n\
             E001,Main Stage\n\
             ,\n\
             E002,Backdrop 1\n",
        );

        let rows = CsvParser.parse_to_rows(file.path()).unwrap();

        // Blank row stays so E002 keeps worksheet row 4.
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_blank());
        assert_eq!(rows[2].row_number, 4);
        assert_eq!(rows[2].cells.get("element_id"), Some(&"E002".to_string()));
    }

    #[test]
    fn test_csv_parser_ragged_rows() {
        let file = temp_csv(
            "element_id,element_name,notes\n\
             E001,Main Stage\n",
        );

        let rows = CsvParser.parse_to_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        // Short row: the missing trailing column simply has no cell.
        assert_eq!(rows[0].cells.get("notes"), None);
    }

    #[test]
    fn test_csv_parser_trims_headers_and_cells() {
        let file = temp_csv(
            " element_id , element_name \n\
             E001 , Main Stage \n",
        );

        let rows = CsvParser.parse_to_rows(file.path()).unwrap();
        assert_eq!(rows[0].cells.get("element_id"), Some(&"E001".to_string()));
        assert_eq!(
            rows[0].cells.get("element_name"),
            Some(&"Main Stage".to_string())
        );
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_to_rows(Path::new("elements.pdf"));
        assert!(result.is_err());
    }
}
