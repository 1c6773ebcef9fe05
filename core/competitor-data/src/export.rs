//! FILENAME: core/competitor-data/src/export.rs
//! PURPOSE: CSV export of the (filtered) competitor grid.
//! CONTEXT: The header line is written bare; every data cell is quoted so
//! location names such as "Houston, TX" survive the round trip.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ExportError;
use crate::model::CompetitorData;

pub const CSV_HEADERS: [&str; 10] = [
    "Competitor",
    "Location",
    "Location Group",
    "Product",
    "Product Group",
    "Brand",
    "Strategy Tag",
    "Spot Delta Capture (%)",
    "Consistency (%)",
    "Consistency Category",
];

/// `competitor_analysis_2025-06-30.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("competitor_analysis_{}.csv", date.format("%Y-%m-%d"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_line(row: &CompetitorData) -> String {
    let capture = format!("{:.1}", row.capture_rate);
    let consistency = format!("{:.1}", row.predictability);
    let cells: [&str; 10] = [
        &row.competitor,
        &row.location,
        &row.location_group,
        &row.product,
        &row.product_group,
        &row.brand,
        row.strategy_tag.as_str(),
        &capture,
        &consistency,
        row.consistency_category().as_str(),
    ];
    cells.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(",")
}

/// Writes the header and one line per row. Returns the number of data rows.
pub fn export_csv<'a, I, W>(rows: I, mut writer: W) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a CompetitorData>,
    W: Write,
{
    writeln!(writer, "{}", CSV_HEADERS.join(","))?;
    let mut count = 0;
    for row in rows {
        writeln!(writer, "{}", csv_line(row))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Exports to a file, creating or truncating it.
///
/// Refuses to write a header-only file when nothing matches.
pub fn save_csv(rows: &[&CompetitorData], path: &Path) -> Result<usize, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let file = File::create(path)?;
    export_csv(rows.iter().copied(), BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StrategyTag;

    fn row(competitor: &str, capture_rate: f64, predictability: f64) -> CompetitorData {
        CompetitorData {
            id: "comp-1".to_string(),
            competitor: competitor.to_string(),
            location: "Houston, TX".to_string(),
            location_group: "Gulf Coast".to_string(),
            product: "#2 ULSD".to_string(),
            product_group: "Diesel".to_string(),
            brand: "Branded".to_string(),
            strategy_tag: StrategyTag::Leader,
            spot_delta: 0.012,
            capture_rate,
            predictability,
        }
    }

    fn export_to_string(rows: &[CompetitorData]) -> String {
        let mut buffer = Vec::new();
        export_csv(rows, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_is_unquoted() {
        let csv = export_to_string(&[]);
        assert_eq!(
            csv,
            "Competitor,Location,Location Group,Product,Product Group,Brand,Strategy Tag,\
             Spot Delta Capture (%),Consistency (%),Consistency Category\n"
        );
    }

    #[test]
    fn test_cells_quoted_with_one_decimal() {
        let csv = export_to_string(&[row("ExxonMobil", 95.26, 88.0)]);
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "\"ExxonMobil\",\"Houston, TX\",\"Gulf Coast\",\"#2 ULSD\",\"Diesel\",\"Branded\",\
             \"Leader\",\"95.3\",\"88.0\",\"High\""
        );
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        let csv = export_to_string(&[row("Joe's \"Fuel\"", 10.0, 10.0)]);
        assert!(csv.contains("\"Joe's \"\"Fuel\"\"\""));
        assert!(csv.ends_with("\"Very Low\"\n"));
    }

    #[test]
    fn test_row_count_returned() {
        let rows = vec![row("BP", 1.0, 2.0), row("Shell", 3.0, 4.0)];
        let mut sink = Vec::new();
        assert_eq!(export_csv(&rows, &mut sink).unwrap(), 2);
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "competitor_analysis_2025-03-07.csv");
    }

    #[test]
    fn test_save_csv_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let data = vec![row("Valero", 90.0, 82.0)];
        let refs: Vec<&CompetitorData> = data.iter().collect();

        assert_eq!(save_csv(&refs, &path).unwrap(), 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn test_save_csv_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert!(matches!(save_csv(&[], &path), Err(ExportError::Empty)));
        assert!(!path.exists());
    }
}
