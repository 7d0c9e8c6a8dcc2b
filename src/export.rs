//! CSV export of a (filtered) record view.
//!
//! Every field, header included, is enclosed in double quotes with embedded
//! quotes doubled, and each row ends with `\n`.

use crate::catalog::VideoRecord;
use crate::error::Result;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Title,
    Year,
    Decade,
    Resolution,
    AspectRatio,
    Quality,
    Path,
    Size,
    Duration,
    Language,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Title,
        Column::Year,
        Column::Decade,
        Column::Resolution,
        Column::AspectRatio,
        Column::Quality,
        Column::Path,
        Column::Size,
        Column::Duration,
        Column::Language,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Year => "Year",
            Column::Decade => "Decade",
            Column::Resolution => "Resolution",
            Column::AspectRatio => "Aspect Ratio",
            Column::Quality => "Quality",
            Column::Path => "Path",
            Column::Size => "Size (GB)",
            Column::Duration => "Duration",
            Column::Language => "Language",
        }
    }

    pub fn value<'a>(&self, record: &'a VideoRecord) -> Cow<'a, str> {
        match self {
            Column::Title => Cow::Borrowed(&record.title),
            Column::Year => Cow::Borrowed(&record.year),
            Column::Decade => Cow::Borrowed(&record.decade),
            Column::Resolution => Cow::Borrowed(&record.resolution),
            Column::AspectRatio => Cow::Borrowed(&record.aspect_ratio),
            Column::Quality => Cow::Borrowed(&record.quality),
            Column::Path => record.path.to_string_lossy(),
            Column::Size => Cow::Borrowed(&record.file_size_gb),
            Column::Duration => Cow::Borrowed(&record.duration),
            Column::Language => Cow::Borrowed(&record.audio_language),
        }
    }
}

pub fn write_csv<W: Write>(writer: W, columns: &[Column], records: &[&VideoRecord]) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(columns.iter().map(Column::header))?;
    for record in records {
        csv.write_record(columns.iter().map(|c| c.value(record).into_owned()))?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, columns: &[Column], records: &[&VideoRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), columns, records)?;
    info!("Exported {} records to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::record;

    #[test]
    fn test_quotes_everything_and_doubles_quotes() {
        let mut tricky = record("x", "1990s", "1.85", "1080p");
        tricky.title = "Say \"Hello\", World".to_string();
        let records = vec![&tricky];

        let mut out = Vec::new();
        write_csv(&mut out, &[Column::Title, Column::Decade], &records).expect("write");
        let text = String::from_utf8(out).expect("utf8");

        assert_eq!(
            text,
            "\"Title\",\"Decade\"\n\"Say \"\"Hello\"\", World\",\"1990s\"\n"
        );
    }

    #[test]
    fn test_header_only_for_empty_view() {
        let mut out = Vec::new();
        write_csv(&mut out, &[Column::Size, Column::AspectRatio], &[]).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "\"Size (GB)\",\"Aspect Ratio\"\n");
    }

    #[test]
    fn test_all_columns_in_table_order() {
        let headers: Vec<&str> = Column::ALL.iter().map(Column::header).collect();
        assert_eq!(
            headers,
            vec![
                "Title",
                "Year",
                "Decade",
                "Resolution",
                "Aspect Ratio",
                "Quality",
                "Path",
                "Size (GB)",
                "Duration",
                "Language"
            ]
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let target = dir.path().join("view.csv");
        let a = record("a", "1990s", "1.85", "1080p");
        export_csv(&target, &Column::ALL, &[&a]).expect("export");

        let text = std::fs::read_to_string(&target).expect("read back");
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"/library/a.mkv\""));
    }
}
