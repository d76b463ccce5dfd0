// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::errors::RecordError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// A finite, forward-only source of delimited rows.
pub trait RecordSource {
    /// Read the first row. `Ok(None)` means the stream is empty.
    fn read_title(&mut self) -> Result<Option<Vec<String>>, RecordError>;

    /// Next data row, or `None` once the stream is exhausted.
    fn next_fields(&mut self) -> Option<Result<Vec<String>, RecordError>>;
}

/// Destination for merged rows.
pub trait RecordSink {
    fn write_fields(&mut self, fields: &[String]) -> Result<(), RecordError>;
    fn flush(&mut self) -> Result<(), RecordError>;
}

pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: Read> CsvSource<R> {
    pub fn new(rdr: R, delimiter: u8) -> Self {
        // Row widths are checked by the merge, not by the reader.
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(rdr);
        Self {
            reader,
            record: csv::StringRecord::new(),
        }
    }

    fn read_next(&mut self) -> Option<Result<Vec<String>, RecordError>> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.record.iter().map(str::to_string).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

impl CsvSource<File> {
    pub fn open(path: &Path, delimiter: u8) -> std::io::Result<Self> {
        Ok(Self::new(File::open(path)?, delimiter))
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn read_title(&mut self) -> Result<Option<Vec<String>>, RecordError> {
        self.read_next().transpose()
    }

    fn next_fields(&mut self) -> Option<Result<Vec<String>, RecordError>> {
        self.read_next()
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(wtr: W, delimiter: u8) -> Self {
        // The title row may be wider or narrower than the data rows.
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .delimiter(delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(wtr);
        Self { writer }
    }
}

impl CsvSink<File> {
    /// Create the output file, truncating any previous contents.
    pub fn create(path: &Path, delimiter: u8) -> std::io::Result<Self> {
        Ok(Self::new(File::create(path)?, delimiter))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_fields(&mut self, fields: &[String]) -> Result<(), RecordError> {
        self.writer.write_record(fields)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_title_and_rows() {
        let mut src = CsvSource::new("time,cpu\n100,1.5\n200,2.5\n".as_bytes(), b',');
        assert_eq!(src.read_title().unwrap().unwrap(), vec!["time", "cpu"]);
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["100", "1.5"]);
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["200", "2.5"]);
        assert!(src.next_fields().is_none());
        assert!(src.next_fields().is_none());
    }

    #[test]
    fn test_source_empty_stream() {
        let mut src = CsvSource::new("".as_bytes(), b',');
        assert!(src.read_title().unwrap().is_none());
        assert!(src.next_fields().is_none());
    }

    #[test]
    fn test_source_quoted_fields_and_blank_lines() {
        let input = "t,msg\n\n100,\"a, b\"\n\n200,\"say \"\"hi\"\"\"\n";
        let mut src = CsvSource::new(input.as_bytes(), b',');
        src.read_title().unwrap();
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["100", "a, b"]);
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["200", "say \"hi\""]);
        assert!(src.next_fields().is_none());
    }

    #[test]
    fn test_source_ragged_rows_pass_through() {
        let mut src = CsvSource::new("t,v\n1,a,extra\n2\n".as_bytes(), b',');
        src.read_title().unwrap();
        assert_eq!(src.next_fields().unwrap().unwrap().len(), 3);
        assert_eq!(src.next_fields().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_source_invalid_utf8_is_record_error() {
        let mut src = CsvSource::new(&b"t,v\n1,\xff\xfe\n2,ok\n"[..], b',');
        src.read_title().unwrap();
        let err = src.next_fields().unwrap().unwrap_err();
        assert!(!err.is_io());
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["2", "ok"]);
    }

    #[test]
    fn test_source_custom_delimiter() {
        let mut src = CsvSource::new("t;v\n1;a,b\n".as_bytes(), b';');
        src.read_title().unwrap();
        assert_eq!(src.next_fields().unwrap().unwrap(), vec!["1", "a,b"]);
    }

    #[test]
    fn test_sink_quotes_only_when_needed() {
        let mut out = Vec::new();
        {
            let mut sink = CsvSink::new(&mut out, b',');
            sink.write_fields(&["t".to_string(), "a,b".to_string()]).unwrap();
            sink.write_fields(&["100".to_string()]).unwrap();
            sink.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "t,\"a,b\"\n100\n");
    }

    #[test]
    fn test_sink_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer\n").unwrap();

        let mut sink = CsvSink::create(&path, b',').unwrap();
        sink.write_fields(&["1".to_string(), "x".to_string()]).unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,x\n");
    }

    #[test]
    fn test_open_missing_file() {
        assert!(CsvSource::open(Path::new("/nonexistent/trace.csv"), b',').is_err());
    }
}
