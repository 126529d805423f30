//! CSV writer for cleaned tables.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Result, TidyError};
use crate::model::Table;

/// Serializes tables back to delimited files.
pub struct Writer {
    delimiter: u8,
}

impl Writer {
    /// Create a comma-delimited writer.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Create a writer using the given field delimiter.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write the table to `path`, keeping the input's column order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tidypost::{Loader, Writer};
    /// # fn example() -> tidypost::Result<()> {
    /// let (table, _) = Loader::new().load("posts.csv")?;
    /// Writer::new().write(&table, "posts_copy.csv")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    TidyError::sink(
                        path,
                        format!("failed to create directory '{}': {}", parent.display(), e),
                    )
                })?;
            }
        }

        let file = File::create(path).map_err(|e| TidyError::sink(path, e))?;
        self.write_to(table, BufWriter::new(file))
            .map_err(|e| TidyError::sink(path, e))?;

        info!(path = %path.display(), rows = table.row_count(), "saved cleaned dataset");
        Ok(())
    }

    /// Write the table to any writer.
    pub fn write_to<W: Write>(&self, table: &Table, writer: W) -> std::result::Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(table.headers())?;
        let date_format = table.date_format();
        for record in table.records() {
            csv_writer.write_record(table.render_record(record, date_format))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::Cleaner;
    use crate::error::ErrorKind;
    use crate::input::Loader;

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        Writer::new().write_to(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_preserves_column_order() {
        let data = "message,username,lang,date,likes,retweets,hashtags\n\
                    \" a  b \",ann,en,2023-01-01,,2,x\n";
        let table = Loader::new().load_bytes(data.as_bytes()).unwrap();
        let (table, _) = Cleaner::new().clean(table).unwrap();

        assert_eq!(
            render(&table),
            "message,username,lang,date,likes,retweets,hashtags\n\
             a b,ann,en,2023-01-01,0,2,x\n"
        );
    }

    #[test]
    fn test_write_datetimes_and_invalid() {
        let data = "username,date,likes,retweets,hashtags,message\n\
                    a,2023-01-01 10:30:00,1,1,,m\n\
                    b,garbage,1,1,,m\n";
        let table = Loader::new().load_bytes(data.as_bytes()).unwrap();
        let (table, _) = Cleaner::new().clean(table).unwrap();

        assert_eq!(
            render(&table),
            "username,date,likes,retweets,hashtags,message\n\
             a,2023-01-01 10:30:00,1,1,,m\n\
             b,,1,1,,m\n"
        );
    }

    #[test]
    fn test_write_with_delimiter() {
        let data = "username,date,likes,retweets,hashtags,message\n\
                    ann,,3,,\"x, y\",hi\n";
        let table = Loader::new().load_bytes(data.as_bytes()).unwrap();
        let (table, _) = Cleaner::new().clean(table).unwrap();

        let mut out = Vec::new();
        Writer::with_delimiter(b'\t').write_to(&table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "username\tdate\tlikes\tretweets\thashtags\tmessage\n\
             ann\t\t3\t0\tx, y\thi\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let table = Loader::new()
            .load_bytes(b"username,date,likes,retweets,hashtags,message\n")
            .unwrap();

        // A directory cannot be opened as a file
        let err = Writer::new().write(&table, dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataSink);
    }
}
