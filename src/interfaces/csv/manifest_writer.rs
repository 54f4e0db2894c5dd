use crate::domain::production::ManifestEntry;
use crate::error::Result;
use std::io::Write;

/// Writes a production manifest as `item,quantity` CSV rows.
pub struct ManifestWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_entries<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ManifestEntry>,
    {
        for entry in entries {
            self.writer.serialize(entry)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let mut out = Vec::new();
        {
            let mut writer = ManifestWriter::new(&mut out);
            writer
                .write_entries(vec![
                    ManifestEntry {
                        item: "California Roll".to_string(),
                        quantity: 4,
                    },
                    ManifestEntry {
                        item: "Salmon Plain Roll, cut".to_string(),
                        quantity: 1,
                    },
                ])
                .unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "item,quantity\nCalifornia Roll,4\n\"Salmon Plain Roll, cut\",1\n"
        );
    }
}
