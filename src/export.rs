use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, Write};

/// One result row prepared for export: the JSON value written by the JSON
/// writer and the display line used as XML element text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub json: serde_json::Value,
    pub text: String,
}

impl ExportRow {
    pub fn from_record<T: Serialize + fmt::Display>(record: &T) -> Result<ExportRow, String> {
        let json = serde_json::to_value(record)
            .map_err(|e| format!("Failed to serialize row: {}", e))?;
        Ok(ExportRow {
            json,
            text: record.to_string(),
        })
    }
}

pub fn to_export_rows<T: Serialize + fmt::Display>(
    records: &[T],
) -> Result<Vec<ExportRow>, String> {
    records.iter().map(ExportRow::from_record).collect()
}

/// Ask whether the result set should be written out, looping until the user
/// answers `n`.
///
/// On `y` the filename's extension (substring after the last `.`) picks the
/// writer: `.json` or `.xml`. Any other extension is rejected and the
/// question starts over from y/n; the filename is not re-asked. A failed
/// write is reported and also returns to the y/n question. EOF on the input
/// stream behaves like `n`.
pub fn offer_to_store<R: BufRead, W: Write>(
    rows: &[ExportRow],
    input: &mut R,
    out: &mut W,
) -> Result<(), String> {
    loop {
        writeln!(out, "Would you like to store this result?").map_err(write_failed)?;
        write!(out, "Y/[N]? : ").map_err(write_failed)?;
        out.flush().map_err(write_failed)?;

        let mut choice = String::new();
        if input.read_line(&mut choice).map_err(read_failed)? == 0 {
            return Ok(());
        }

        match choice.trim().to_lowercase().as_str() {
            "y" => {
                write!(out, "Specify filename. Must end in .xml or .json: ")
                    .map_err(write_failed)?;
                out.flush().map_err(write_failed)?;

                let mut filename = String::new();
                if input.read_line(&mut filename).map_err(read_failed)? == 0 {
                    return Ok(());
                }
                let filename = filename.trim();

                let written = match filename.rsplit_once('.') {
                    Some((_, "json")) => store_data_as_json(rows, filename),
                    Some((_, "xml")) => store_data_as_xml(rows, filename),
                    _ => {
                        writeln!(out, "Invalid file extension. Please use .xml or .json")
                            .map_err(write_failed)?;
                        continue;
                    }
                };
                match written {
                    Ok(format) => {
                        writeln!(out, "Data stored as {} file in: {}", format, filename)
                            .map_err(write_failed)?;
                    }
                    Err(e) => writeln!(out, "{}", e).map_err(write_failed)?,
                }
            }
            "n" => return Ok(()),
            _ => writeln!(out, "Invalid choice").map_err(write_failed)?,
        }
    }
}

fn store_data_as_json(rows: &[ExportRow], filename: &str) -> Result<&'static str, String> {
    let values: Vec<&serde_json::Value> = rows.iter().map(|r| &r.json).collect();
    let file = File::create(filename)
        .map_err(|e| format!("Failed to create {}: {}", filename, e))?;
    // serde_json's Map keeps keys in a BTreeMap, so objects come out with
    // sorted keys; the formatter only has to widen the indent.
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(file, formatter);
    values
        .serialize(&mut ser)
        .map_err(|e| format!("Failed to write {}: {}", filename, e))?;
    Ok("JSON")
}

fn store_data_as_xml(rows: &[ExportRow], filename: &str) -> Result<&'static str, String> {
    let mut document = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    if rows.is_empty() {
        document.push_str("<Data />");
    } else {
        document.push_str("<Data>");
        for row in rows {
            document.push_str("<item>");
            push_escaped(&mut document, &row.text);
            document.push_str("</item>");
        }
        document.push_str("</Data>");
    }
    fs::write(filename, document)
        .map_err(|e| format!("Failed to write {}: {}", filename, e))?;
    Ok("XML")
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn write_failed(e: std::io::Error) -> String {
    format!("Failed to write output: {}", e)
}

fn read_failed(e: std::io::Error) -> String {
    format!("Failed to read input: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_element_text() {
        let mut out = String::new();
        push_escaped(&mut out, "marks <= 30 & rising");
        assert_eq!(out, "marks &lt;= 30 &amp; rising");
    }

    #[test]
    fn extension_is_taken_after_the_last_dot() {
        assert_eq!("report.v2.json".rsplit_once('.'), Some(("report.v2", "json")));
        assert_eq!("noextension".rsplit_once('.'), None);
    }
}
