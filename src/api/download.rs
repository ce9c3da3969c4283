use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Filename used when the server sends no usable `Content-Disposition`.
pub const DEFAULT_EXPORT_NAME: &str = "invoices.xlsx";

/// Query parameters accepted by the export endpoint.
#[derive(Debug, Clone, Default)]
pub struct ExportFilters {
    pub receiving_company: Option<String>,
    pub issuing_company: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub product_name: Option<String>,
}

impl ExportFilters {
    /// Only the parameters that are set, blank strings dropped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |key: &'static str, value: &Option<String>| {
            if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                pairs.push((key, v.to_string()));
            }
        };
        push_text("receivingCompany", &self.receiving_company);
        push_text("issuingCompany", &self.issuing_company);
        push_text("productName", &self.product_name);
        if let Some(d) = self.start_date {
            pairs.push(("startDate", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.end_date {
            pairs.push(("endDate", d.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

/// Pull the filename out of a `Content-Disposition` header value.
///
/// `filename*=UTF-8''...` wins over plain `filename=`. Directory components
/// are stripped so the result is always a bare file name.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let value = value.trim().trim_matches('"');
                let encoded = value.splitn(3, '\'').nth(2).unwrap_or(value);
                extended = percent_decode_str(encoded)
                    .decode_utf8()
                    .ok()
                    .map(|name| name.into_owned());
            }
            "filename" => plain = Some(value.trim().trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended.or(plain).and_then(|name| sanitize(&name))
}

fn sanitize(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}

/// Stream `reader` into `dir/file_name`.
///
/// Bytes land in a `.part` file that is renamed into place only after the
/// whole body arrived; on any error the partial file is removed.
pub fn save_stream<R: Read>(reader: &mut R, dir: &Path, file_name: &str) -> Result<(PathBuf, u64)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let partial = dir.join(format!(".{file_name}.part"));

    let written = match write_all_from(reader, &partial) {
        Ok(written) => written,
        Err(e) => {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }
    };

    if let Err(e) = fs::rename(&partial, &path) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok((path, written))
}

fn write_all_from<R: Read>(reader: &mut R, path: &Path) -> std::io::Result<u64> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    let written = std::io::copy(reader, &mut writer)?;
    writer.flush()?;
    Ok(written)
}
