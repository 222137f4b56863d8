use anyhow::{Result, anyhow};
use csv::WriterBuilder;

use crate::{cue::Report, formats::time::format_vtt_timestamp};

pub const COLUMNS: [&str; 5] = ["start", "end", "status", "features", "raw"];

pub fn write_report_tsv(report: &Report) -> Result<String> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(vec![]);

    wtr.write_record(COLUMNS)?;

    for line in &report.lines {
        wtr.write_record([
            format_vtt_timestamp(line.start),
            format_vtt_timestamp(line.end),
            line.status().to_string(),
            line.feature_names(),
            line.raw.clone(),
        ])?;
    }

    let data = wtr.into_inner().map_err(|e| anyhow!(e.to_string()))?;
    Ok(String::from_utf8(data)?)
}
