use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;

use crate::{cue::Report, model::ParsedDocument};

/// Reads the parser's JSON output. A bare `{ "styles", "events" }` object and
/// one wrapped under a top-level `"ass"` key are both accepted.
pub fn parse_document(input: &str) -> Result<ParsedDocument> {
    let v: Value = serde_json::from_str(input).context("input is not valid JSON")?;

    let root = match v.get("ass") {
        Some(inner) if inner.get("events").is_some() => inner.clone(),
        _ => v,
    };

    if !root.is_object() || root.get("events").is_none() {
        return Err(anyhow!("unrecognized parsed-ASS JSON shape: missing 'events'"));
    }

    let doc: ParsedDocument =
        serde_json::from_value(root).context("failed decoding parsed-ASS document")?;
    Ok(doc)
}

#[derive(Debug, Serialize)]
struct WrappedReport<'a> {
    schema: &'static str,
    version: u32,
    omitted: usize,
    degraded: usize,
    lines: &'a [crate::cue::ImpactedLine],
}

pub fn write_report_json(report: &Report) -> Result<String> {
    let w = WrappedReport {
        schema: "assvtt.impacted-lines",
        version: 1,
        omitted: report.omitted(),
        degraded: report.degraded(),
        lines: &report.lines,
    };
    Ok(serde_json::to_string_pretty(&w)?)
}
