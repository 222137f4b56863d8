//! Turns dialogue events into cues and decides what to keep.

use serde::{Deserialize, Serialize};

use crate::{
    alignment,
    error::ConvertError,
    formats::{
        time::format_vtt_timestamp,
        vtt::{PLACEHOLDER_BODY, normalize_body, write_vtt},
    },
    markup,
    model::{DialogueEvent, ParsedDocument},
    style_index::StyleIndex,
    unsupported::{self, Feature},
};

/// What goes in a cue's payload.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CueMode {
    /// Translated text, but a blank payload for lines with unsupported tags.
    #[default]
    Subtitles,
    /// Always the translated text.
    Captions,
    /// The source event as JSON.
    Metadata,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    pub mode: CueMode,
    /// 0 disables wrapping.
    pub wrap_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start: String,
    pub end: String,
    pub settings: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactedLine {
    pub start: f64,
    pub end: f64,
    pub raw: String,
    /// True when the line produced no cue; false when it was kept degraded.
    pub omitted: bool,
    pub features: Vec<Feature>,
}

impl ImpactedLine {
    pub fn status(&self) -> &'static str {
        if self.omitted { "omitted" } else { "degraded" }
    }

    pub fn feature_names(&self) -> String {
        self.features
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub lines: Vec<ImpactedLine>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn omitted(&self) -> usize {
        self.lines.iter().filter(|l| l.omitted).count()
    }

    pub fn degraded(&self) -> usize {
        self.lines.iter().filter(|l| !l.omitted).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub cues: Vec<Cue>,
    pub report: Report,
}

impl Conversion {
    pub fn to_vtt(&self) -> String {
        write_vtt(&self.cues)
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Cue(Cue),
    Degraded(Cue, ImpactedLine),
    Omitted(ImpactedLine),
}

/// Converts every dialogue event, in order. Fails only when the document has
/// no event format.
pub fn convert(doc: &ParsedDocument, opts: &ConvertOptions) -> Result<Conversion, ConvertError> {
    if doc.events.format.is_empty() {
        return Err(ConvertError::MissingEventFormat);
    }

    let span = tracing::debug_span!("assemble", events = doc.events.dialogue.len(), mode = ?opts.mode);
    let _g = span.enter();

    let styles = StyleIndex::build(&doc.styles.style);
    tracing::debug!(styles = styles.len(), "style index built");
    let mut out = Conversion {
        cues: Vec::with_capacity(doc.events.dialogue.len()),
        report: Report::default(),
    };

    for event in &doc.events.dialogue {
        match assemble_event(event, &styles, opts) {
            Outcome::Cue(cue) => out.cues.push(cue),
            Outcome::Degraded(cue, line) => {
                tracing::warn!(
                    start = %format_vtt_timestamp(line.start),
                    end = %format_vtt_timestamp(line.end),
                    features = %line.feature_names(),
                    raw = line.raw.as_str(),
                    "degraded line: unsupported ASS feature"
                );
                out.cues.push(cue);
                out.report.lines.push(line);
            }
            Outcome::Omitted(line) => {
                tracing::warn!(
                    start = %format_vtt_timestamp(line.start),
                    end = %format_vtt_timestamp(line.end),
                    features = %line.feature_names(),
                    raw = line.raw.as_str(),
                    "omitted line: nothing renderable in WebVTT"
                );
                out.report.lines.push(line);
            }
        }
    }

    Ok(out)
}

pub fn assemble_event(event: &DialogueEvent, styles: &StyleIndex<'_>, opts: &ConvertOptions) -> Outcome {
    let segments = &event.text.parsed;
    let settings = alignment::cue_settings(segments, styles.alignment(&event.style));
    let text = normalize_body(&markup::translate(segments), 0);
    let features = unsupported::detect(event.raw_text());

    if markup::strip_markers(&text).trim().is_empty() {
        return Outcome::Omitted(impacted(event, features, true));
    }

    let is_unsupported = !features.is_empty();
    let body = match opts.mode {
        CueMode::Subtitles if is_unsupported => PLACEHOLDER_BODY.to_string(),
        CueMode::Subtitles | CueMode::Captions => normalize_body(&text, opts.wrap_width),
        CueMode::Metadata => metadata_body(event, &features),
    };

    let cue = Cue {
        start: format_vtt_timestamp(event.start),
        end: format_vtt_timestamp(event.end),
        settings,
        body,
    };

    if is_unsupported {
        Outcome::Degraded(cue, impacted(event, features, false))
    } else {
        Outcome::Cue(cue)
    }
}

fn impacted(event: &DialogueEvent, features: Vec<Feature>, omitted: bool) -> ImpactedLine {
    ImpactedLine {
        start: event.start,
        end: event.end,
        raw: event.raw_text().to_string(),
        omitted,
        features,
    }
}

#[derive(Serialize)]
struct MetadataBody<'a> {
    event: &'a DialogueEvent,
    unsupported: bool,
    features: &'a [Feature],
}

/// Single-line JSON, so the payload never holds a blank line or `-->`.
fn metadata_body(event: &DialogueEvent, features: &[Feature]) -> String {
    let body = MetadataBody {
        event,
        unsupported: !features.is_empty(),
        features,
    };
    match serde_json::to_string(&body) {
        Ok(json) => json.replace("-->", "--\\u003e"),
        Err(err) => {
            tracing::warn!(error = %err, "failed serializing cue metadata; using blank body");
            PLACEHOLDER_BODY.to_string()
        }
    }
}
