use assvtt::{ConvertError, ConvertOptions, CueMode, ParsedDocument, convert, formats::json::parse_document};
use serde_json::{Value, json};

fn document(dialogue: Vec<Value>) -> ParsedDocument {
    let v = json!({
        "info": { "ScriptType": "v4.00+" },
        "styles": {
            "format": ["Name", "Fontname", "Fontsize", "Alignment"],
            "style": [{ "Name": "Default", "Fontname": "Arial", "Fontsize": "20", "Alignment": "2" }]
        },
        "events": {
            "format": ["Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text"],
            "comment": [],
            "dialogue": dialogue
        }
    });
    parse_document(&v.to_string()).unwrap()
}

fn line(start: f64, end: f64, raw: &str, parsed: Value) -> Value {
    json!({
        "Layer": 0, "Start": start, "End": end, "Style": "Default", "Name": "",
        "MarginL": 0, "MarginR": 0, "MarginV": 0, "Effect": null,
        "Text": { "raw": raw, "combined": raw, "parsed": parsed }
    })
}

fn captions() -> ConvertOptions {
    ConvertOptions {
        mode: CueMode::Captions,
        ..ConvertOptions::default()
    }
}

#[test]
fn style_alignment_applies_to_plain_line() {
    let doc = document(vec![line(0.0, 5.0, "Hello", json!([{ "tags": [], "text": "Hello" }]))]);
    let conv = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(
        conv.to_vtt(),
        "WEBVTT\n\n00:00:00.000 --> 00:00:05.000 line:90% position:50% align:center\nHello"
    );
}

#[test]
fn an_tag_overrides_style_alignment() {
    let doc = document(vec![line(
        0.0,
        5.0,
        r"{\an1}Hello",
        json!([{ "tags": [{ "an": 1 }], "text": "Hello" }]),
    )]);
    let conv = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(conv.cues[0].settings, "line:90% position:0% align:start");
    assert!(conv.report.is_empty());
}

#[test]
fn drawing_line_is_omitted() {
    let doc = document(vec![
        line(0.0, 1.0, "Before", json!([{ "tags": [], "text": "Before" }])),
        line(
            38.0,
            40.0,
            r"{\an5\bord1\shad0\p1\fscx300\fscy300\pos(316,312)}m 0 0 b 33 -3 48 -7 61 -19",
            json!([{
                "tags": [{ "an": 5 }, { "bord": 1 }, { "shad": 0 }, { "p": 1 }, { "fscx": 300 }, { "fscy": 300 }, { "pos": [316, 312] }],
                "text": "",
                "drawing": [["m", "0", "0"], ["b", "33", "-3", "48", "-7", "61", "-19"]]
            }]),
        ),
    ]);
    let conv = convert(&doc, &captions()).unwrap();
    assert_eq!(conv.cues.len(), 1);
    assert_eq!(conv.report.omitted(), 1);

    let omitted = &conv.report.lines[0];
    assert!(omitted.omitted);
    assert_eq!(omitted.start, 38.0);
    assert_eq!(omitted.end, 40.0);
    assert_eq!(omitted.feature_names(), "drawing,position,border");
}

#[test]
fn bold_run_renders_as_markup() {
    let doc = document(vec![line(
        0.0,
        2.0,
        r"{\b1}Bold{\b0} plain",
        json!([{ "tags": [{ "b": 1 }], "text": "Bold" }, { "tags": [{ "b": 0 }], "text": " plain" }]),
    )]);
    let conv = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(conv.cues[0].body, "<b>Bold</b> plain");
}

#[test]
fn font_style_line_with_line_break() {
    let doc = document(vec![line(
        40.0,
        42.0,
        r"Some other basic font style tests:\N Normal, {\b1}Boldface{\r}, {\i1}Italics{\r}, {\u1}Underline{\r}, {\s1}Strikethrough",
        json!([
            { "tags": [], "text": "Some other basic font style tests:\\N Normal, " },
            { "tags": [{ "b": 1 }], "text": "Boldface" },
            { "tags": [{ "r": "" }], "text": ", " },
            { "tags": [{ "i": 1 }], "text": "Italics" },
            { "tags": [{ "r": "" }], "text": ", " },
            { "tags": [{ "u": 1 }], "text": "Underline" },
            { "tags": [{ "r": "" }], "text": ", " },
            { "tags": [{ "s": 1 }], "text": "Strikethrough" }
        ]),
    )]);
    let conv = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(
        conv.cues[0].body,
        "Some other basic font style tests:\n Normal, <b>Boldface</b>, <i>Italics</i>, <u>Underline</u>, Strikethrough"
    );
}

#[test]
fn degraded_line_depends_on_mode() {
    let doc = document(vec![line(
        26.0,
        28.0,
        r"{\an5\pos(222,338)\frz29.559}So should this one, and be rotated",
        json!([{
            "tags": [{ "an": 5 }, { "pos": [222, 338] }, { "frz": 29.559 }],
            "text": "So should this one, and be rotated"
        }]),
    )]);

    let subs = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(subs.cues.len(), 1);
    assert_eq!(subs.cues[0].body, "&nbsp;");
    assert_eq!(subs.cues[0].settings, "line:50% position:50% align:center");
    assert_eq!(subs.report.degraded(), 1);

    let caps = convert(&doc, &captions()).unwrap();
    assert_eq!(caps.cues[0].body, "So should this one, and be rotated");
    assert_eq!(caps.report.lines[0].feature_names(), "position,rotation");

    let meta = convert(
        &doc,
        &ConvertOptions {
            mode: CueMode::Metadata,
            ..ConvertOptions::default()
        },
    )
    .unwrap();
    let body: Value = serde_json::from_str(&meta.cues[0].body).unwrap();
    assert_eq!(body["unsupported"], true);
    assert_eq!(body["event"]["Layer"], 0);
    assert_eq!(body["event"]["Start"], 26.0);
}

#[test]
fn document_without_event_format_fails() {
    let doc = parse_document(r#"{ "events": { "format": [], "dialogue": [] } }"#).unwrap();
    assert!(matches!(
        convert(&doc, &ConvertOptions::default()),
        Err(ConvertError::MissingEventFormat)
    ));
}

#[test]
fn empty_dialogue_list_is_header_only() {
    let doc = document(vec![]);
    let conv = convert(&doc, &ConvertOptions::default()).unwrap();
    assert_eq!(conv.to_vtt(), "WEBVTT\n\n");
}

#[test]
fn cues_are_separated_by_one_blank_line() {
    let doc = document(vec![
        line(0.0, 1.0, "a", json!([{ "tags": [], "text": "a" }])),
        line(1.0, 2.0, r"{\a6}b", json!([{ "tags": [{ "a": 6 }], "text": "b" }])),
    ]);
    let vtt = convert(&doc, &ConvertOptions::default()).unwrap().to_vtt();
    assert_eq!(
        vtt,
        "WEBVTT\n\n\
         00:00:00.000 --> 00:00:01.000 line:90% position:50% align:center\na\n\n\
         00:00:01.000 --> 00:00:02.000 line:10% position:50% align:center\nb"
    );
}
