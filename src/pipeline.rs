use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};

use crate::{
    cli::ConvertCmd,
    config::{Config, ReportFormat},
    cue::{self, Conversion},
    formats,
};

pub fn run_convert(cmd: ConvertCmd, cfg: &Config) -> Result<()> {
    let span = tracing::info_span!("convert", input = cmd.input.as_str());
    let _g = span.enter();

    let mut opts = cfg.convert_options();
    if let Some(mode) = cmd.mode {
        opts.mode = mode;
    }
    tracing::info!(mode = ?opts.mode, wrap_width = opts.wrap_width, "cue mode selected");

    let raw = read_input_to_string(&cmd.input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let doc = formats::json::parse_document(&raw)
        .with_context(|| format!("failed parsing input: {}", cmd.input))?;

    let conversion = cue::convert(&doc, &opts)?;

    log_conversion_summary(&conversion, doc.events.dialogue.len(), cfg);

    let rendered = conversion.to_vtt();

    // Check every destination before writing any of them.
    let out_path = if cmd.stdout {
        None
    } else {
        let p = derive_output_path(&cmd)?;
        ensure_writable(&p, cmd.overwrite)?;
        Some(p)
    };
    if let Some(report_path) = &cmd.report {
        ensure_writable(&report_path.to_string_lossy(), cmd.overwrite)?;
    }

    match &out_path {
        Some(path) => {
            write_output(path, &rendered, cmd.overwrite)?;
            tracing::info!(path = path.as_str(), "wrote output file");
        }
        None => {
            print!("{rendered}");
            tracing::info!(mode = "stdout", "wrote output");
        }
    }

    if let Some(report_path) = &cmd.report {
        write_report(report_path, &conversion, cfg.report.format, cmd.overwrite)?;
        tracing::info!(path = %report_path.display(), "wrote report file");
    }

    Ok(())
}

fn read_input_to_string(input: &str) -> Result<String> {
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed reading input file: {input}"))
    }
}

fn log_conversion_summary(c: &Conversion, events: usize, cfg: &Config) {
    tracing::info!(
        events,
        cues = c.cues.len(),
        omitted = c.report.omitted(),
        degraded = c.report.degraded(),
        "conversion summary"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(c.cues.len());
        for (i, cue) in c.cues.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                start = cue.start.as_str(),
                end = cue.end.as_str(),
                settings = cue.settings.as_str(),
                chars = cue.body.chars().count(),
                "cue sample"
            );
        }
    }
}

fn write_report(path: &Path, c: &Conversion, format: ReportFormat, overwrite: bool) -> Result<()> {
    let data = match format.resolve(path) {
        ReportFormat::Tsv => formats::tsv::write_report_tsv(&c.report)?,
        _ => formats::json::write_report_json(&c.report)?,
    };
    write_output(&path.to_string_lossy(), &data, overwrite)
}

fn derive_output_path(cmd: &ConvertCmd) -> Result<String> {
    if let Some(o) = &cmd.output {
        return Ok(o.clone());
    }

    if cmd.input == "-" {
        return Err(anyhow!(
            "output path required when input is stdin and --stdout is not set"
        ));
    }

    let p = Path::new(&cmd.input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename"))?;

    let parent = p.parent().unwrap_or_else(|| Path::new("."));
    let out = parent.join(format!("{stem}.vtt"));
    Ok(out.to_string_lossy().to_string())
}

fn ensure_writable(path: &str, overwrite: bool) -> Result<()> {
    if Path::new(path).exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {path}"
        ));
    }
    Ok(())
}

fn write_output(path: &str, data: &str, overwrite: bool) -> Result<()> {
    ensure_writable(path, overwrite)?;
    fs::write(path, data).with_context(|| format!("failed writing {path}"))?;
    Ok(())
}
