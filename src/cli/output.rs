// Report rendering for CLI

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::Result;
use id3lens::{ParseResult, PictureRecord};
use serde::Serialize;

use crate::cli::config::OutputFormat;

/// Width the text frame labels are padded to
const LABEL_WIDTH: usize = 19;

/// Format and output data
pub struct OutputFormatter {
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    generated: String,
    #[serde(flatten)]
    tag: &'a ParseResult,
}

/// Render a report in the requested format
pub fn render(format: OutputFormat, name: &str, tag: &ParseResult) -> Result<String> {
    match format {
        OutputFormat::Text => render_text(name, tag, &[]),
        OutputFormat::Json => render_json(name, tag),
    }
}

pub fn render_json(name: &str, tag: &ParseResult) -> Result<String> {
    let report = JsonReport {
        file: name,
        generated: chrono::Local::now().to_rfc3339(),
        tag,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// Render the text report
///
/// `stored` holds the file each picture was written to, in the order of
/// [`ParseResult::pictures`]; pictures without one are summarised instead.
pub fn render_text(name: &str, tag: &ParseResult, stored: &[&Path]) -> Result<String> {
    let mut out = String::new();
    let header = tag.header();

    writeln!(out, "Textual information parsed from file {name}:")?;
    writeln!(
        out,
        "\tVersion: ID3v2.{}.{}, size {} byte(s), flags {:#04x}",
        header.major_version,
        header.revision,
        header.size,
        header.flags.bits()
    )?;

    for record in tag.text_frames().iter().filter(|record| record.text.is_some()) {
        let label = format!("{}:", record.label);
        let values = record.values().collect::<Vec<_>>().join("; ");
        writeln!(out, "\t{label:<LABEL_WIDTH$} {values}")?;
    }

    for (index, picture) in tag.pictures().enumerate() {
        write_picture(&mut out, picture, stored.get(index).copied())?;
    }

    if let Some(lyrics) = tag.lyrics() {
        writeln!(out, "Lyrics:\n\tLanguage: {}", lyrics.language)?;
        if !lyrics.description.is_empty() {
            writeln!(out, "\tdescription: {}", lyrics.description)?;
        }
        writeln!(out, "{}", lyrics.text)?;
    }

    for notice in tag.notices() {
        writeln!(out, "Notice: {notice}")?;
    }

    Ok(out)
}

fn write_picture(out: &mut String, picture: &PictureRecord, stored: Option<&Path>) -> fmt::Result {
    writeln!(out, "Picture:\n\t{}", picture.mime)?;
    writeln!(out, "\ttype: {}", picture.type_label)?;
    if !picture.description.is_empty() {
        writeln!(out, "\tdescription: {}", picture.description)?;
    }
    match stored {
        Some(path) => writeln!(out, "\tpicture is stored in file {}", path.display()),
        None => writeln!(out, "\t{} byte(s) of image data", picture.len()),
    }
}
