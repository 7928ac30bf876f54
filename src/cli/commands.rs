// CLI command implementations
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use id3lens::{ParseResult, TagParser};

use crate::cli::config::{ExtractArgs, ShowArgs};
use crate::cli::output::{self, OutputFormatter};

/// Expand glob patterns; arguments without wildcards are kept as given
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !pattern.contains(|c: char| matches!(c, '*' | '?' | '[')) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        let matched = readable_matches(pattern, entries);
        if matched.is_empty() {
            log::warn!("No files match {pattern}");
        }
        files.extend(matched);
    }

    Ok(files)
}

/// Files among the glob results; entries that cannot be read are logged and skipped
fn readable_matches<E: std::fmt::Display>(
    pattern: &str,
    entries: impl IntoIterator<Item = std::result::Result<PathBuf, E>>,
) -> Vec<PathBuf> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable match of {pattern}: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect()
}

/// Read the whole file and parse its tag
pub fn read_tag(parser: &TagParser<'_>, path: &Path) -> Result<ParseResult> {
    let buffer = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    log::info!("Read {} byte(s) from {}", buffer.len(), path.display());

    parser
        .parse(&buffer)
        .with_context(|| format!("Failed to parse ID3 tag of {}", path.display()))
}

/// Run `action` on every input, reporting failures and carrying on
fn for_each_file(
    patterns: &[String],
    formatter: &OutputFormatter,
    mut action: impl FnMut(&Path) -> Result<()>,
) -> Result<()> {
    let files = expand_inputs(patterns)?;
    if files.is_empty() {
        bail!("No files specified");
    }

    let mut failed = 0;
    for path in &files {
        if let Err(e) = action(path) {
            formatter.print_error(&format!("{}: {e:#}", path.display()));
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} file(s) could not be processed", files.len());
    }
    Ok(())
}

/// Print the tag of each file
pub fn command_show(args: &ShowArgs, formatter: &OutputFormatter) -> Result<()> {
    let parser = TagParser::default();

    for_each_file(&args.files, formatter, |path| {
        let tag = read_tag(&parser, path)?;
        let report = output::render(args.format, &path.display().to_string(), &tag)?;
        print!("{report}");
        Ok(())
    })
}

/// Write `<file>.tag.txt` and one image per picture
pub fn command_extract(args: &ExtractArgs, formatter: &OutputFormatter) -> Result<()> {
    let parser = TagParser::default();

    for_each_file(&args.files, formatter, |path| {
        let tag = read_tag(&parser, path)?;
        let extracted = extract(path, &tag, args.output_dir.as_deref())?;
        for image in &extracted.images {
            formatter.print_info(&format!("Picture stored in file {}", image.display()));
        }
        formatter.print_success(&format!(
            "Parsed ID3 tag textual frames written into file {}",
            extracted.report.display()
        ));
        Ok(())
    })
}

/// Directory and base name the outputs for `input` are written under
fn output_base(input: &Path, output_dir: Option<&Path>) -> Result<(PathBuf, String)> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?
        .to_string_lossy()
        .into_owned();

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok((dir, name))
}

/// Files written for one input
#[derive(Debug)]
pub struct Extracted {
    pub report: PathBuf,
    pub images: Vec<PathBuf>,
}

/// Write the report and pictures for one parsed file
pub fn extract(input: &Path, tag: &ParseResult, output_dir: Option<&Path>) -> Result<Extracted> {
    let (dir, name) = output_base(input, output_dir)?;
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut images = Vec::new();
    for picture in tag.pictures() {
        let image_path = dir.join(format!("{name}.{}.{}", picture.type_label, picture.extension()));
        fs::write(&image_path, &picture.data)
            .with_context(|| format!("Failed to write {}", image_path.display()))?;
        log::info!("Wrote {} byte(s) to {}", picture.len(), image_path.display());
        images.push(image_path);
    }

    let stored: Vec<&Path> = images.iter().map(PathBuf::as_path).collect();
    let report = output::render_text(&input.display().to_string(), tag, &stored)?;

    let report_path = dir.join(format!("{name}.tag.txt"));
    fs::write(&report_path, report)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    Ok(Extracted {
        report: report_path,
        images,
    })
}
