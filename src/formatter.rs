use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::cells::{is_empty_or_null, parse_ssn};
use crate::error::{FormatError, Result};
use crate::progress::{ProgressCounter, ProgressSink};
use crate::scan::{SheetPlan, scan_workbook};
use crate::worker;

pub const DATE_FORMAT: &str = "MM-dd-yyyy";
pub const SSN_FORMAT: &str = "0000000000";
pub const OUTPUT_PREFIX: &str = "Formatted_";

/// Number formats applied by a run and the output file name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRules {
    pub date_format: String,
    pub ssn_format: String,
    pub output_prefix: String,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            date_format: DATE_FORMAT.to_string(),
            ssn_format: SSN_FORMAT.to_string(),
            output_prefix: OUTPUT_PREFIX.to_string(),
        }
    }
}

/// `<input dir>/<prefix><input file name>`.
pub fn output_path_for(input: &Path, rules: &FormatRules) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| FormatError::NotFound(input.to_path_buf()))?;
    let mut name = OsString::from(&rules.output_prefix);
    name.push(file_name);
    Ok(input.with_file_name(name))
}

/// Fails for a missing path or an extension the rewrite side cannot save.
pub fn check_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(FormatError::NotFound(input.to_path_buf()));
    }
    let supported = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"));
    if !supported {
        return Err(FormatError::Unsupported(input.to_path_buf()));
    }
    Ok(())
}

/// Reformats date and SSN columns of every worksheet and saves the result next to
/// `input`. Returns the output path.
pub fn reformat(input: &Path, rules: &FormatRules, sink: &mut dyn ProgressSink) -> Result<PathBuf> {
    check_input(input)?;
    let output = output_path_for(input, rules)?;

    let plans = scan_workbook(input)?;
    let mut book = umya_spreadsheet::reader::xlsx::read(input)
        .map_err(|e| FormatError::unreadable(input, e))?;

    let mut progress = ProgressCounter::new(plans.iter().map(|p| p.data_rows.len()).sum());
    info!(
        input = %input.display(),
        sheets = plans.len(),
        rows = progress.total(),
        "reformatting workbook"
    );

    for plan in plans.iter().filter(|p| p.is_used()) {
        let sheet = book.get_sheet_by_name_mut(&plan.name).ok_or_else(|| {
            FormatError::Unexpected(format!("worksheet {} not found for rewrite", plan.name))
        })?;
        apply_sheet(sheet, plan, rules, &mut progress, sink);
    }

    save_replacing(&book, &output)?;
    progress.finish(sink);
    info!(output = %output.display(), "saved formatted workbook");
    Ok(output)
}

fn apply_sheet(
    sheet: &mut Worksheet,
    plan: &SheetPlan,
    rules: &FormatRules,
    progress: &mut ProgressCounter,
    sink: &mut dyn ProgressSink,
) {
    debug!(sheet = %plan.name, rows = plan.data_rows.len(), "applying formats");
    for &row in &plan.data_rows {
        for &col in &plan.roles.date_columns {
            let cell = sheet.get_cell_mut((col, row));
            if is_empty_or_null(&cell.get_value()) {
                cell.set_value("");
            }
            cell.get_style_mut()
                .get_number_format_mut()
                .set_format_code(rules.date_format.as_str());
        }

        if let Some(col) = plan.roles.ssn_column {
            let is_number = sheet
                .get_cell((col, row))
                .is_some_and(|cell| parse_ssn(&cell.get_value()).is_some());
            if is_number {
                sheet
                    .get_cell_mut((col, row))
                    .get_style_mut()
                    .get_number_format_mut()
                    .set_format_code(rules.ssn_format.as_str());
            }
        }

        progress.advance(sink);
    }
    autosize_columns(sheet);
}

fn autosize_columns(sheet: &mut Worksheet) {
    let highest = sheet.get_highest_column();
    for col in 1..=highest {
        sheet
            .get_column_dimension_by_number_mut(&col)
            .set_auto_width(true);
    }
    sheet.calculation_auto_width();
}

/// Saves to a temporary file beside `output`, then renames it over `output`.
/// The temporary file is removed if either step fails.
fn save_replacing(book: &Spreadsheet, output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".tktoolbox-")
        .suffix(".xlsx")
        .tempfile_in(dir)
        .map_err(|e| FormatError::unwritable(output, e))?
        .into_temp_path();

    umya_spreadsheet::writer::xlsx::write(book, &staged)
        .map_err(|e| FormatError::unwritable(output, e))?;
    staged
        .persist(output)
        .map_err(|e| FormatError::unwritable(output, e.error))?;
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct FormatArgs {
    /// Workbook to reformat (.xlsx or .xlsm)
    pub file: Option<PathBuf>,

    /// Number format applied to date columns
    #[arg(long, default_value = DATE_FORMAT)]
    pub date_format: String,

    /// Number format applied to numeric SSN cells
    #[arg(long, default_value = SSN_FORMAT)]
    pub ssn_format: String,

    /// Prefix of the output file name
    #[arg(long, default_value = OUTPUT_PREFIX)]
    pub prefix: String,
}

impl FormatArgs {
    pub fn rules(&self) -> FormatRules {
        FormatRules {
            date_format: self.date_format.clone(),
            ssn_format: self.ssn_format.clone(),
            output_prefix: self.prefix.clone(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sheetfmt", version)]
#[command(about = "Apply MM-dd-yyyy to date columns and a fixed-width format to SSN columns")]
struct SheetFmtCli {
    #[command(flatten)]
    format: FormatArgs,
}

/// Runs one reformat on a worker thread, drawing progress on stderr, and prints the
/// saved path. Failures are returned unprinted; the binaries report them.
pub fn execute(args: &FormatArgs) -> Result<PathBuf> {
    let outcome = args
        .file
        .clone()
        .ok_or(FormatError::NoFileSelected)
        .and_then(|file| {
            check_input(&file)?;
            worker::spawn(file, args.rules())
        })
        .and_then(|job| {
            let outcome = job.wait_with(draw_progress);
            eprintln!();
            outcome
        });

    if let Ok(output) = &outcome {
        println!("Done! Saved to:\n{}", output.display());
    }
    outcome
}

fn draw_progress(percent: u8) {
    let filled = usize::from(percent) / 5;
    let mut stderr = std::io::stderr().lock();
    let _ = write!(
        stderr,
        "\r[{}{}] {percent:>3}%",
        "#".repeat(filled),
        " ".repeat(20 - filled)
    );
    let _ = stderr.flush();
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> anyhow::Result<()> {
    let cli = SheetFmtCli::parse_from(args);
    execute(&cli.format)?;
    Ok(())
}
