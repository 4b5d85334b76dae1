//! Plain-text rendering of sampling results.
//!
//! The downloadable report layout is fixed: attendance staff read it next to a
//! register, and `parse_report` reads the number lists back out of it.

use crate::models::{ExportFormat, Result, SamplerError, SamplingResult};
use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

const RULE_HEAVY: &str = "====================";
const RULE_LIGHT: &str = "--------------------";
const INSTRUCTIONS: &str = "Get the attendance register and select the students corresponding to the numbers in the MAIN SAMPLE list.";

/// Numbers per row in the on-screen grid.
const GRID_COLUMNS: usize = 5;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(MAIN SAMPLE|RESERVE LIST) \((\d+) STUDENTS\)$").expect("static regex")
});

/// Render the downloadable report.
pub fn render_report(result: &SamplingResult) -> String {
    let mut out = String::new();
    out.push_str("SAMPLING RESULTS\n");
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");

    out.push_str("PARAMETERS\n");
    out.push_str(RULE_LIGHT);
    out.push('\n');
    let _ = writeln!(out, "Grade: {}", result.grade());
    let _ = writeln!(out, "Total (N): {}", result.total());
    let _ = writeln!(out, "Sample (n): {}", result.sample_size());
    let _ = writeln!(out, "Reserve: {}", result.reserve_size());
    let _ = writeln!(out, "Interval (k): {}", result.interval());
    let _ = writeln!(out, "Start: {}", result.start());
    out.push('\n');

    let _ = writeln!(out, "MAIN SAMPLE ({} STUDENTS)", result.main_sample().len());
    out.push_str(RULE_LIGHT);
    out.push('\n');
    let _ = writeln!(out, "{}", join_numbers(result.main_sample()));
    out.push('\n');

    let _ = writeln!(out, "RESERVE LIST ({} STUDENTS)", result.reserve_list().len());
    out.push_str(RULE_LIGHT);
    out.push('\n');
    let _ = writeln!(out, "{}", join_numbers(result.reserve_list()));
    out.push('\n');

    out.push_str("INSTRUCTIONS:\n");
    out.push_str(INSTRUCTIONS);
    out.push('\n');
    out
}

/// Suggested export filename: `sampling_results_grade_<grade>.<ext>`.
///
/// Each whitespace run in the grade becomes one underscore. Path separators
/// are replaced too so the name never escapes the output directory.
pub fn report_filename(grade: &str, format: ExportFormat) -> String {
    let grade = WHITESPACE_RUN.replace_all(grade, "_").replace(['/', '\\'], "_");
    format!("sampling_results_grade_{grade}.{}", format.extension())
}

/// Number lists recovered from a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    pub grade: String,
    pub main_sample: Vec<usize>,
    pub reserve_list: Vec<usize>,
}

/// Read the grade and both number lists back out of a report.
///
/// Section counts in the headers must match the listed numbers.
pub fn parse_report(text: &str) -> Result<ParsedReport> {
    let lines: Vec<&str> = text.lines().collect();

    let grade_at = lines
        .iter()
        .position(|line| line.starts_with("Grade: "))
        .ok_or_else(|| SamplerError::ReportParse("missing Grade line".to_string()))?;
    let grade = lines[grade_at]["Grade: ".len()..].to_string();

    let mut main_sample = None;
    let mut reserve_list = None;
    for (at, line) in lines.iter().enumerate().skip(grade_at + 1) {
        let Some(caps) = SECTION_HEADER.captures(line) else {
            continue;
        };
        let expected: usize = caps[2]
            .parse()
            .map_err(|_| SamplerError::ReportParse(format!("bad count in {line:?}")))?;
        let numbers = section_numbers(&lines, at)?;
        if numbers.len() != expected {
            return Err(SamplerError::ReportParse(format!(
                "{} lists {} numbers but header says {expected}",
                &caps[1],
                numbers.len()
            )));
        }
        match &caps[1] {
            "MAIN SAMPLE" => main_sample = Some(numbers),
            _ => reserve_list = Some(numbers),
        }
    }

    Ok(ParsedReport {
        grade,
        main_sample: main_sample
            .ok_or_else(|| SamplerError::ReportParse("missing MAIN SAMPLE section".to_string()))?,
        reserve_list: reserve_list
            .ok_or_else(|| SamplerError::ReportParse("missing RESERVE LIST section".to_string()))?,
    })
}

/// Numbers listed two lines below the section header at `header_at`.
fn section_numbers(lines: &[&str], header_at: usize) -> Result<Vec<usize>> {
    if lines.get(header_at + 1) != Some(&RULE_LIGHT) {
        return Err(SamplerError::ReportParse(format!(
            "expected rule under {:?}",
            lines[header_at]
        )));
    }
    let row = lines
        .get(header_at + 2)
        .ok_or_else(|| SamplerError::ReportParse("truncated section".to_string()))?;
    if row.trim().is_empty() {
        return Ok(Vec::new());
    }
    row.split(", ")
        .map(|n| {
            n.trim()
                .parse()
                .map_err(|_| SamplerError::ReportParse(format!("not a student number: {n:?}")))
        })
        .collect()
}

/// Render the results screen shown after a run.
pub fn render_summary(result: &SamplingResult) -> String {
    let mut out = String::new();
    out.push_str("Sampling Results\n\n");

    out.push_str("PARAMETERS\n");
    let pairs = [
        (format!("Grade: {}", result.grade()), format!("Total (N): {}", result.total())),
        (
            format!("Sample (n): {}", result.sample_size()),
            format!("Reserve: {}", result.reserve_size()),
        ),
        (
            format!("Interval (k): {}", result.interval()),
            format!("Start: {}", result.start()),
        ),
    ];
    for (left, right) in pairs {
        let _ = writeln!(out, "  {left:<24}{right}");
    }
    out.push('\n');

    let _ = writeln!(out, "MAIN SAMPLE ({} STUDENTS)", result.main_sample().len());
    out.push_str(&number_grid(result.main_sample()));
    out.push('\n');

    let _ = writeln!(out, "RESERVE LIST ({} STUDENTS)", result.reserve_list().len());
    out.push_str(&number_grid(result.reserve_list()));
    out
}

fn number_grid(numbers: &[usize]) -> String {
    if numbers.is_empty() {
        return "  (none)\n".to_string();
    }
    let mut out = String::new();
    for row in numbers.chunks(GRID_COLUMNS) {
        for number in row {
            let _ = write!(out, "{number:>6}");
        }
        out.push('\n');
    }
    out
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
