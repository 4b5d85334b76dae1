//! Line-oriented form session.
//!
//! Two screens, as in a small form app: the parameter form while nothing is
//! displayed, and the results screen with download / new sample / quit.

use crate::models::{FormDefaults, ParamCandidate, Result, SamplerError};
use crate::report::{render_summary, Exporter};
use crate::sampling::RandomSource;
use crate::session::Session;
use std::io::{BufRead, Write};
use tracing::warn;

/// Answer that empties a field instead of keeping its current value.
const CLEAR_FIELD: &str = "-";

/// Raw field text as last entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FormState {
    grade: String,
    total: String,
    sample_size: String,
    reserve_size: String,
}

impl From<&FormDefaults> for FormState {
    fn from(defaults: &FormDefaults) -> Self {
        Self {
            grade: defaults.grade.clone(),
            total: defaults.total.to_string(),
            sample_size: defaults.sample_size.to_string(),
            reserve_size: defaults.reserve_size.to_string(),
        }
    }
}

impl FormState {
    fn candidate(&self) -> ParamCandidate {
        ParamCandidate::from_form(&self.grade, &self.total, &self.sample_size, &self.reserve_size)
    }
}

/// Drive the form/results loop until the user quits or input ends.
pub fn run_interactive<I, O, R>(
    input: &mut I,
    output: &mut O,
    session: &mut Session<R>,
    defaults: &FormDefaults,
    exporter: &Exporter,
) -> Result<()>
where
    I: BufRead,
    O: Write,
    R: RandomSource,
{
    let mut form = FormState::from(defaults);

    loop {
        if let Some(result) = session.current() {
            write_out(output, &format!("\n{}\n", render_summary(result)))?;
            let menu = "[d]ownload results, [n]ew sample, [q]uit: ";
            let Some(choice) = prompt(input, output, menu)? else {
                return Ok(());
            };
            match choice.trim().to_ascii_lowercase().as_str() {
                "d" | "download" => match exporter.export(result) {
                    Ok(path) => write_out(output, &format!("Saved to {}\n", path.display()))?,
                    Err(e) => {
                        warn!(error = %e, "Export failed");
                        write_out(output, &format!("Export failed: {e}\n"))?;
                    }
                },
                "n" | "new" => {
                    session.reset();
                    form = FormState::from(defaults);
                }
                "q" | "quit" => return Ok(()),
                _ => write_out(output, "Please answer d, n or q.\n")?,
            }
            continue;
        }

        write_out(output, "\nSystematic Sampling\nEnter the parameters to generate a sample.\n")?;
        write_out(output, "(Enter keeps the value in brackets, - clears it.)\n")?;
        let fields: [(&str, &mut String); 4] = [
            ("Grade", &mut form.grade),
            ("Total Students (N)", &mut form.total),
            ("Sample Size (n)", &mut form.sample_size),
            ("Reserve List Size", &mut form.reserve_size),
        ];
        for (label, value) in fields {
            let Some(answer) = prompt(input, output, &format!("{label} [{value}]: "))? else {
                return Ok(());
            };
            if answer == CLEAR_FIELD {
                value.clear();
            } else if !answer.is_empty() {
                *value = answer;
            }
        }

        match session.generate(&form.candidate()) {
            Ok(_) => {}
            Err(e) if e.is_user_correctable() => write_out(output, &format!("Error: {e}\n"))?,
            Err(e) => return Err(e),
        }
    }
}

/// Print a prompt and read one line without its line ending; `None` at end of input.
///
/// Surrounding spaces are kept: grades are free text and numbers are trimmed
/// when parsed.
fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    text: &str,
) -> Result<Option<String>> {
    write_out(output, text)?;
    output
        .flush()
        .map_err(|e| SamplerError::io("flushing prompt", e))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| SamplerError::io("reading input", e))?;
    if read == 0 {
        return Ok(None);
    }
    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(Some(line.to_string()))
}

fn write_out<O: Write>(output: &mut O, text: &str) -> Result<()> {
    output
        .write_all(text.as_bytes())
        .map_err(|e| SamplerError::io("writing output", e))
}
