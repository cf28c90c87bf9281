//! The interactive session: a line-oriented stand-in for the form page.
//!
//! The session owns the form state across submissions. Only one submission
//! can be in flight because the loop blocks on it; there is no queueing and
//! no cancellation, and a hung request leaves the session in the searching
//! state.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::client::ApiClient;
use crate::form::{FormState, FIELD_NAMES};
use crate::render;
use crate::submit;

const HELP: &str = "Commands:
    set <field> <value>   fill one form field (fields: url, age, gender, bmi,
                          hba1c, pregnant, clinical)
    show                  print the current form fields
    submit                send the form to the matching API
    clear                 reset every field and the results area
    help                  show this text
    quit                  leave the session";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Set { field: String, value: String },
    Show,
    Submit,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one input line. The value of `set` is the verbatim remainder of
/// the line, so free-text fields keep their spaces.
pub(crate) fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let mut parts = trimmed.splitn(3, char::is_whitespace);
    let word = parts.next().unwrap_or_default();
    match word {
        "set" => {
            let field = parts.next().unwrap_or_default().to_string();
            let value = parts.next().unwrap_or_default().trim().to_string();
            Command::Set { field, value }
        }
        "show" => Command::Show,
        "submit" => Command::Submit,
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Runs the session until `quit` or end of input.
pub(crate) async fn run(mut form: FormState, client: &ApiClient) -> Result<()> {
    let mut out = io::stdout();
    print_report(&mut out, &render::idle_report())?;
    writeln!(out, "Type 'help' for the command list.")?;

    let stdin = io::stdin();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Command::Set { field, value } => {
                if let Err(error) = form.set(&field, &value) {
                    writeln!(out, "{error}")?;
                }
            }
            Command::Show => print_form(&mut out, &form)?,
            Command::Submit => {
                // Validation failures block before anything is sent.
                let prepared = match submit::prepare(&form) {
                    Ok(prepared) => prepared,
                    Err(error) => {
                        writeln!(out, "{error}")?;
                        continue;
                    }
                };
                // The searching placeholder goes out before the request.
                writeln!(out, "{}", render::loading_text())?;
                out.flush()?;
                let result = submit::dispatch(client, &prepared).await;
                print_report(&mut out, &result.report)?;
            }
            Command::Clear => {
                form.clear();
                print_report(&mut out, &render::idle_report())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown(word) => {
                writeln!(out, "unknown command '{word}'; type 'help' for the command list")?;
            }
        }
    }
    Ok(())
}

fn print_report(out: &mut impl Write, report: &render::Report) -> io::Result<()> {
    write!(out, "{}", report.to_text())
}

fn print_form(out: &mut impl Write, form: &FormState) -> io::Result<()> {
    for field in FIELD_NAMES {
        let value = match *field {
            "url" => form.api_url.clone(),
            "age" => form.age.clone(),
            "gender" => form.gender.clone(),
            "bmi" => form.bmi.clone(),
            "hba1c" => form.hba1c.clone(),
            "pregnant" => form.pregnant.to_string(),
            "clinical" => form.clinical.clone(),
            _ => unreachable!(),
        };
        writeln!(out, "{field:>10}: {value}")?;
    }
    Ok(())
}
