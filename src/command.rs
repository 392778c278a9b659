// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Interactive command parsing.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    SetPatientId(String),
    SetPatientName(String),
    SetDiagnosis(String),
    SetTreatment(String),
    SetProvider(String),
    Fetch,
    Add,
    Authorize,
    Balance,
    Show { json: bool },
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  connect                 connect to the wallet
  patient-id <id>         set the patient ID
  name <text>             set the patient name (blank = connected account)
  diagnosis <text>        set the diagnosis
  treatment <text>        set the treatment
  provider <address>      set the provider address
  fetch                   fetch records for the patient ID
  add                     add a record with the form values
  authorize               authorize the provider address
  balance                 refresh the account balance
  show [--json]           render the dashboard
  help                    show this help
  quit                    exit";

/// Parse a line; unknown verbs return an error message for the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "connect" => Command::Connect,
        "patient-id" | "id" => Command::SetPatientId(rest.to_string()),
        "name" => Command::SetPatientName(rest.to_string()),
        "diagnosis" => Command::SetDiagnosis(rest.to_string()),
        "treatment" => Command::SetTreatment(rest.to_string()),
        "provider" => Command::SetProvider(rest.to_string()),
        "fetch" => Command::Fetch,
        "add" => Command::Add,
        "authorize" => Command::Authorize,
        "balance" => Command::Balance,
        "show" => match rest {
            "" => Command::Show { json: false },
            "--json" => Command::Show { json: true },
            other => return Err(format!("Unknown option `{other}` for show")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command `{other}`; type `help`")),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_case_insensitively() {
        assert_eq!(parse_command("CONNECT").unwrap(), Command::Connect);
        assert_eq!(parse_command("  fetch ").unwrap(), Command::Fetch);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert_eq!(parse_command("").unwrap(), Command::Empty);
    }

    #[test]
    fn setters_keep_the_rest_of_the_line() {
        assert_eq!(
            parse_command("diagnosis  Type 2 diabetes ").unwrap(),
            Command::SetDiagnosis("Type 2 diabetes".into())
        );
        assert_eq!(
            parse_command("patient-id 42").unwrap(),
            Command::SetPatientId("42".into())
        );
        assert_eq!(parse_command("name").unwrap(), Command::SetPatientName(String::new()));
    }

    #[test]
    fn show_accepts_json_flag_only() {
        assert_eq!(parse_command("show").unwrap(), Command::Show { json: false });
        assert_eq!(
            parse_command("show --json").unwrap(),
            Command::Show { json: true }
        );
        assert!(parse_command("show --xml").is_err());
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        let err = parse_command("delete 1").unwrap_err();
        assert!(err.contains("delete"));
    }
}
