// Execution of parsed commands against the service
use crate::cli::Command;
use anyhow::Context;
use care_records::Record;
use carelog_service::CareLogService;
use database_layer::JsonFileStore;
use error_common::{CarelogError, Result};
use serde_json::Value;
use std::io::Write;

/// What a command found, for the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Nothing matched: unknown id or failed login
    NotFound,
}

/// Run one command, writing human-readable output to `out`.
pub fn run(
    command: &Command,
    service: &CareLogService,
    store: &JsonFileStore,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        Command::Init => {
            let path = store.path().display();
            if store.ensure_file()? {
                say(out, format!("Created data file at {path}"))?;
            } else {
                say(out, format!("Data file already exists at {path}"))?;
            }
        }

        Command::RegisterPatient {
            name,
            email,
            phone,
            password,
        } => {
            let patient = service.register_patient(name, email, phone, password)?;
            say(out, format!("Registered patient {}", patient.id()))?;
        }

        Command::Login { email, password } => match service.login(email, password)? {
            Some(patient) => {
                say(
                    out,
                    format!("Welcome, {} ({})", patient.decrypted_name()?, patient.id()),
                )?;
            }
            None => {
                say(out, "Invalid email or password")?;
                return Ok(Outcome::NotFound);
            }
        },

        Command::AddLog {
            patient_id,
            pain_level,
            mood,
            appetite,
            notes,
        } => {
            let log = service.add_wellbeing_log(patient_id, *pain_level, mood, appetite, notes)?;
            say(out, format!("Logged wellbeing entry {}", log.id()))?;
        }

        Command::History { patient_id } => {
            let history = service.get_patient_history(patient_id)?;
            if history.is_empty() {
                say(out, format!("No wellbeing logs for patient {patient_id}"))?;
            }
            for log in history {
                let entry = log.decrypt()?;
                say(
                    out,
                    format!(
                        "{}  pain={} mood={} appetite={} notes={}",
                        log.timestamp().format("%Y-%m-%d %H:%M"),
                        entry.pain_level,
                        entry.mood,
                        entry.appetite,
                        entry.notes
                    ),
                )?;
            }
        }

        Command::UpdatePatient {
            patient_id,
            phone,
            email,
        } => {
            if service
                .update_patient(patient_id, phone.as_deref(), email.as_deref())?
                .is_none()
            {
                say(out, format!("No patient with id {patient_id}"))?;
                return Ok(Outcome::NotFound);
            }
            say(out, format!("Updated patient {patient_id}"))?;
        }

        Command::RemovePatient { patient_id } => {
            if !service.remove_patient(patient_id)? {
                say(out, format!("No patient with id {patient_id}"))?;
                return Ok(Outcome::NotFound);
            }
            say(out, format!("Removed patient {patient_id}"))?;
        }

        Command::AddStaff {
            name,
            department,
            specialization,
            email,
        } => {
            let staff =
                service.register_care_staff(name, department, specialization, email.as_deref())?;
            say(out, format!("Registered care staff {}", staff.id()))?;
        }

        Command::SearchStaff { query } => {
            let matches = service.search_care_staff(query)?;
            if matches.is_empty() {
                say(out, format!("No care staff matching '{query}'"))?;
            }
            for staff in matches {
                let text = |key: &str| staff.get(key).and_then(Value::as_str).unwrap_or("-").to_string();
                let department = match text("department") {
                    department if department == "-" || department.is_empty() => text("field"),
                    department => department,
                };
                say(
                    out,
                    format!(
                        "{}  {} | {} | {}",
                        text("carestaffID"),
                        text("name"),
                        department,
                        text("specialization")
                    ),
                )?;
            }
        }

        Command::AddNote {
            patient_id,
            author,
            content,
        } => {
            let note = service.add_note(patient_id, author, content)?;
            say(out, format!("Added note {}", note.id))?;
        }

        Command::Notes { patient_id } => {
            let notes = service.notes_for_patient(patient_id)?;
            if notes.is_empty() {
                say(out, format!("No notes for patient {patient_id}"))?;
            }
            for note in notes {
                say(
                    out,
                    format!(
                        "{}  {}: {}",
                        note.timestamp.format("%Y-%m-%d %H:%M"),
                        note.author,
                        note.content
                    ),
                )?;
            }
        }
    }

    Ok(Outcome::Done)
}

fn say(out: &mut dyn Write, line: impl AsRef<str>) -> Result<()> {
    writeln!(out, "{}", line.as_ref())
        .context("failed to write command output")
        .map_err(CarelogError::Internal)
}
