// Command-line surface of the `carelog` binary
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// CareLog operator tool
#[derive(Parser, Debug)]
#[command(name = "carelog", version)]
#[command(about = "Encrypted patient wellbeing records from the command line")]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true, env = "CARELOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data file, overriding the configured one
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the data file if it does not exist
    Init,

    /// Register a new patient
    RegisterPatient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "CARELOG_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check a patient's email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CARELOG_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Record a wellbeing check-in
    AddLog {
        #[arg(long)]
        patient_id: String,
        /// Pain level from 1 to 10
        #[arg(long, allow_negative_numbers = true)]
        pain_level: i64,
        #[arg(long)]
        mood: String,
        #[arg(long)]
        appetite: String,
        #[arg(long)]
        notes: String,
    },

    /// Show a patient's wellbeing history
    History {
        #[arg(long)]
        patient_id: String,
    },

    /// Change a patient's phone and/or email
    #[command(group(ArgGroup::new("changes").required(true).multiple(true).args(["phone", "email"])))]
    UpdatePatient {
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove a patient with their logs and notes
    RemovePatient {
        #[arg(long)]
        patient_id: String,
    },

    /// Add a care staff member
    AddStaff {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        specialization: String,
        #[arg(long)]
        email: Option<String>,
    },

    /// Search care staff by name, department or specialization
    SearchStaff {
        query: String,
    },

    /// Attach a note to a patient
    AddNote {
        #[arg(long)]
        patient_id: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: String,
    },

    /// List a patient's notes
    Notes {
        #[arg(long)]
        patient_id: String,
    },
}
