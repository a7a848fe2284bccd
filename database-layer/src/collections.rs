//! Names of the collections held in the data file

pub const PATIENTS: &str = "patients";
pub const CARESTAFFS: &str = "carestaffs";
pub const NOTES: &str = "notes";
pub const SCHEDULES: &str = "schedules";
pub const WELLBEING_LOGS: &str = "wellbeing_logs";

/// Collections present in every freshly created data file
pub const REQUIRED: [&str; 5] = [PATIENTS, CARESTAFFS, NOTES, SCHEDULES, WELLBEING_LOGS];
