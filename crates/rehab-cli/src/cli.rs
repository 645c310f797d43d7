use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rehab")]
#[command(about = "Geriatric rehabilitation assessment client")]
pub struct Cli {
    /// Backend URL, overriding REHAB_BACKEND_URL and the config file
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List observed patients with a level histogram
    Patients,
    /// Re-score every patient on the backend
    PredictAll,
    /// Print a patient's card report
    Card { code: i64 },
    /// Print a patient's rehabilitation program
    Program { code: i64 },
    /// Predict a physical activity level from the eight calculator inputs
    Calc(CalcArgs),
    /// Predict a stored patient's activity level on the backend
    Predict {
        code: i64,
        /// Save the predicted level
        #[arg(long)]
        save: bool,
    },
    /// Edit and inspect a patient record kept in a JSON file
    Record {
        path: PathBuf,
        /// Activity classifier: intake_card or quick_assessment
        #[arg(long, default_value = "intake_card")]
        profile: String,
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Submit a record file as a new patient card
    Submit { path: PathBuf },
    /// Classify exercise progress in a record file and save the overall level
    SaveLfk { code: i64, path: PathBuf },
    /// Import new patients from a spreadsheet
    Import(ImportArgs),
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
    SetBackend { url: String },
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum RecordAction {
    /// Recompute derived fields and print a summary
    Show,
    /// Set one field and recompute what depends on it
    Set { field: String, value: String },
    /// Append an empty chronic disease entry
    AddDisease,
    /// Set the name and stage of a chronic disease entry
    Disease {
        index: usize,
        name: String,
        #[arg(default_value = "")]
        stage: String,
    },
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Prefill from a stored patient
    #[arg(long)]
    pub patient: Option<i64>,
    #[arg(long)]
    pub age_score: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub bmi: Option<String>,
    #[arg(long)]
    pub barthel: Option<String>,
    #[arg(long)]
    pub sppb: Option<String>,
    #[arg(long)]
    pub get_up_and_go: Option<String>,
    #[arg(long)]
    pub walk: Option<String>,
    /// Save the predicted level for --patient
    #[arg(long, requires = "patient")]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,
    /// Fill missing columns with synthetic values
    #[arg(long)]
    pub fill_synthetic: bool,
    /// JSON file mapping patient code to {column: value}
    #[arg(long)]
    pub values: Option<PathBuf>,
    /// Upload the rows after filling
    #[arg(long)]
    pub commit: bool,
}
