//! outbox - pick local files for upload and hand them to a sync workflow.
//!
//! Usage:
//!   outbox [PATH]                  Browse and pick files to upload
//!   outbox --pick-dir              Pick a single folder instead
//!   outbox --camera-file <FILE>    Confirm a captured file for upload
//!   outbox --help                  Show help
//!
//! The dispatched outcome is printed to stdout as JSON so the invoking
//! upload workflow can consume it.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, ContextCompat, Result};

use outbox_core::{
    LaunchParams, Preferences, REQUEST_SELECT_FROM_FILESYSTEM, REQUEST_UPLOAD_FROM_CAMERA,
    SavedScreenState, SelectionController,
};

#[derive(Parser)]
#[command(
    name = "outbox",
    version,
    about = "Pick local files for upload",
    long_about = "outbox opens an interactive picker over the local filesystem and \
                  prints the chosen files, together with the requested post-upload \
                  behavior, as JSON on stdout."
)]
struct Cli {
    /// Directory to start browsing in (overrides the remembered one)
    path: Option<PathBuf>,

    /// Pick a single folder instead of files
    #[arg(long)]
    pick_dir: bool,

    /// Request code the outcome is dispatched under
    #[arg(long, default_value_t = REQUEST_SELECT_FROM_FILESYSTEM)]
    request_code: i32,

    /// Confirm this just-captured file for upload (camera flow)
    #[arg(long, conflicts_with_all = ["path", "pick_dir"])]
    camera_file: Option<PathBuf>,

    /// Account the selection is made for
    #[arg(long, default_value = "local")]
    account: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let prefs = Preferences::load();

    let request_code = if cli.camera_file.is_some() {
        REQUEST_UPLOAD_FROM_CAMERA
    } else {
        cli.request_code
    };

    let params = LaunchParams {
        account_id: cli.account,
        request_code,
        picker_mode: cli.pick_dir,
    };

    // An explicit start path wins over the remembered one; the camera flow
    // opens where the capture landed.
    let saved = match (&cli.camera_file, &cli.path) {
        (Some(file), _) => {
            let file = file.canonicalize().context("Invalid camera file")?;
            let directory = file
                .parent()
                .map(PathBuf::from)
                .context("Camera file has no parent directory")?;
            Some(SavedScreenState {
                directory,
                all_selected: false,
            })
        }
        (None, Some(path)) => {
            let directory = path.canonicalize().context("Invalid path")?;
            Some(SavedScreenState {
                directory,
                all_selected: false,
            })
        }
        (None, None) => None,
    };

    let fallback = std::env::current_dir().context("Cannot determine current directory")?;
    let mut controller = SelectionController::new(params, prefs, saved, &fallback);

    if let Some(file) = &cli.camera_file {
        let file = file.canonicalize().context("Invalid camera file")?;
        controller.toggle_file(&file);
    }

    if let Some(outcome) = outbox_tui::run(controller)? {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
