use anyhow::{Context, Result};
use clap::Parser;
use dir_squeeze::about::render_info;
use dir_squeeze::cli::Args;
use dir_squeeze::constants::{DEFAULT_LANG_CODE, LANGUAGE_DIR};
use dir_squeeze::{logger, run_directory, ProcessingOptions, Settings, SqueezeError, Translator};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init(args.verbose);

    let requests = args.info_requests();
    if !requests.is_empty() {
        let lang_code = args.lang_code.as_deref().unwrap_or(DEFAULT_LANG_CODE);
        let tr = Translator::load(lang_code, Path::new(LANGUAGE_DIR));
        for request in requests {
            println!("{}", render_info(request, &tr));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (config_path, explicit) = args.config_path();
    let file_settings = Settings::load(&config_path, explicit)
        .with_context(|| format!("Failed to load config {:?}", config_path))?;
    let mut settings = args.settings().layered_over(file_settings);
    debug!(?settings, "merged settings");

    let lang_code = settings
        .lang_code
        .clone()
        .unwrap_or_else(|| DEFAULT_LANG_CODE.to_string());
    let tr = Translator::load(&lang_code, Path::new(LANGUAGE_DIR));

    let options = ProcessingOptions::from_settings(&settings)?;
    let path = match settings.path.take() {
        Some(path) => path,
        None => prompt_for_path(&tr)?,
    };

    match run_directory(&path, &options, &tr) {
        Ok(_) => {
            println!(
                "{}",
                tr.format("general.finished_processing", &[("folder", path.display().to_string())])
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(SqueezeError::DirectoryNotFound(folder)) => {
            eprintln!(
                "{}",
                tr.format("general.folder_not_found", &[("folder", folder.display().to_string())])
            );
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to process {:?}", path)),
    }
}

/// Asks for the target directory on stdin. Quotes left by drag-and-drop are stripped.
fn prompt_for_path(tr: &Translator) -> Result<PathBuf> {
    print!("{}", tr.t("general.ask_input_path"));
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Err(SqueezeError::MissingPath.into());
    }
    Ok(PathBuf::from(trimmed))
}
