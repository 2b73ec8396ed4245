use std::path::{Path, PathBuf};
use std::process::ExitCode;

use zcode_mode::kernel::services::adapters::{load_settings, load_settings_from};
use zcode_mode::kernel::services::ports::Settings;
use zcode_mode::kernel::{EditSession, LanguageMode, ModeRegistry};

mod logging;

const USAGE: &str =
    "usage: zcode-mode <path> [--mode <id>] [--folds] [--highlight] [--settings <file>]";

#[derive(Debug, Default)]
struct Args {
    path: Option<PathBuf>,
    mode: Option<String>,
    settings: Option<PathBuf>,
    folds: bool,
    highlight: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut out = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--folds" => out.folds = true,
            "--highlight" => out.highlight = true,
            "--mode" => out.mode = Some(args.next().ok_or("--mode needs a value")?),
            "--settings" => {
                out.settings = Some(args.next().ok_or("--settings needs a value")?.into())
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if arg.starts_with("--") => return Err(format!("unknown option: {arg}")),
            _ if out.path.is_none() => out.path = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }
    Ok(out)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };
    let Some(path) = args.path.clone() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let settings = match args.settings.as_deref() {
        Some(file) => load_settings_from(file),
        None => load_settings(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("zcode-mode: {err}; using default settings");
            Settings::default()
        }
    };

    let _logging = logging::init(settings.log_filter.as_deref());

    match run(&args, &path, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(path = %path.display(), error = %message, "zcode-mode failed");
            eprintln!("zcode-mode: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, path: &Path, settings: &Settings) -> Result<(), String> {
    let registry = ModeRegistry::with_builtin_modes();
    let mode = match args.mode.as_deref() {
        Some(id) => registry.create(id),
        None => registry.mode_for_path(path, settings),
    }
    .map_err(|err| err.to_string())?;

    let text =
        std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let mut session = EditSession::new(&text, mode.clone(), &settings.editor);
    tracing::info!(path = %path.display(), mode = mode.id(), "session opened");

    println!("mode: {}", mode.id());
    if let Some(snippets) = mode.snippet_file_id() {
        println!("snippets: {snippets}");
    }
    println!("worker: {}", worker_status(mode.as_ref(), &session));

    if args.folds {
        for range in session.fold_ranges() {
            println!(
                "fold {}:{} -> {}:{}",
                range.start_row + 1,
                range.start_column,
                range.end_row + 1,
                range.end_column
            );
        }
    }

    if args.highlight {
        let lines = session.highlight_lines(0, session.len_lines());
        for (row, spans) in lines.iter().enumerate() {
            let line = session.line(row);
            for span in spans {
                let end = span.end.min(line.len());
                let snippet = line.get(span.start..end).unwrap_or_default();
                println!("{}:{} {:?} {snippet:?}", row + 1, span.start, span.kind);
            }
        }
    }
    Ok(())
}

fn worker_status(mode: &dyn LanguageMode, session: &EditSession) -> &'static str {
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread().build() else {
        return "unavailable";
    };
    // The worker is only probed, so it is dropped right away.
    let _enter = runtime.enter();
    match mode.create_worker(Some(session)) {
        Some(_) => "available",
        None => "none",
    }
}
