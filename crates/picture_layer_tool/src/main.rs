#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod commands;
mod options;
mod session;

pub use options::*;

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use i18n_embed::{
    fluent::{fluent_language_loader, FluentLanguageLoader},
    DesktopLanguageRequester,
};
use i18n_embed_fl::fl;
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use semver::Version;

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

lazy_static::lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 0, 0));
}

pub static LANGUAGE_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = fluent_language_loader!();
    let requested_languages = DesktopLanguageRequester::requested_languages();
    let _result = i18n_embed::select(&loader, &Localizations, &requested_languages);
    loader.set_use_isolating(false);
    loader
});

pub type ToolResult<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(name = "picture_layer", version, about = fl!(LANGUAGE_LOADER, "app-about"), long_about = None)]
pub struct Args {
    #[arg(long, global = true, value_name = "DIR", help = fl!(LANGUAGE_LOADER, "arg-pictures-help"))]
    pictures: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false, help = fl!(LANGUAGE_LOADER, "arg-yes-help"))]
    yes: bool,

    #[arg(long, global = true, default_value_t = false, help = fl!(LANGUAGE_LOADER, "arg-no-log-help"))]
    no_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = fl!(LANGUAGE_LOADER, "cmd-check-about"))]
    Check {
        #[arg(value_name = "FILE", help = fl!(LANGUAGE_LOADER, "arg-file-help"))]
        file: PathBuf,
    },

    #[command(about = fl!(LANGUAGE_LOADER, "cmd-list-about"))]
    List {
        #[arg(value_name = "FILE", help = fl!(LANGUAGE_LOADER, "arg-file-help"))]
        file: PathBuf,
        #[arg(long, value_name = "ID", help = fl!(LANGUAGE_LOADER, "arg-actor-help"))]
        actor: Option<String>,
    },

    #[command(about = fl!(LANGUAGE_LOADER, "cmd-scan-about"))]
    Scan {
        #[arg(value_name = "DIR", help = fl!(LANGUAGE_LOADER, "arg-dir-help"))]
        dir: Option<PathBuf>,
    },

    #[command(about = fl!(LANGUAGE_LOADER, "cmd-export-about"))]
    Export {
        #[arg(value_name = "FILE", help = fl!(LANGUAGE_LOADER, "arg-file-help"))]
        file: PathBuf,
        #[arg(long, default_value_t = false, help = fl!(LANGUAGE_LOADER, "arg-clipboard-help"))]
        clipboard: bool,
        #[arg(short, long, value_name = "FILE", help = fl!(LANGUAGE_LOADER, "arg-output-help"))]
        output: Option<PathBuf>,
    },

    #[command(about = fl!(LANGUAGE_LOADER, "cmd-edit-about"))]
    Edit {
        #[arg(value_name = "FILE", help = fl!(LANGUAGE_LOADER, "arg-file-help"))]
        file: PathBuf,
    },

    #[command(about = fl!(LANGUAGE_LOADER, "cmd-configure-about"))]
    Configure {
        #[arg(long, value_name = "EXT,...", value_delimiter = ',', help = fl!(LANGUAGE_LOADER, "arg-extensions-help"))]
        extensions: Option<Vec<String>>,
        #[arg(long, value_name = "BOOL", help = fl!(LANGUAGE_LOADER, "arg-confirm-help"))]
        confirm_destructive: Option<bool>,
        #[arg(long, value_name = "BOOL", help = fl!(LANGUAGE_LOADER, "arg-copy-on-export-help"))]
        copy_on_export: Option<bool>,
        #[arg(long, value_name = "SPEC", help = fl!(LANGUAGE_LOADER, "arg-log-spec-help"))]
        log_spec: Option<String>,
    },
}

fn get_log_dir() -> Option<PathBuf> {
    let dir = Options::project_dirs()?.config_dir().to_path_buf();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

fn start_logger(spec: &str) -> Option<LoggerHandle> {
    let Some(log_dir) = get_log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let logger = Logger::try_with_env_or_str(format!("{spec}, i18n_embed=error"))
        .ok()?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("picture_layer").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .create_symlink(log_dir.join("picture_layer.log"))
        .duplicate_to_stderr(Duplicate::Warn)
        .start();
    match logger {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut options = Options::load_options().unwrap_or_else(|err| {
        eprintln!("{}", fl!(LANGUAGE_LOADER, "error-failed", error = err.to_string()));
        Options::default()
    });
    let _logger = if args.no_log { None } else { start_logger(&options.log_spec) };
    log::info!("Starting picture_layer {}", *VERSION);

    if let Some(pictures) = &args.pictures {
        options.pictures_dir.clone_from(pictures);
    }
    if args.yes {
        options.confirm_destructive = false;
    }

    let result = run(args.command, options);
    log::info!("Shutting down.");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("{}", fl!(LANGUAGE_LOADER, "error-failed", error = format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, options: Options) -> ToolResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Check { file } => commands::check(&file, &mut out),
        Command::List { file, actor } => commands::list(&file, actor.as_deref(), &mut out),
        Command::Scan { dir } => {
            let dir = dir.unwrap_or_else(|| options.pictures_dir.clone());
            commands::scan(&dir, &options.image_extensions, &mut out)
        }
        Command::Export { file, clipboard, output } => {
            let clipboard = clipboard || options.copy_on_export;
            commands::export(&file, clipboard, output.as_deref(), &mut out)
        }
        Command::Edit { file } => {
            let mut session = session::Session::open(&file, options)?;
            let stdin = io::stdin();
            session.run(&mut stdin.lock(), &mut out)
        }
        Command::Configure {
            extensions,
            confirm_destructive,
            copy_on_export,
            log_spec,
        } => {
            // --yes is not stored, --pictures is
            let mut stored = Options::load_options()?;
            stored.pictures_dir = options.pictures_dir;
            if let Some(extensions) = extensions {
                stored.image_extensions = extensions;
            }
            if let Some(confirm) = confirm_destructive {
                stored.confirm_destructive = confirm;
            }
            if let Some(copy) = copy_on_export {
                stored.copy_on_export = copy;
            }
            if let Some(spec) = log_spec {
                stored.log_spec = spec;
            }
            commands::configure(&stored, &mut out)
        }
    }
}
