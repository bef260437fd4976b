use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::activation::CommandActivator;
use crate::config::{self, ConfigError};
use crate::controller::{ExtensionController, ServiceError};
use crate::transport;
use crate::window_source::{SourceError, WindowSource};

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Source(SourceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Source(error) => write!(f, "source error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub show_help: bool,
}

pub fn usage() -> &'static str {
    "usage: winswitch-core [--config <path>]"
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                index += 1;
                let Some(path) = args.get(index) else {
                    return Err("--config requires a path".to_string());
                };
                options.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => options.show_help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        index += 1;
    }
    Ok(options)
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if options.show_help {
        println!("{}", usage());
        return Ok(());
    }

    if let Err(error) = crate::logging::init() {
        eprintln!("[winswitch-core] logging unavailable: {error}");
    }

    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        println!(
            "[winswitch-core] wrote default config to {}",
            config.config_path.display()
        );
    }
    println!(
        "[winswitch-core] startup cache_dir={} config_path={}",
        config.cache_dir.display(),
        config.config_path.display(),
    );

    let source = platform_source()?;
    println!("[winswitch-core] window source: {}", source.source_name());

    let mut controller = ExtensionController::new(config, source, Box::new(CommandActivator))?;
    serve(&mut controller)
}

#[cfg(target_os = "linux")]
fn platform_source() -> Result<Box<dyn WindowSource>, RuntimeError> {
    let source = crate::x11::X11WindowSource::connect().map_err(RuntimeError::Source)?;
    Ok(Box::new(source))
}

#[cfg(not(target_os = "linux"))]
fn platform_source() -> Result<Box<dyn WindowSource>, RuntimeError> {
    Ok(Box::new(
        crate::window_source::FixtureSource::deterministic_fixture(),
    ))
}

/// Newline-delimited JSON over stdio: one host event per line in, one
/// response line out. EOF ends the session.
fn serve(controller: &mut ExtensionController) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = transport::handle_json(controller, &line);
        let mut out = stdout.lock();
        writeln!(out, "{response}")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_args, RuntimeOptions};
    use std::path::PathBuf;

    #[test]
    fn parses_config_path() {
        let args = vec!["--config".to_string(), "/tmp/ws.toml".to_string()];
        let options = parse_cli_args(&args).unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/ws.toml")));
        assert!(!options.show_help);
    }

    #[test]
    fn rejects_unknown_argument() {
        let args = vec!["--frobnicate".to_string()];
        let error = parse_cli_args(&args).unwrap_err();
        assert!(error.contains("unknown argument"));
    }

    #[test]
    fn config_flag_requires_a_path() {
        let args = vec!["--config".to_string()];
        assert!(parse_cli_args(&args).is_err());
    }

    #[test]
    fn no_args_yield_defaults() {
        assert_eq!(parse_cli_args(&[]).unwrap(), RuntimeOptions::default());
    }
}
