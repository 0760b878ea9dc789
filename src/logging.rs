//! Log sink setup for the gateway binary.
//!
//! The library only logs through the `log` facade. This module installs
//! `env_logger` behind it with the configured level and sinks, and picks the
//! line format from the deployment environment: JSON objects in production,
//! plain text in development. Every production line carries the service
//! name, version, environment and process id.

use crate::config::{ApplicationConfig, Environment, LogOutput, LoggingConfig};
use crate::error::{BuildError, BuildResult};

use chrono::{SecondsFormat, Utc};
use env_logger::Target;
use log::Record;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Fields attached to every structured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFields {
    pub service: String,
    pub version: String,
    pub environment: Environment,
    pub pid: u32,
}

impl LogFields {
    pub fn for_application(application: &ApplicationConfig) -> Self {
        Self {
            service: application.service.clone(),
            version: application.version.clone(),
            environment: application.environment,
            pid: std::process::id(),
        }
    }
}

/// Install the global logger.
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init(logging: &LoggingConfig, application: &ApplicationConfig) -> BuildResult<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(logging.level);

    match logging.outputs.as_slice() {
        [] | [LogOutput::Stderr] => builder.target(Target::Stderr),
        [LogOutput::Stdout] => builder.target(Target::Stdout),
        outputs => builder.target(Target::Pipe(Box::new(FanOut::open(outputs)?))),
    };

    let fields = LogFields::for_application(application);
    match application.environment {
        Environment::Production => {
            builder.format(move |buf, record| writeln!(buf, "{}", json_line(&fields, record)))
        }
        Environment::Development => builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        }),
    };

    builder
        .try_init()
        .map_err(|e| BuildError::invalid_configuration(format!("logger setup failed: {}", e)))
}

/// Writer copying every log line to several sinks.
pub struct FanOut {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl FanOut {
    /// Open every output; files are created if missing and appended to.
    pub fn open(outputs: &[LogOutput]) -> BuildResult<Self> {
        let sinks = outputs
            .iter()
            .map(|output| {
                let sink: Box<dyn Write + Send> = match output {
                    LogOutput::Stderr => Box::new(io::stderr()),
                    LogOutput::Stdout => Box::new(io::stdout()),
                    LogOutput::File(path) => Box::new(open_log_file(path)?),
                };
                Ok(sink)
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Self { sinks })
    }
}

impl Write for FanOut {
    /// A failing sink does not stop the others; the first error is returned.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.write_all(buf) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

fn open_log_file(path: &Path) -> BuildResult<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            BuildError::invalid_configuration(format!(
                "cannot open log output {}: {}",
                path.display(),
                e
            ))
        })
}

/// Render a record as a single-line JSON object.
pub fn json_line(fields: &LogFields, record: &Record<'_>) -> String {
    serde_json::json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "message": record.args().to_string(),
        "service": fields.service,
        "version": fields.version,
        "environment": fields.environment.as_str(),
        "pid": fields.pid,
    })
    .to_string()
}

/// Flush buffered log output; called right before the process exits.
pub fn flush() {
    log::logger().flush();
}
