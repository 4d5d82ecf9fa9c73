use std::net::AddrParseError;

use snafu::Snafu;

/// CLI error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CliError {
    #[snafu(display("Invalid server address"))]
    InvalidServerAddress { source: AddrParseError },
    #[snafu(display("Failed to bind server address"))]
    Bind { source: std::io::Error },
    #[snafu(display("HTTP server error"))]
    Serve { source: std::io::Error },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
