//! Album Lyrics Collector Library
//!
//! This library collects the tracks of one album of one artist from the Spotify
//! Web API, looks up the lyrics of every track on Genius, cleans them up, detects
//! their language and writes everything as newline-delimited JSON records.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `genius` - Genius lyrics search client
//! - `http` - Transport abstraction over the HTTP client
//! - `language` - Language detection for lyrics
//! - `lyrics` - Lyrics resolution with retries and text cleanup
//! - `management` - Output record persistence
//! - `pipeline` - The collection run from token to output file
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use lyricollect::{config, pipeline::Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> lyricollect::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     Pipeline::from_settings(&settings)?.run().await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod genius;
pub mod http;
pub mod language;
pub mod lyrics;
pub mod management;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the transport seams where any kind of failure (network, TLS,
/// parsing) is treated the same by the caller. Keeps the Send + Sync bounds
/// so values can cross task boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching data for track: {}", track_name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a recoverable error with a red exclamation mark to stderr.
///
/// Unlike [`error!`], the program keeps running. Used wherever a failure is
/// logged and converted into an empty result or a sentinel value.
///
/// # Example
///
/// ```
/// failure!("Spotify HTTP error (albums): {}", status);
/// ```
#[macro_export]
macro_rules! failure {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1. Only meant for the binary edge (configuration
/// that cannot be loaded, output that cannot be written); library code uses
/// [`failure!`] instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Detected language is '{}' for track '{}'", language, track);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
