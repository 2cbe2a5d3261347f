//! Command-line arguments.
//!
//! Every option can also come from a `DASHGATE_*` environment variable.

use std::path::PathBuf;

use clap::Parser;

/// Default dashboard port.
pub const DEFAULT_PORT: u16 = 5665;

/// Serve a live load-test dashboard.
#[derive(Debug, Parser)]
#[command(name = "dashgate")]
#[command(about = "Serve a live load-test dashboard over HTTP")]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "DASHGATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to (0 picks a free port)
    #[arg(long, env = "DASHGATE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Default UI language (e.g. "en", "zh")
    #[arg(long, env = "DASHGATE_LANG", default_value = "")]
    pub lang: String,

    /// Directory holding the built dashboard UI
    #[arg(long = "ui-dir", env = "DASHGATE_UI_DIR")]
    pub ui_dir: PathBuf,

    /// HTML report served at /report
    #[arg(long, env = "DASHGATE_REPORT")]
    pub report: Option<PathBuf>,

    /// Recorded events (one JSON object per line) to publish after startup
    #[arg(long, env = "DASHGATE_REPLAY")]
    pub replay: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// The socket address to bind, with IPv6 hosts bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "dashgate",
            "--ui-dir",
            "/srv/ui",
            "--port",
            "0",
            "--lang",
            "zh",
            "--report",
            "/tmp/report.html",
            "-v",
        ]);
        assert_eq!(cli.ui_dir, PathBuf::from("/srv/ui"));
        assert_eq!(cli.port, 0);
        assert_eq!(cli.lang, "zh");
        assert_eq!(cli.report, Some(PathBuf::from("/tmp/report.html")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_ui_dir_is_required() {
        assert!(Cli::try_parse_from(["dashgate"]).is_err() || std::env::var_os("DASHGATE_UI_DIR").is_some());
    }

    #[test]
    fn test_address_formatting() {
        let mut cli = Cli::parse_from(["dashgate", "--ui-dir", "ui", "--host", "0.0.0.0", "--port", "80"]);
        assert_eq!(cli.address(), "0.0.0.0:80");

        cli.host = "::1".to_string();
        assert_eq!(cli.address(), "[::1]:80");

        cli.host = "[::1]".to_string();
        assert_eq!(cli.address(), "[::1]:80");
    }
}
