use std::path::PathBuf;

use clap::Parser;
use reclaim_app::DEFAULT_CONFIG_FILE;

/// Archive unused Tableau workbooks to Cloud Storage and delete them from the server.
#[derive(Debug, Parser)]
#[command(name = "tableau-reclaim", version)]
pub struct CliArgs {
    /// Config file with tableauServer, tableauDB and googleCloud sections
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Directory the timestamped backup directory is created in
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Download, report and archive, but do not delete anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_config_and_directory() {
        let args = CliArgs::parse_from(["tableau-reclaim"]);
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.dry_run);
    }

    #[test]
    fn parses_overrides() {
        let args = CliArgs::parse_from([
            "tableau-reclaim",
            "--config",
            "/etc/reclaim.toml",
            "--output-dir",
            "/srv/backups",
            "--dry-run",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/reclaim.toml"));
        assert_eq!(args.output_dir, PathBuf::from("/srv/backups"));
        assert!(args.dry_run);
    }
}
