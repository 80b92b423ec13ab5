//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use artgrab_core::DEFAULT_MAX_ATTEMPTS;

/// Mirror an ArtStation collection to a local directory.
///
/// Artgrab walks the collection's pages, derives one cover image per project,
/// and downloads them one at a time.
#[derive(Parser, Debug)]
#[command(name = "artgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Collection identifier (the id in the collection URL)
    pub collection_id: String,

    /// Request the highest-resolution (4k) rendition of each cover
    #[arg(long)]
    pub hq: bool,

    /// Skip items whose file is already present in the download directory
    #[arg(long)]
    pub resume: bool,

    /// Directory downloads are written to
    #[arg(short = 'd', long, default_value = "./artworks")]
    pub download_dir: PathBuf,

    /// Transfer attempts per item before it is reported as failed (1-10)
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_ATTEMPTS as u8, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_attempts: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_collection_id() {
        let result = Args::try_parse_from(["artgrab"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["artgrab", "12345"]).unwrap();
        assert_eq!(args.collection_id, "12345");
        assert!(!args.hq);
        assert!(!args.resume);
        assert_eq!(args.download_dir, PathBuf::from("./artworks"));
        assert_eq!(args.max_attempts, 3); // DEFAULT_MAX_ATTEMPTS
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_hq_flag() {
        let args = Args::try_parse_from(["artgrab", "12345", "--hq"]).unwrap();
        assert!(args.hq);
    }

    #[test]
    fn test_cli_resume_flag() {
        let args = Args::try_parse_from(["artgrab", "12345", "--resume"]).unwrap();
        assert!(args.resume);
    }

    #[test]
    fn test_cli_flags_accepted_in_any_position() {
        let args = Args::try_parse_from(["artgrab", "--resume", "12345", "--hq"]).unwrap();
        assert_eq!(args.collection_id, "12345");
        assert!(args.hq);
        assert!(args.resume);
    }

    #[test]
    fn test_cli_download_dir_flag() {
        let args =
            Args::try_parse_from(["artgrab", "12345", "-d", "/tmp/covers"]).unwrap();
        assert_eq!(args.download_dir, PathBuf::from("/tmp/covers"));
    }

    #[test]
    fn test_cli_max_attempts_flag() {
        let args = Args::try_parse_from(["artgrab", "12345", "-a", "5"]).unwrap();
        assert_eq!(args.max_attempts, 5);
    }

    #[test]
    fn test_cli_max_attempts_zero_rejected() {
        let result = Args::try_parse_from(["artgrab", "12345", "-a", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_max_attempts_over_max_rejected() {
        let result = Args::try_parse_from(["artgrab", "12345", "-a", "11"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["artgrab", "12345", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag() {
        let args = Args::try_parse_from(["artgrab", "12345", "-q"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["artgrab", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["artgrab", "12345", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
