use super::*;

#[test]
fn parses_positional_query() {
    let cli = Cli::try_parse_from(["adpulse", "Analyze ROAS drop"]).expect("expected valid cli args");
    assert_eq!(cli.query, "Analyze ROAS drop");
}

#[test]
fn config_flag_overrides_default_path() {
    let cli = Cli::try_parse_from(["adpulse", "--config", "alt/config.yaml", "q"])
        .expect("expected valid cli args");
    assert_eq!(cli.config, PathBuf::from("alt/config.yaml"));
}

#[test]
fn missing_query_is_a_usage_error() {
    let err = Cli::try_parse_from(["adpulse"]).unwrap_err();
    assert!(err.use_stderr());
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert!(err.to_string().contains("Usage"));
    assert_eq!(parse_exit_code(&err), 1);
}

#[test]
fn help_is_not_a_usage_error() {
    let err = Cli::try_parse_from(["adpulse", "--help"]).unwrap_err();
    assert!(!err.use_stderr());
    assert_eq!(parse_exit_code(&err), 0);
}
