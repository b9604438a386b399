use anyhow::Result;

use super::build;
use super::help_text;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_accepts_credentials_as_flags() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "macento",
        "chat",
        "--org-id",
        "org-1",
        "--token",
        "tok-1",
    ])?;

    let (name, chat_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "chat");
    assert_eq!(chat_matches.get_one::<String>("org-id").unwrap(), "org-1");
    assert_eq!(chat_matches.get_one::<String>("token").unwrap(), "tok-1");

    return Ok(());
}

#[test]
fn it_requires_a_shell_for_completions() {
    let res = build().try_get_matches_from(vec!["macento", "completions"]);
    assert!(res.is_err());
}

#[test]
fn it_lists_hotkeys() {
    let text = help_text();
    assert!(text.starts_with("HOTKEYS:"));
    assert!(text.contains("- Enter - Send your message"));
}
