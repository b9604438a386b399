use anyhow::Result;

use super::AgentPrompt;

#[test]
fn it_builds_a_chat_run_request() -> Result<()> {
    let prompt = AgentPrompt::new("What can you do?", "session-1");
    let body = serde_json::to_string(&prompt.to_run_request())?;

    insta::assert_snapshot!(body, @r###"{"input_value":"What can you do?","output_type":"chat","input_type":"chat","session_id":"session-1"}"###);

    return Ok(());
}

#[test]
fn it_serializes_exactly_four_fields() -> Result<()> {
    let prompt = AgentPrompt::new("hi", "abc");
    let value = serde_json::to_value(prompt.to_run_request())?;

    let mut keys = value
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<String>>();
    keys.sort();

    assert_eq!(
        keys,
        vec!["input_type", "input_value", "output_type", "session_id"]
    );

    return Ok(());
}
