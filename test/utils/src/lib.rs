use serde_json::json;
use serde_json::Value;

/// Reply nested the way a Langflow chat output component returns it.
pub fn messages_body(text: &str) -> Value {
    return json!({
        "session_id": "abc",
        "outputs": [{
            "inputs": { "input_value": "hello" },
            "outputs": [{
                "results": {},
                "messages": [{
                    "message": text,
                    "sender": "Machine",
                    "sender_name": "AI",
                    "component_id": "ChatOutput-1"
                }]
            }]
        }]
    });
}

/// Reply only available under the older `results[0].text` shape.
pub fn results_body(text: &str) -> Value {
    return json!({
        "outputs": [{
            "outputs": [{
                "results": [{ "text": text }]
            }]
        }]
    });
}

pub fn long_reply_fixture() -> &'static str {
    return r#"
Hello! I'm the Macento agent.

I can answer questions about your account, walk you through onboarding, and point you to the right documentation when something is out of scope.
	Tabs are replaced by two spaces.
"#
    .trim();
}
