#[cfg(test)]
#[path = "reply_test.rs"]
mod tests;

use serde_json::Value;

pub const FALLBACK_REPLY: &str = "Sorry, I received a response, but couldn't understand it.";
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

type Extractor = fn(&Value) -> Option<String>;

/// Probed in order, the first hit wins.
const EXTRACTORS: [Extractor; 3] = [chat_output_message, result_text, top_level_message];

/// Non-empty strings, non-zero numbers and `true` are shown as the reply.
/// `null`, `false`, zero, `""`, objects and arrays count as absent.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => return Some(text.to_string()),
        Value::Number(number) if number.as_f64() != Some(0.0) => {
            return Some(number.to_string());
        }
        Value::Bool(true) => return Some("true".to_string()),
        _ => return None,
    }
}

fn first_output(body: &Value) -> Option<&Value> {
    return body.get("outputs")?.get(0)?.get("outputs")?.get(0);
}

/// `outputs[0].outputs[0].messages[0].message`
fn chat_output_message(body: &Value) -> Option<String> {
    let message = first_output(body)?
        .get("messages")?
        .get(0)?
        .get("message");

    return present(message);
}

/// `outputs[0].outputs[0].results[0].text`
fn result_text(body: &Value) -> Option<String> {
    let text = first_output(body)?.get("results")?.get(0)?.get("text");
    return present(text);
}

/// `message`
fn top_level_message(body: &Value) -> Option<String> {
    return present(body.get("message"));
}

pub fn first_present(extractors: &[Extractor], body: &Value, fallback: &str) -> String {
    return extractors
        .iter()
        .find_map(|extract| return extract(body))
        .unwrap_or_else(|| {
            tracing::warn!("No reply found in any known location of the agent response");
            return fallback.to_string();
        });
}

/// Locates the reply text inside whatever document the agent returned,
/// degrading to a fixed apology when no known shape matches.
pub fn extract_reply(body: &Value) -> String {
    return first_present(&EXTRACTORS, body, FALLBACK_REPLY);
}
