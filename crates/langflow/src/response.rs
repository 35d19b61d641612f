//! Locating the chat answer inside a flow run response.
//!
//! A run response nests the answer several levels deep, and where it ends
//! up depends on the flow's output components:
//!
//! ```text
//! { "outputs": [ {
//!     "results":   { "message": { "text": ... } },
//!     "artifacts": { "message": ... },
//!     "outputs":   [ { "results": { "message": { "text": ... } } } ],
//!     "messages":  [ { "message": ... } ]
//! } ] }
//! ```

use serde_json::Value;

/// Return the answer text of a run response.
///
/// For each top-level output, candidates are tried in order: the output's
/// own `results.message.text`, its `artifacts.message`, each nested
/// output's `results.message.text`, then each `messages[].message`. The
/// first string found wins. Returns `None` when no output has one.
pub fn extract_message(response: &Value) -> Option<String> {
    let outputs = response.get("outputs")?.as_array()?;

    outputs.iter().find_map(|output| {
        let direct = [
            output.pointer("/results/message/text"),
            output.pointer("/artifacts/message"),
        ];

        let nested = output
            .get("outputs")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|sub| sub.pointer("/results/message/text"));

        let messages = output
            .get("messages")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|m| m.get("message"));

        direct
            .into_iter()
            .chain(nested)
            .chain(messages)
            .flatten()
            .find_map(Value::as_str)
            .map(str::to_string)
    })
}
