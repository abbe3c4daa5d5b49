//! Record Serializer
//!
//! Turns a [`ConversationRecord`] into JSON Lines: one self-contained
//! [`MemoryLine`] object per backend result, each terminated by `\n`.
//!
//! A failed result is kept. Its `response` carries [`ERROR_MARKER`] followed
//! by the failure description and the description is repeated in `error`.

use crate::types::{ConversationRecord, MemoryLine, QueryResult, Result};

/// Prefix written in place of response text when a backend failed
pub const ERROR_MARKER: &str = "[error]";

/// One memory line per result, in record order
pub fn serialize(record: &ConversationRecord) -> Vec<MemoryLine> {
    record
        .results
        .iter()
        .map(|result| MemoryLine {
            user_question: record.prompt.clone(),
            model_name: result.backend_name.clone(),
            response: response_text(result),
            error: result.error.clone(),
        })
        .collect()
}

/// Text reported for a result: the generated text, or the error marker line
pub fn response_text(result: &QueryResult) -> String {
    match (&result.text, &result.error) {
        (_, Some(error)) => format!("{} {}", ERROR_MARKER, error),
        (Some(text), None) => text.clone(),
        (None, None) => String::new(),
    }
}

/// Encode a single line without the trailing newline
pub fn encode_line(line: &MemoryLine) -> Result<String> {
    Ok(serde_json::to_string(line)?)
}

pub fn decode_line(line: &str) -> Result<MemoryLine> {
    Ok(serde_json::from_str(line.trim_end_matches(['\r', '\n']))?)
}

/// Concatenate encoded lines, each followed by `\n`
pub fn to_jsonl(lines: &[MemoryLine]) -> Result<String> {
    let mut out = String::new();
    for line in lines {
        out.push_str(&encode_line(line)?);
        out.push('\n');
    }
    Ok(out)
}

/// Decode every non-empty line of a JSON Lines blob
pub fn from_jsonl(text: &str) -> Result<Vec<MemoryLine>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(decode_line)
        .collect()
}

/// JSON context blob for the message endpoint: `[[model_name, response], ...]`
pub fn message_context(results: &[QueryResult]) -> Result<String> {
    let pairs: Vec<(&str, String)> = results
        .iter()
        .map(|r| (r.backend_name.as_str(), response_text(r)))
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}
