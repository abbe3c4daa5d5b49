use crate::types::{ConversationRecord, QueryResult};

/// Assemble the conversation record for one run.
///
/// Results keep dispatch order; nothing is dropped, merged or reordered.
pub fn aggregate(prompt: &str, results: Vec<QueryResult>) -> ConversationRecord {
    ConversationRecord {
        prompt: prompt.to_string(),
        results,
    }
}
