//! Prompt builder: fixed persona + labeled context + question + answer cue.

/// System persona for the fastener assistant.
///
/// Keep this short: it consistently improves steering without wasting tokens.
pub const SYSTEM_PERSONA: &str = "\
You are ScrewSavvy, an expert AI assistant for screw and fastener recommendations.
Use the provided context to answer questions about screws, fasteners, and hardware.
Be helpful, accurate, and specific in your recommendations.
If the context doesn't contain relevant information, say so politely.";

/// Render the full prompt for one query.
///
/// Deterministic function of `(context, query)`: the context section is
/// present even when empty, so a retrieval miss still yields a well-formed
/// prompt and generation proceeds.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!("{SYSTEM_PERSONA}\n\nContext:\n{context}\n\nUser Question: {query}\n\nAnswer:")
}
