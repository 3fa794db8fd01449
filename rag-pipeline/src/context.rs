//! Context assembly: retrieved chunk texts into one block.

use rag_clients::ScoredChunk;

/// Join chunk texts with a blank-line separator, preserving retrieval order.
///
/// Pure function: empty input yields an empty string, and repeated calls
/// with the same chunks produce byte-identical output. Length is already
/// bounded upstream by the search `limit`; no additional capping here.
pub fn assemble_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
