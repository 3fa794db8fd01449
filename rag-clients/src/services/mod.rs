//! Backend service clients.

pub mod openai_embeddings;
pub mod qdrant_search;
pub mod replicate_generate;
