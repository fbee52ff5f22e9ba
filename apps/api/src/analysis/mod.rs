// Resume analysis: upload validation, PDF text extraction, and one structured
// LLM call. All LLM calls go through llm_client.

pub mod engine;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;
