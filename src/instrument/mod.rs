//! AI-assisted workflow instrumentation
//!
//! Sends a source script to the Gemini API with a master prompt asking for
//! provenance instrumentation, then post-processes the response: markdown
//! fences are stripped, unsupported attribute types are coerced, and the
//! result is validated before it is allowed near disk.

mod patcher;
mod prompt;

pub use patcher::{coerce_attribute_types, strip_markdown_fences, validate_instrumented};
pub use prompt::render_prompt;

use crate::client::GeminiClient;
use crate::error::Result;

/// Run the full instrumentation flow over one script's source text.
pub async fn instrument_source(client: &GeminiClient, source: &str) -> Result<String> {
    let prompt = render_prompt(source);
    let raw = client.generate(&prompt).await?;
    let stripped = strip_markdown_fences(&raw);
    let patched = coerce_attribute_types(stripped);
    validate_instrumented(&patched)?;
    Ok(patched)
}
