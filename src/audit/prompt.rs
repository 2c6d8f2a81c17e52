//! Prompt and structured-output schema for a translation audit.
//!
//! [`PromptBuilder`] embeds the target language and both texts verbatim into
//! a single instruction.  [`response_schema`] declares the JSON object the
//! model must return; it is written in the OpenAPI subset the Gemini
//! `generationConfig.responseSchema` field accepts.

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Instruction text
// ---------------------------------------------------------------------------

const AUDITOR_ROLE: &str = "\
You are an expert linguistic auditor performing a high-precision Translation Quality Audit (TQA).";

const AUDIT_TASKS: &str = "\
Tasks:
1. CRITICAL AUDIT: Identify any of the following issues that contradict the English source text:
   - Missing Content: skipped words, phrases, or punctuation that alter intent.
   - Terminology Errors: incorrect or inappropriate terms for the target language context.
   - Shifts in Meaning: nuance changes, incorrect tone, or semantic drift that misrepresents the source.
   - Summarize these findings in concise bullet points. If the translation is perfect, confirm its accuracy.

2. GRANULAR BREAKDOWN: Provide a word-by-word mapping of the target text to English equivalents.
   - For each word, explain the grammatical context (e.g. \"Noun, plural\", \"1st person singular verb\", \"Direct object marker\").

Return results strictly as a JSON object.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the audit instruction for one target language.
///
/// # Example
/// ```rust
/// use bilingual_proofreader::audit::PromptBuilder;
///
/// let prompt = PromptBuilder::new("Turkish").build("Good morning", "Günaydın");
/// assert!(prompt.contains("Target Language: Turkish"));
/// assert!(prompt.contains("\"Günaydın\""));
/// ```
pub struct PromptBuilder {
    target_language: String,
}

impl PromptBuilder {
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
        }
    }

    /// Build the full instruction for one source/target pair.
    ///
    /// Structure (in order):
    /// 1. Auditor role
    /// 2. Target language, source text, target text
    /// 3. Audit and breakdown tasks, JSON-only cue
    pub fn build(&self, source_text: &str, target_text: &str) -> String {
        let mut prompt = String::with_capacity(
            AUDITOR_ROLE.len() + AUDIT_TASKS.len() + source_text.len() + target_text.len() + 128,
        );
        prompt.push_str(AUDITOR_ROLE);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("Target Language: {}\n", self.target_language));
        prompt.push_str(&format!("Source (English): \"{}\"\n", source_text));
        prompt.push_str(&format!("Target Translation: \"{}\"\n\n", target_text));
        prompt.push_str(AUDIT_TASKS);
        prompt
    }
}

// ---------------------------------------------------------------------------
// Response schema
// ---------------------------------------------------------------------------

/// Structured-output declaration: `feedback` plus the `wordBreakdown` array,
/// every field required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "feedback": {
                "type": "STRING",
                "description": "The audit summary focusing on missing content, terminology, and meaning shifts."
            },
            "wordBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "targetWord": { "type": "STRING" },
                        "sourceEquivalent": { "type": "STRING" },
                        "context": { "type": "STRING" }
                    },
                    "required": ["targetWord", "sourceEquivalent", "context"]
                }
            }
        },
        "required": ["feedback", "wordBreakdown"]
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
