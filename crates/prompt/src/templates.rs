//! Built-in instruction templates.

/// Identifier recorded in `BuiltPrompt` metadata for the answer template.
pub const SUPPORT_ANSWER_TEMPLATE_ID: &str = "support.answer";

/// Restricts the model to the supplied context.
pub const ONLY_CONTEXT_INSTRUCTION: &str =
    "Answer the question based ONLY on the context provided.";

/// Tells the model to admit when the context falls short instead of inventing.
pub const INSUFFICIENT_CONTEXT_INSTRUCTION: &str =
    "If the context doesn't answer the question, say so. Do not make up features.";

/// Help-desk answer template.
///
/// Fields: `persona`, `context`, `question`.
pub const SUPPORT_ANSWER_TEMPLATE: &str = "You are a {{persona}}. \
Answer the question based ONLY on the context provided.

Context:
{{context}}

Question: {{question}}

If the context doesn't answer the question, say so. Do not make up features.
Answer:";
