//! Template rendering.

use crate::templates::{SUPPORT_ANSWER_TEMPLATE, SUPPORT_ANSWER_TEMPLATE_ID};
use crate::types::BuiltPrompt;
use handlebars::Handlebars;
use helpdesk_core::{AppError, AppResult};
use std::collections::HashMap;

/// Render a Handlebars template with string fields.
///
/// Output is plain text: HTML escaping is disabled, and strict mode turns a
/// field referenced by the template but absent from `fields` into an error.
///
/// # Example
/// ```
/// use helpdesk_prompt::render;
/// use std::collections::HashMap;
///
/// let mut fields = HashMap::new();
/// fields.insert("question".to_string(), "Where is billing?".to_string());
///
/// let text = render("Question: {{question}}", &fields).unwrap();
/// assert_eq!(text, "Question: Where is billing?");
/// ```
pub fn render(template: &str, fields: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", fields)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

/// Build the support-answer prompt from persona, formatted context, and question.
pub fn build_answer_prompt(persona: &str, context: &str, question: &str) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", SUPPORT_ANSWER_TEMPLATE_ID);

    let mut fields = HashMap::new();
    fields.insert("persona".to_string(), persona.to_string());
    fields.insert("context".to_string(), context.to_string());
    fields.insert("question".to_string(), question.to_string());

    let text = render(SUPPORT_ANSWER_TEMPLATE, &fields)?;

    Ok(BuiltPrompt::new(text, SUPPORT_ANSWER_TEMPLATE_ID, fields))
}
