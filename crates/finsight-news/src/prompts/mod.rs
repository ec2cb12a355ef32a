//! Analysis prompt templates
//!
//! Pure, deterministic mapping from a news record plus an analysis kind to
//! the prompt pair sent to the model. The templates only reformat the
//! record's own title and body into context; they never add financial
//! facts of their own.

pub mod system;
pub mod user;

use finsight_core::{AnalysisKind, NewsRecord};
use finsight_prompt::{PromptRegistry, Result};
use serde_json::json;

/// Registry name of the analyst persona system prompt
pub const SYSTEM_ANALYST: &str = "news.system.analyst";

/// Registry name of the user template for an analysis kind
pub fn user_template_name(kind: AnalysisKind) -> String {
    format!("news.user.{}", kind.tag())
}

/// Register every analysis template into the given registry
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    registry.register(system::analyst()?);
    registry.register(user::concept_prompt()?);
    registry.register(user::related_stocks_prompt()?);
    registry.register(user::market_impact_prompt()?);
    registry.register(user::investment_advice_prompt()?);
    Ok(())
}

/// Render the (system, user) prompt pair for one analysis request
///
/// Deterministic in `(title, body, kind)` and the registry's language.
pub fn build(
    registry: &PromptRegistry,
    record: &NewsRecord,
    kind: AnalysisKind,
) -> Result<(String, String)> {
    let vars = json!({
        "title": record.title,
        "body": record.body_text(),
    });
    let system = registry.render(SYSTEM_ANALYST, &json!({}))?;
    let user = registry.render(&user_template_name(kind), &vars)?;
    Ok((system, user))
}
