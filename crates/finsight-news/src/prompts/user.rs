//! User message templates, one per analysis kind
//!
//! Every template quotes the record's title and body verbatim; the four
//! kinds differ only in the instruction that follows.

use finsight_core::AnalysisKind;
use finsight_prompt::{JinjaTemplate, Result};

/// Which concept sectors and industry chains benefit
pub fn concept_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        super::user_template_name(AnalysisKind::Concept),
        "News title: {{ title }}\nNews body: {{ body }}\n\nIdentify the concept sectors and industry chains that benefit most directly from this news (e.g. low-altitude economy, memory chips), and explain the benefit logic for each.",
        "新闻标题: {{ title }}\n新闻内容: {{ body }}\n\n请识别最直接受益的产业链与概念板块（如：低空经济、存储芯片等），并逐一说明受益逻辑。",
    )
}

/// Leading listed companies exposed to the news, with the table contract
pub fn related_stocks_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        super::user_template_name(AnalysisKind::RelatedStocks),
        "News title: {{ title }}\nNews body: {{ body }}\n\nList the 3 A-share leading companies most exposed to this news. Each entry must include the stock name and ticker code with a one-line rationale. Respond in Markdown and present the equities in a Markdown table.",
        "新闻标题: {{ title }}\n新闻内容: {{ body }}\n\n请列出3只与该新闻最相关的A股龙头公司，必须包含股票名称和代码，并简述理由。请使用 Markdown 格式输出，个股部分请使用表格。",
    )
}

/// One-line read of the capital-market impact
pub fn market_impact_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        super::user_template_name(AnalysisKind::MarketImpact),
        "News title: {{ title }}\nNews body: {{ body }}\n\nDistill the impact of this news on capital markets into a single sentence, then briefly explain the transmission chain behind it.",
        "新闻标题: {{ title }}\n新闻内容: {{ body }}\n\n请用一句话提炼这条新闻对资本市场的影响，并简要说明背后的传导逻辑。",
    )
}

/// Actionable observations with explicit risk caveats
pub fn investment_advice_prompt() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        super::user_template_name(AnalysisKind::InvestmentAdvice),
        "News title: {{ title }}\nNews body: {{ body }}\n\nGive actionable observation points an investor should watch following this news, and state the key risks explicitly. Close with a reminder that this is not personalized investment advice.",
        "新闻标题: {{ title }}\n新闻内容: {{ body }}\n\n请给出投资者在该新闻后可关注的操作观察点，并明确提示主要风险。最后注明以上内容不构成个性化投资建议。",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_prompt::{Language, PromptTemplate};
    use serde_json::json;

    #[test]
    fn test_all_user_prompts_created() {
        assert!(concept_prompt().is_ok());
        assert!(related_stocks_prompt().is_ok());
        assert!(market_impact_prompt().is_ok());
        assert!(investment_advice_prompt().is_ok());
    }

    #[test]
    fn test_concept_prompt_render() {
        let template = concept_prompt().expect("builds");
        let vars = json!({ "title": "央行降准", "body": "下调存款准备金率" });

        let zh = template.render(&Language::Chinese, &vars).expect("renders");
        assert!(zh.contains("央行降准"));
        assert!(zh.contains("下调存款准备金率"));
        assert!(zh.contains("受益"));

        let en = template.render(&Language::English, &vars).expect("renders");
        assert!(en.contains("央行降准"));
        assert!(en.contains("concept sectors"));
    }

    #[test]
    fn test_related_stocks_requires_codes_and_table() {
        let template = related_stocks_prompt().expect("builds");
        let vars = json!({ "title": "t", "body": "b" });

        let zh = template.render(&Language::Chinese, &vars).expect("renders");
        assert!(zh.contains("股票名称和代码"));
        assert!(zh.contains("表格"));

        let en = template.render(&Language::English, &vars).expect("renders");
        assert!(en.contains("Markdown table"));
    }

    #[test]
    fn test_advice_prompt_carries_risk_caveat() {
        let template = investment_advice_prompt().expect("builds");
        let zh = template
            .render(&Language::Chinese, &json!({ "title": "t", "body": "b" }))
            .expect("renders");
        assert!(zh.contains("风险"));
        assert!(zh.contains("不构成"));
    }
}
