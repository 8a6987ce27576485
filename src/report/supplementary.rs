use std::fmt::{self, Write};
use std::path::Path;

use super::assemble;
use crate::analysis::{CrossDimensional, SupplementaryResults};
use crate::charts::{chart_path, names};
use crate::constants::answers::{
    EXPERIENCE_FAIRLY_GOOD, EXPERIENCE_NEUTRAL, EXPERIENCE_POOR, EXPERIENCE_VERY_GOOD,
    EXPERIENCE_VERY_POOR, IMPRESSION_HIGH_PRICE, PURCHASE_YES, UNDERSTANDING_LITTLE,
    UNDERSTANDING_MUCH, UNDERSTANDING_NONE, UNDERSTANDING_SOME,
};
use crate::constants::narrative::{PRICE_PERCEPTION_CALLOUT, TOP_CATEGORIES};
use crate::constants::output::ADDITIONAL_REPORT;
use crate::errors::SurveyError;
use crate::metrics::CrossTab;
use crate::narrative::{FAVOURABLE_SHARE, Level, rank, top_categories};
use crate::utils::{markdown_image, percent};

const INTEGRATED_CONCLUSIONS: [(&str, &str); 4] = [
    (
        "Channel-to-Awareness Pipeline",
        "The data reveals how different contact channels contribute to varying levels of brand awareness, highlighting the need for channel-specific strategies.",
    ),
    (
        "Experience-Satisfaction-Loyalty Relationship",
        "The strong correlation between interaction experience and satisfaction underscores the importance of community management in building brand loyalty.",
    ),
    (
        "Understanding-to-Purchase Conversion",
        "The clear relationship between increased brand understanding and purchase behavior demonstrates that educational content serves as a critical conversion driver.",
    ),
    (
        "Brand Perception Alignment",
        "Analysis of brand impressions reveals how effectively social media communication aligns with desired brand positioning and highlights areas for refinement.",
    ),
];

const STRATEGIC_RECOMMENDATIONS: [(&str, &str); 5] = [
    (
        "Integrated Channel Strategy",
        "Develop a coordinated multi-channel approach that leverages the strengths of each platform while maintaining consistent brand messaging.",
    ),
    (
        "Enhanced Community Management",
        "Implement advanced community management protocols to improve interaction experience, which directly impacts overall satisfaction.",
    ),
    (
        "Educational Content Program",
        "Create structured educational content that systematically increases consumer understanding of brand values, product features, and technologies.",
    ),
    (
        "Brand Perception Management",
        "Develop targeted content strategies to reinforce positive brand impressions while addressing potential negative perceptions.",
    ),
    (
        "Conversion Optimization",
        "Leverage the understanding-to-purchase relationship by creating educational content specifically designed to move consumers through the conversion funnel.",
    ),
];

fn write_section_header(out: &mut String, heading: &str, intro: &str, alt: &str, path: &Path) -> fmt::Result {
    writeln!(out, "{heading}")?;
    writeln!(out)?;
    writeln!(out, "{intro}")?;
    writeln!(out)?;
    writeln!(out, "{}", markdown_image(alt, path))?;
    writeln!(out)
}

fn write_bullets(out: &mut String, bullets: [&str; 3]) -> fmt::Result {
    writeln!(out, "**Recommendations:**")?;
    writeln!(out)?;
    for bullet in bullets {
        writeln!(out, "- {bullet}")?;
    }
    writeln!(out)
}

/// Purchase rate among the most and least informed respondents, when both rows exist.
fn understanding_purchase_sentence(tab: &CrossTab) -> Option<String> {
    let most = tab.share(UNDERSTANDING_MUCH, PURCHASE_YES)?;
    let (least_label, least) = [UNDERSTANDING_NONE, UNDERSTANDING_LITTLE]
        .into_iter()
        .find_map(|label| tab.share(label, PURCHASE_YES).map(|share| (label, share)))?;
    let least_group = if least_label == UNDERSTANDING_NONE {
        "no increase"
    } else {
        "little increase"
    };
    Some(format!(
        "Among respondents whose understanding increased significantly, {} purchased because of social media content, compared with {} of those reporting {least_group}.",
        percent(most),
        percent(least)
    ))
}

fn write_cross_dimensional(out: &mut String, tabs: &CrossDimensional, plots_dir: &Path) -> fmt::Result {
    if tabs.is_empty() {
        return Ok(());
    }
    writeln!(out, "## 5. Cross-Dimensional Analysis")?;
    writeln!(out)?;

    if let Some(tab) = &tabs.understanding_purchase {
        write_section_header(
            out,
            "### Understanding-to-Purchase Relationship",
            "The relationship between increased brand understanding and purchase behavior reveals how educational content drives conversion.",
            "Understanding vs Purchase",
            &chart_path(plots_dir, names::UNDERSTANDING_VS_PURCHASE),
        )?;
        writeln!(
            out,
            "This visualization demonstrates how increasing levels of brand understanding correlate with higher purchase rates, emphasizing the importance of educational content in the conversion funnel."
        )?;
        writeln!(out)?;
        if let Some(sentence) = understanding_purchase_sentence(tab) {
            writeln!(out, "{sentence}")?;
            writeln!(out)?;
        }
    }

    if tabs.experience_satisfaction.is_some() {
        write_section_header(
            out,
            "### Interaction Experience vs. Satisfaction",
            "The correlation between interaction experience and overall satisfaction highlights the impact of community management on brand perception.",
            "Experience vs Satisfaction",
            &chart_path(plots_dir, names::EXPERIENCE_VS_SATISFACTION),
        )?;
        writeln!(
            out,
            "The heatmap reveals a strong correlation between positive interaction experiences and higher overall satisfaction, underlining the importance of quality engagement in social media strategy."
        )?;
        writeln!(out)?;
    }
    Ok(())
}

/// Channels, experience, impression, understanding, cross-tabs and suggestions.
pub fn supplementary_report(
    results: &SupplementaryResults,
    tabs: &CrossDimensional,
    plots_dir: &Path,
) -> Result<String, SurveyError> {
    assemble(ADDITIONAL_REPORT, |out| {
        writeln!(out, "# Supplementary Analysis: Arc'teryx Social Media Marketing")?;
        writeln!(out)?;
        writeln!(out, "## Additional Insights Beyond the SICAS Framework")?;
        writeln!(out)?;
        writeln!(
            out,
            "This report extends the original SICAS model analysis with additional dimensions that provide deeper insights into Arc'teryx's social media marketing effectiveness."
        )?;
        writeln!(out)?;

        if let Some(channels) = &results.contact_channels {
            write_section_header(
                out,
                "## 1. Brand Contact Channels",
                "Understanding how consumers first encounter and interact with the Arc'teryx brand provides valuable insights for channel optimization.",
                "Brand Contact Channels",
                &chart_path(plots_dir, names::BRAND_CONTACT_CHANNELS),
            )?;
            writeln!(
                out,
                "The primary channels through which respondents encounter the Arc'teryx brand are {}.",
                top_categories(channels, TOP_CATEGORIES)
            )?;
            writeln!(out)?;
            write_bullets(
                out,
                [
                    "Strengthen presence on the top-performing channels to maximize reach",
                    "Evaluate underperforming channels to determine whether to improve content or reallocate resources",
                    "Develop channel-specific content strategies that leverage the unique features of each platform",
                ],
            )?;
        }

        if let Some(experience) = &results.interaction_experience {
            write_section_header(
                out,
                "## 2. Social Media Interaction Experience",
                "The quality of interaction experience directly impacts user satisfaction and ongoing engagement with the brand.",
                "Interaction Experience",
                &chart_path(plots_dir, names::INTERACTION_EXPERIENCE),
            )?;
            let positive = experience.sum_of(&[EXPERIENCE_VERY_GOOD, EXPERIENCE_FAIRLY_GOOD]);
            let neutral = experience.proportion(EXPERIENCE_NEUTRAL);
            let negative = experience.sum_of(&[EXPERIENCE_POOR, EXPERIENCE_VERY_POOR]);
            let verdict = match rank(positive, &FAVOURABLE_SHARE) {
                Level::High => {
                    "This high level of positive experience suggests effective community management and responsive social media teams."
                }
                Level::Moderate => {
                    "The moderate level of positive experiences indicates room for improvement in interaction quality and responsiveness."
                }
                Level::Low => {
                    "The low level of positive experiences signals a critical need to reassess interaction strategies and community management practices."
                }
            };
            writeln!(
                out,
                "Analysis shows that {} of respondents report a positive interaction experience, while {} describe it as neutral and {} report a negative experience. {verdict}",
                percent(positive),
                percent(neutral),
                percent(negative)
            )?;
            writeln!(out)?;
            write_bullets(
                out,
                [
                    "Implement standardized response protocols to ensure consistent quality of interaction",
                    "Reduce response times to user comments and queries",
                    "Train social media managers on effective community engagement techniques",
                ],
            )?;
        }

        if let Some(impression) = &results.brand_impression {
            write_section_header(
                out,
                "## 3. Brand Impression",
                "Consumer perceptions of the Arc'teryx brand reveal how effectively social media marketing communicates brand values and positioning.",
                "Brand Impression",
                &chart_path(plots_dir, names::BRAND_IMPRESSION),
            )?;
            write!(
                out,
                "The dominant brand impressions among respondents are {}.",
                top_categories(impression, TOP_CATEGORIES)
            )?;
            let price = impression.proportion(IMPRESSION_HIGH_PRICE);
            if price > PRICE_PERCEPTION_CALLOUT {
                write!(
                    out,
                    " The significant price perception ({}) could present a barrier to conversion that needs addressing through value-focused messaging.",
                    percent(price)
                )?;
            }
            writeln!(out)?;
            writeln!(out)?;
            write_bullets(
                out,
                [
                    "Align social media content with desired brand attributes to reinforce brand positioning",
                    "Address potential negative perceptions through targeted content strategies",
                    "Leverage strengths in consumer perception to differentiate from competitors",
                ],
            )?;
        }

        if let Some(understanding) = &results.increased_understanding {
            write_section_header(
                out,
                "## 4. Increased Brand Understanding from Social Media",
                "Effective social media should educate consumers and increase their understanding of the brand's offerings and values.",
                "Increased Understanding",
                &chart_path(plots_dir, names::INCREASED_UNDERSTANDING),
            )?;
            let high = understanding.sum_of(&[UNDERSTANDING_MUCH, UNDERSTANDING_SOME]);
            let low = understanding.sum_of(&[UNDERSTANDING_LITTLE, UNDERSTANDING_NONE]);
            let verdict = match rank(high, &FAVOURABLE_SHARE) {
                Level::High => {
                    "This high educational impact demonstrates effective knowledge transfer through social media content."
                }
                Level::Moderate => {
                    "The moderate educational impact suggests opportunities to enhance informational content in social media strategy."
                }
                Level::Low => {
                    "The low educational impact indicates a critical failure to communicate key brand information through social media channels."
                }
            };
            writeln!(
                out,
                "{} of respondents report that social media has significantly or somewhat increased their understanding of the Arc'teryx brand, while {} indicate little or no increase in understanding. {verdict}",
                percent(high),
                percent(low)
            )?;
            writeln!(out)?;
            write_bullets(
                out,
                [
                    "Develop more educational content that highlights product features, technologies, and brand values",
                    "Create content series specifically designed to increase brand literacy among consumers",
                    "Implement interactive formats like Q&A sessions to address consumer information needs",
                ],
            )?;
        }

        write_cross_dimensional(out, tabs, plots_dir)?;

        if results.suggestions.is_some() {
            writeln!(out, "## 6. User Suggestions")?;
            writeln!(out)?;
            writeln!(
                out,
                "The analysis collected {} unique suggestions from respondents regarding Arc'teryx's social media marketing. Common themes include:",
                results.suggestion_count()
            )?;
            writeln!(out)?;
            for theme in [
                "More product demonstrations and usage scenarios",
                "Enhanced interactivity and community-building features",
                "Value-focused content that justifies premium pricing",
                "Improved mobile experience and accessibility",
            ] {
                writeln!(out, "- {theme}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## Integrated Conclusions")?;
        writeln!(out)?;
        writeln!(
            out,
            "When combined with the SICAS model analysis, these additional dimensions provide a comprehensive view of Arc'teryx's social media marketing effectiveness. Key integrated insights include:"
        )?;
        writeln!(out)?;
        for (idx, (title, body)) in INTEGRATED_CONCLUSIONS.iter().enumerate() {
            writeln!(out, "{}. **{title}**: {body}", idx + 1)?;
            writeln!(out)?;
        }

        writeln!(out, "## Strategic Recommendations")?;
        writeln!(out)?;
        writeln!(
            out,
            "Based on this supplementary analysis, we recommend the following strategic initiatives to enhance Arc'teryx's social media marketing effectiveness:"
        )?;
        writeln!(out)?;
        for (idx, (title, body)) in STRATEGIC_RECOMMENDATIONS.iter().enumerate() {
            writeln!(out, "{}. **{title}**: {body}", idx + 1)?;
            writeln!(out)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_supplementary, cross_dimensional};
    use crate::constants::columns::{BRAND_IMPRESSION, INCREASED_UNDERSTANDING, INTERACTION_EXPERIENCE, PURCHASE};
    use crate::source::SurveyTable;

    fn survey() -> SurveyTable {
        SurveyTable::new(
            vec![
                INTERACTION_EXPERIENCE.to_string(),
                BRAND_IMPRESSION.to_string(),
                INCREASED_UNDERSTANDING.to_string(),
                PURCHASE.to_string(),
            ],
            vec![
                vec!["非常好", "价格较高┋专业", "很多", "是"],
                vec!["比较好", "价格较高", "很多", "否"],
                vec!["一般", "专业", "完全没有", "否"],
                vec!["较差", "价格较高", "一些", "是"],
            ],
        )
    }

    #[test]
    fn sections_follow_available_tables() {
        let table = survey();
        let report = supplementary_report(
            &analyze_supplementary(&table),
            &cross_dimensional(&table),
            Path::new("additional_plots"),
        )
        .unwrap();
        assert!(!report.contains("## 1. Brand Contact Channels"));
        assert!(report.contains("Analysis shows that 50.0% of respondents report a positive interaction experience"));
        assert!(report.contains("The moderate level of positive experiences"));
        assert!(report.contains("The significant price perception (60.0%)"));
        assert!(report.contains("75.0% of respondents report that social media"));
        assert!(report.contains("This high educational impact"));
        assert!(report.contains("![Understanding vs Purchase](additional_plots/understanding_vs_purchase.svg)"));
        assert!(report.contains("50.0% purchased because of social media content, compared with 0.0% of those reporting no increase"));
        assert!(!report.contains("### Interaction Experience vs. Satisfaction"));
        assert!(!report.contains("## 6. User Suggestions"));
        assert!(report.contains("5. **Conversion Optimization**"));
    }

    #[test]
    fn cross_section_is_omitted_without_tabs() {
        let report = supplementary_report(
            &SupplementaryResults::default(),
            &CrossDimensional::default(),
            Path::new("additional_plots"),
        )
        .unwrap();
        assert!(!report.contains("## 5. Cross-Dimensional Analysis"));
        assert!(report.contains("## Integrated Conclusions"));
    }
}
