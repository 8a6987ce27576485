use std::fmt::{self, Write};
use std::path::Path;

use super::assemble;
use crate::analysis::{FunnelResults, Tables};
use crate::charts::{chart_path, names};
use crate::constants::output::FUNNEL_REPORT;
use crate::errors::SurveyError;
use crate::metrics::FrequencyTable;
use crate::utils::{capitalize, frequency_listing, markdown_image};

const RECOMMENDATIONS: [(&str, [&str; 3]); 5] = [
    (
        "Improving Brand Awareness",
        [
            "Consider expanding social media presence on platforms with high user engagement",
            "Develop targeted content that highlights the unique features of Arc'teryx products",
            "Collaborate with outdoor influencers and communities to increase brand visibility",
        ],
    ),
    (
        "Enhancing Content Interest",
        [
            "Create more interactive and engaging content formats",
            "Showcase real customer experiences and testimonials",
            "Develop educational content about outdoor activities and equipment usage",
        ],
    ),
    (
        "Improving User Interaction",
        [
            "Implement more interactive features in social media posts",
            "Respond promptly to user comments and messages",
            "Host live events, Q&A sessions, and contests to encourage participation",
        ],
    ),
    (
        "Driving Purchase Decisions",
        [
            "Address price concerns by highlighting product durability and value",
            "Provide clear information about product features and benefits",
            "Create exclusive social media promotions and discounts",
        ],
    ),
    (
        "Enhancing User Satisfaction and Sharing",
        [
            "Encourage users to share their experiences with Arc'teryx products",
            "Create shareable content formats like challenges and user-generated content campaigns",
            "Reward and recognize users who engage with and share brand content",
        ],
    ),
];

fn write_table_block(out: &mut String, table: &FrequencyTable, chart: &str, plots_dir: &Path) -> fmt::Result {
    writeln!(out, "```")?;
    writeln!(out, "{}", frequency_listing(table))?;
    writeln!(out, "```")?;
    writeln!(out)?;
    writeln!(out, "{}", markdown_image(chart, &chart_path(plots_dir, chart)))?;
    writeln!(out)
}

/// Per-stage frequency listings, demographics, funnel chart and fixed recommendations.
pub fn funnel_report(
    results: &FunnelResults,
    demographics: &Tables,
    plots_dir: &Path,
) -> Result<String, SurveyError> {
    assemble(FUNNEL_REPORT, |out| {
        writeln!(out, "# Arc'teryx (始祖鸟) Social Media Marketing Analysis Report")?;
        writeln!(out)?;
        writeln!(out, "## SICAS Model Analysis")?;
        writeln!(out)?;
        for (dimension, tables) in results.iter() {
            writeln!(out, "### {}", capitalize(dimension.key()))?;
            writeln!(out)?;
            for (key, table) in tables {
                writeln!(out, "#### {}", capitalize(key))?;
                writeln!(out)?;
                write_table_block(out, table, &names::stage(dimension, key), plots_dir)?;
            }
        }

        writeln!(out, "## Demographic Analysis")?;
        writeln!(out)?;
        for (key, table) in demographics {
            writeln!(out, "### {}", capitalize(key))?;
            writeln!(out)?;
            write_table_block(out, table, &names::demographic(key), plots_dir)?;
        }

        writeln!(out, "## SICAS Funnel")?;
        writeln!(out)?;
        writeln!(out, "{}", markdown_image(names::FUNNEL, &chart_path(plots_dir, names::FUNNEL)))?;
        writeln!(out)?;

        writeln!(out, "## Recommendations")?;
        writeln!(out)?;
        for (heading, bullets) in RECOMMENDATIONS {
            writeln!(out, "### {heading}")?;
            writeln!(out)?;
            for bullet in bullets {
                writeln!(out, "- {bullet}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_demographics, analyze_funnel};
    use crate::constants::columns::{AWARENESS, GENDER};
    use crate::source::SurveyTable;

    #[test]
    fn report_links_every_table_chart() {
        let table = SurveyTable::new(
            vec![AWARENESS.to_string(), GENDER.to_string()],
            vec![vec!["非常了解", "男"], vec!["略有了解", "女"]],
        );
        let report = funnel_report(&analyze_funnel(&table), &analyze_demographics(&table), Path::new("plots")).unwrap();
        assert!(report.contains("### Sense"));
        assert!(report.contains("#### Awareness"));
        assert!(report.contains("![sense_awareness](plots/sense_awareness.svg)"));
        assert!(report.contains("![demographic_gender](plots/demographic_gender.svg)"));
        assert!(report.contains("![sicas_funnel](plots/sicas_funnel.svg)"));
        assert!(report.contains("### Driving Purchase Decisions"));
    }
}
