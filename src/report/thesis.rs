use std::fmt::{self, Write};
use std::path::Path;

use super::assemble;
use crate::analysis::{FunnelRates, FunnelResults};
use crate::charts::{chart_path, names};
use crate::constants::answers::BARRIER_HIGH_PRICE;
use crate::constants::narrative::PRICE_BARRIER_CALLOUT;
use crate::constants::output::THESIS_REPORT;
use crate::dimension::Dimension;
use crate::errors::SurveyError;
use crate::narrative::{CONVERSION, FAVOURABLE_SHARE, Level, PARTICIPATION, rank};
use crate::types::Sentence;
use crate::utils::markdown_image;

/// Where the thesis figures live, relative to the report.
#[derive(Clone, Copy, Debug)]
pub struct FigureDirs<'a> {
    /// Charts rendered by the thesis pipeline.
    pub thesis: &'a Path,
    /// Charts rendered by the funnel analysis.
    pub funnel: &'a Path,
}

struct Figure {
    heading: &'static str,
    alt: &'static str,
    caption: &'static str,
}

fn write_figure(out: &mut String, number: usize, figure: &Figure, path: &Path) -> fmt::Result {
    writeln!(out, "{}", figure.heading)?;
    writeln!(out)?;
    writeln!(out, "{}", markdown_image(figure.alt, path))?;
    writeln!(out)?;
    writeln!(out, "*Figure {number}: {}*", figure.caption)?;
    writeln!(out)
}

fn write_gallery(out: &mut String, dirs: FigureDirs<'_>) -> fmt::Result {
    let in_thesis = |name: &str| chart_path(dirs.thesis, name);
    let figures = [
        (
            None,
            Figure {
                heading: "### SICAS Model Overview",
                alt: "SICAS Radar Overview",
                caption: "Radar chart visualizing performance across all SICAS dimensions, showing the relative strengths and weaknesses in Arc'teryx's social media marketing funnel.",
            },
            in_thesis(names::RADAR_OVERVIEW),
        ),
        (
            None,
            Figure {
                heading: "### Component Correlations",
                alt: "SICAS Correlation Heatmap",
                caption: "Correlation heatmap showing relationships between different SICAS components, revealing how each stage influences subsequent stages in the marketing funnel.",
            },
            in_thesis(names::CORRELATION_HEATMAP),
        ),
        (
            Some("### Demographic Analysis"),
            Figure {
                heading: "#### Gender Distribution",
                alt: "Gender Distribution",
                caption: "Gender distribution of survey respondents.",
            },
            in_thesis(&names::pie(None, "gender")),
        ),
        (
            None,
            Figure {
                heading: "#### Age Distribution",
                alt: "Age Distribution",
                caption: "Age distribution of survey respondents.",
            },
            in_thesis(&names::pie(None, "age")),
        ),
        (
            Some("### Cross-Demographic Analysis"),
            Figure {
                heading: "#### Gender vs. Brand Awareness",
                alt: "Gender vs Brand Awareness",
                caption: "Brand awareness levels across different gender groups, showing variation in brand recognition between demographics.",
            },
            in_thesis(names::GENDER_AWARENESS),
        ),
        (
            None,
            Figure {
                heading: "#### Age vs. Purchase Behavior",
                alt: "Age vs Purchase",
                caption: "Purchase conversion rates across age groups, highlighting which demographics are most likely to convert from social media engagement to product purchase.",
            },
            in_thesis(names::AGE_PURCHASE),
        ),
        (
            Some("## SICAS Component Analysis"),
            Figure {
                heading: "### Sense (Brand Awareness)",
                alt: "Brand Awareness",
                caption: "Distribution of brand awareness levels among respondents.",
            },
            in_thesis(&names::pie(Some(Dimension::Sense), "awareness")),
        ),
        (
            None,
            Figure {
                heading: "### Interest (Content Attraction)",
                alt: "Content Attraction",
                caption: "Respondents' ratings of how attractive they find Arc'teryx's social media content.",
            },
            chart_path(dirs.funnel, &names::stage(Dimension::Interest, "attraction")),
        ),
        (
            None,
            Figure {
                heading: "### Action (Purchase Conversion)",
                alt: "Purchase Conversion",
                caption: "Proportion of respondents who have made purchases based on Arc'teryx's social media content.",
            },
            in_thesis(&names::pie(Some(Dimension::Action), "purchase")),
        ),
        (
            None,
            Figure {
                heading: "### Share (User Satisfaction)",
                alt: "User Satisfaction",
                caption: "Overall satisfaction levels with Arc'teryx's social media presence.",
            },
            in_thesis(&names::pie(Some(Dimension::Share), "satisfaction")),
        ),
    ];

    writeln!(out, "## Visualization Gallery")?;
    writeln!(out)?;
    for (idx, (section, figure, path)) in figures.iter().enumerate() {
        if let Some(section) = section {
            writeln!(out, "{section}")?;
            writeln!(out)?;
        }
        write_figure(out, idx + 1, figure, path)?;
    }
    Ok(())
}

/// Strategic recommendations selected by the funnel rates, in display order.
pub fn strategic_recommendations(results: &FunnelResults, rates: &FunnelRates) -> Vec<&'static str> {
    let mut picked = Vec::new();
    if let Some(awareness) = rates.awareness {
        picked.push(match rank(awareness, &FAVOURABLE_SHARE) {
            Level::High => {
                "**Leverage Strong Brand Recognition**: Capitalize on high brand awareness by focusing on differentiation messaging that reinforces Arc'teryx's unique value proposition compared to competitors."
            }
            Level::Moderate | Level::Low => {
                "**Enhance Brand Visibility**: Implement targeted advertising campaigns and collaborative partnerships with outdoor influencers to increase brand recognition, particularly among the identified demographic segments with lower awareness."
            }
        });
    }
    if let Some(interest) = rates.interest {
        picked.push(match rank(interest, &FAVOURABLE_SHARE) {
            Level::High => {
                "**Refine Content Excellence**: Continue to enhance the already effective content strategy by introducing more innovative formats while maintaining the successful elements that are attracting audience interest."
            }
            Level::Moderate | Level::Low => {
                "**Content Strategy Revision**: Develop more engaging content formats based on audience preferences, emphasizing authentic storytelling, user-generated content, and educational material about outdoor activities."
            }
        });
    }
    if let Some(reach) = rates.communication {
        picked.push(match rank(reach, &PARTICIPATION) {
            Level::High | Level::Moderate => {
                "**Nurture Community Interaction**: Build upon the existing engagement by developing a structured community management strategy that rewards participation and creates opportunities for deeper brand relationships."
            }
            Level::Low => {
                "**Boost Audience Engagement**: Create more interactive content formats such as polls, contests, Q&A sessions, and interactive stories to encourage active participation rather than passive consumption."
            }
        });
    }
    if let Some(action) = rates.action {
        picked.push(match rank(action, &CONVERSION) {
            Level::High => {
                "**Enhance Purchase Experience**: Streamline the already successful conversion process and implement loyalty-building initiatives to encourage repeat purchases and maximize lifetime customer value."
            }
            Level::Moderate | Level::Low => {
                "**Optimize Conversion Pathways**: Address the significant gap between engagement and purchase by simplifying the buying journey, implementing strategic calls-to-action, and developing social commerce capabilities."
            }
        });
    }
    let price_barrier = results
        .table(Dimension::Action, "barriers")
        .map_or(0.0, |barriers| barriers.proportion(BARRIER_HIGH_PRICE));
    if price_barrier > PRICE_BARRIER_CALLOUT {
        picked.push(
            "**Address Price Perception**: Develop targeted content that emphasizes product value, durability, and long-term benefits to justify the premium pricing and overcome the significant price barrier identified in the research.",
        );
    }
    picked.push(
        "**Demographic-Specific Strategies**: Develop tailored content approaches for different demographic segments based on the cross-analysis findings, with particular attention to age groups showing the highest potential for conversion improvement.",
    );
    picked
}

/// Thesis-ready report: key findings, figure gallery, notes, recommendations.
pub fn thesis_report(
    results: &FunnelResults,
    rates: &FunnelRates,
    conclusions: &[Sentence],
    dirs: FigureDirs<'_>,
) -> Result<String, SurveyError> {
    assemble(THESIS_REPORT, |out| {
        writeln!(out, "# Arc'teryx Social Media Marketing Effectiveness Analysis")?;
        writeln!(out)?;
        writeln!(out, "## Using the SICAS Model Framework")?;
        writeln!(out)?;
        writeln!(out, "## Executive Summary")?;
        writeln!(out)?;
        writeln!(
            out,
            "This analysis examines Arc'teryx's social media marketing effectiveness through the SICAS (Sense-Interest-Communication-Action-Share) framework, based on survey data from consumers. The findings reveal insights into brand awareness, content engagement, interaction patterns, purchase conversion, and overall satisfaction with the brand's social media presence."
        )?;
        writeln!(out)?;

        writeln!(out, "## Key Findings")?;
        writeln!(out)?;
        for conclusion in conclusions {
            writeln!(out, "- {conclusion}")?;
            writeln!(out)?;
        }

        write_gallery(out, dirs)?;

        writeln!(out, "## Methodological Notes")?;
        writeln!(out)?;
        writeln!(
            out,
            "This analysis employs the SICAS model to evaluate social media marketing effectiveness through five key dimensions: Sense (awareness), Interest (attraction), Communication (interaction), Action (purchase), and Share (satisfaction). Data was collected through a comprehensive consumer survey with responses from various demographic groups."
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "The analysis utilizes multiple visualization techniques to reveal patterns and insights, including pie charts, radar charts, heatmaps, and grouped bar charts. Statistical correlations between SICAS components were calculated to identify relationships between different stages of the consumer journey."
        )?;
        writeln!(out)?;

        writeln!(out, "## Strategic Recommendations")?;
        writeln!(out)?;
        writeln!(
            out,
            "Based on the comprehensive analysis of Arc'teryx's social media marketing effectiveness, the following strategic recommendations are proposed:"
        )?;
        writeln!(out)?;
        for (idx, recommendation) in strategic_recommendations(results, rates).iter().enumerate() {
            writeln!(out, "{}. {recommendation}", idx + 1)?;
            writeln!(out)?;
        }

        writeln!(out, "## Conclusion")?;
        writeln!(out)?;
        writeln!(
            out,
            "The SICAS model analysis provides a structured framework for evaluating and enhancing Arc'teryx's social media marketing effectiveness. By addressing the identified gaps in the consumer journey and building on existing strengths, the brand can optimize its social media strategy to better achieve marketing objectives and drive business results."
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "This research demonstrates the value of a systematic approach to social media marketing analysis and provides actionable insights that can inform strategic decision-making. Future research could expand on these findings with longitudinal studies to track changes in effectiveness over time and competitive benchmarking to contextualize performance within the outdoor apparel industry."
        )?;
        writeln!(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs() -> FigureDirs<'static> {
        FigureDirs {
            thesis: Path::new("thesis_plots"),
            funnel: Path::new("plots"),
        }
    }

    #[test]
    fn recommendations_follow_ladders_and_number_sequentially() {
        let rates = FunnelRates {
            awareness: Some(0.8),
            interest: Some(0.2),
            communication: None,
            action: Some(0.05),
            share: Some(0.5),
        };
        let picked = strategic_recommendations(&FunnelResults::default(), &rates);
        assert_eq!(picked.len(), 4);
        assert!(picked[0].starts_with("**Leverage Strong Brand Recognition**"));
        assert!(picked[1].starts_with("**Content Strategy Revision**"));
        assert!(picked[2].starts_with("**Optimize Conversion Pathways**"));
        assert!(picked[3].starts_with("**Demographic-Specific Strategies**"));

        let report = thesis_report(&FunnelResults::default(), &rates, &[], dirs()).unwrap();
        assert!(report.contains("3. **Optimize Conversion Pathways**"));
        assert!(report.contains("4. **Demographic-Specific Strategies**"));
    }

    #[test]
    fn gallery_numbers_ten_figures_and_links_funnel_attraction_chart() {
        let report = thesis_report(
            &FunnelResults::default(),
            &FunnelRates::default(),
            &["**Brand Awareness:** test".to_string()],
            dirs(),
        )
        .unwrap();
        assert!(report.contains("- **Brand Awareness:** test"));
        assert!(report.contains("![SICAS Radar Overview](thesis_plots/radar_sicas_overview.svg)"));
        assert!(report.contains("![Content Attraction](plots/interest_attraction.svg)"));
        assert!(report.contains("*Figure 10: Overall satisfaction levels"));
        assert!(report.contains("1. **Demographic-Specific Strategies**"));
    }
}
