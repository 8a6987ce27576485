use crate::source::loader::SourceEncoding;

/// Constants used by the CSV loader and column cleaner.
pub mod loader {
    use super::SourceEncoding;

    /// Encodings attempted in order before the lossy fallback.
    pub const ENCODING_ORDER: [SourceEncoding; 6] = [
        SourceEncoding::Utf8,
        SourceEncoding::Gbk,
        SourceEncoding::Gb18030,
        SourceEncoding::Utf16,
        SourceEncoding::Cp936,
        SourceEncoding::Latin1,
    ];
    /// Default input file, resolved against the working directory.
    pub const DEFAULT_INPUT_FILE: &str = "data.csv";
    /// Separator between a question number and its text (for example `1、您的性别`).
    pub const QUESTION_PREFIX_SEPARATOR: char = '、';
    /// Full-width colon some exporters append to question text.
    pub const FULLWIDTH_COLON: char = '：';
    /// Delimiter joining the chosen options of a multi-select answer.
    pub const MULTI_SELECT_DELIMITER: char = '┋';
    /// Marker written by the survey platform for skipped questions.
    pub const SKIPPED_MARKER: &str = "(跳过)";
    /// Marker written by the survey platform for blank free-text answers.
    pub const EMPTY_MARKER: &str = "(空)";
}

/// Cleaned column names of the survey questions the pipelines read.
pub mod columns {
    /// Sense: brand awareness.
    pub const AWARENESS: &str = "您是否了解始祖鸟（Arc'teryx）品牌？";
    /// Interest: attractiveness of social media content.
    pub const ATTRACTION: &str = "始祖鸟的社交媒体内容对您的吸引力如何?";
    /// Communication: interaction frequency.
    pub const INTERACTION: &str = "您是否曾与始祖鸟的社交媒体账号互动?";
    /// Communication: preferred interaction types (multi-select).
    pub const INTERACTION_TYPES: &str = "您更倾向于哪种互动方式？（可多选）";
    /// Communication: interaction experience.
    pub const INTERACTION_EXPERIENCE: &str = "您认为始祖鸟社交媒体互动的体验如何？";
    /// Action: purchase driven by social media.
    pub const PURCHASE: &str = "您是否因社交媒体内容购买过始祖鸟产品？";
    /// Action: purchase channels (multi-select).
    pub const PURCHASE_CHANNELS: &str = "您最常通过以下哪种途径购买？（可多选）";
    /// Action: purchase barriers (multi-select).
    pub const PURCHASE_BARRIERS: &str = "阻碍您购买的原因是什么？（可多选）";
    /// Share: overall satisfaction.
    pub const SATISFACTION: &str = "您对始祖鸟社交媒体的整体满意度如何？";
    /// Share: content improvements wanted (multi-select).
    pub const IMPROVEMENTS: &str = "您认为始祖鸟社交媒体内容有哪些需要改进的地方？（可多选）";
    /// Demographics: gender.
    pub const GENDER: &str = "您的性别";
    /// Demographics: age bracket.
    pub const AGE: &str = "您的年龄";
    /// Demographics: occupation.
    pub const OCCUPATION: &str = "您的职业";
    /// Demographics: monthly income.
    pub const INCOME: &str = "您的月收入（人民币）";
    /// Demographics: daily social media usage.
    pub const SOCIAL_MEDIA_USAGE: &str = "您每天使用社交媒体的时长大约是多少？";
    /// Supplementary: channels through which respondents met the brand (multi-select).
    pub const CONTACT_CHANNELS: &str = "您通过以下哪些渠道接触过始祖鸟品牌?";
    /// Supplementary: brand impression (multi-select).
    pub const BRAND_IMPRESSION: &str = "您对始祖鸟品牌的印象如何？（可多选）";
    /// Supplementary: whether social media increased brand understanding.
    pub const INCREASED_UNDERSTANDING: &str = "始祖鸟社交媒体是否增加了您对品牌的了解？";
    /// Supplementary: free-text marketing suggestions.
    pub const SUGGESTIONS: &str = "您对始祖鸟社交媒体营销有哪些建议或想法？请简要描述。";
}

/// Raw answer labels referenced by funnel rates and narrative rules.
pub mod answers {
    /// Awareness: very familiar.
    pub const AWARE_VERY: &str = "非常了解";
    /// Awareness: somewhat familiar.
    pub const AWARE_SOMEWHAT: &str = "略有了解";
    /// Attraction: very attractive.
    pub const ATTRACT_VERY: &str = "非常吸引";
    /// Attraction: fairly attractive.
    pub const ATTRACT_FAIRLY: &str = "比较吸引";
    /// Interaction: frequent.
    pub const INTERACT_FREQUENT: &str = "经常互动(点赞、评论、分享等)";
    /// Interaction: occasional.
    pub const INTERACT_OCCASIONAL: &str = "偶尔互动";
    /// Interaction: rare.
    pub const INTERACT_RARE: &str = "很少互动";
    /// Purchase: yes.
    pub const PURCHASE_YES: &str = "是";
    /// Satisfaction: very satisfied.
    pub const SATISFIED_VERY: &str = "非常满意";
    /// Satisfaction: fairly satisfied.
    pub const SATISFIED_FAIRLY: &str = "比较满意";
    /// Experience: very good.
    pub const EXPERIENCE_VERY_GOOD: &str = "非常好";
    /// Experience: fairly good.
    pub const EXPERIENCE_FAIRLY_GOOD: &str = "比较好";
    /// Experience: neutral.
    pub const EXPERIENCE_NEUTRAL: &str = "一般";
    /// Experience: poor.
    pub const EXPERIENCE_POOR: &str = "较差";
    /// Experience: very poor.
    pub const EXPERIENCE_VERY_POOR: &str = "非常差";
    /// Understanding increased a lot.
    pub const UNDERSTANDING_MUCH: &str = "很多";
    /// Understanding increased somewhat.
    pub const UNDERSTANDING_SOME: &str = "一些";
    /// Understanding increased a little.
    pub const UNDERSTANDING_LITTLE: &str = "较少";
    /// Understanding did not increase.
    pub const UNDERSTANDING_NONE: &str = "完全没有";
    /// Impression: high price.
    pub const IMPRESSION_HIGH_PRICE: &str = "价格较高";
    /// Barrier: price too high.
    pub const BARRIER_HIGH_PRICE: &str = "价格过高";
}

/// Constants used by the statistical validator and mirrored in report text.
pub mod validation {
    /// Minimum item count for Cronbach's alpha.
    pub const MIN_RELIABILITY_ITEMS: usize = 2;
    /// Minimum complete-case respondents for Cronbach's alpha.
    pub const MIN_RELIABILITY_RESPONDENTS: usize = 2;
    /// Minimum item count for factor analysis.
    pub const MIN_FACTOR_ITEMS: usize = 3;
    /// Minimum complete-case respondents for factor analysis.
    pub const MIN_FACTOR_RESPONDENTS: usize = 10;
    /// Sampling adequacy (KMO) required before factor extraction.
    pub const KMO_THRESHOLD: f64 = 0.5;
    /// Significance level for Bartlett's sphericity test.
    pub const BARTLETT_SIGNIFICANCE: f64 = 0.05;
    /// Upper bound on extracted factors.
    pub const MAX_FACTORS: usize = 5;
    /// Cumulative explained variance target for PCA.
    pub const PCA_VARIANCE_TARGET: f64 = 0.8;
    /// Loading magnitude treated as salient when checking theory alignment.
    pub const SALIENT_LOADING: f64 = 0.4;
    /// Pairwise dimension correlation treated as theory-confirming.
    pub const THEORY_CORRELATION: f64 = 0.3;
    /// Overall alpha treated as adequate reliability.
    pub const ADEQUATE_ALPHA: f64 = 0.7;
    /// Mean inter-dimension correlation treated as adequate validity.
    pub const ADEQUATE_MEAN_CORRELATION: f64 = 0.2;
    /// Iteration cap for principal-axis communality refinement.
    pub const FACTOR_MAX_ITERATIONS: usize = 100;
    /// Convergence tolerance for communality refinement.
    pub const FACTOR_TOLERANCE: f64 = 1e-6;
    /// Iteration cap for varimax rotation.
    pub const VARIMAX_MAX_ITERATIONS: usize = 500;
    /// Convergence tolerance for varimax rotation.
    pub const VARIMAX_TOLERANCE: f64 = 1e-8;
    /// Sweep cap for the Jacobi eigen solver.
    pub const JACOBI_MAX_SWEEPS: usize = 100;
}

/// Constants used by narrative rules that are not part of a ranked ladder.
pub mod narrative {
    /// Funnel stage-to-stage drop treated as significant.
    pub const SIGNIFICANT_DROP_OFF: f64 = 0.2;
    /// Share of "high price" impressions worth calling out.
    pub const PRICE_PERCEPTION_CALLOUT: f64 = 0.3;
    /// Share of "price too high" barriers worth a recommendation.
    pub const PRICE_BARRIER_CALLOUT: f64 = 0.3;
    /// Number of top categories listed in narrative summaries.
    pub const TOP_CATEGORIES: usize = 3;
}

/// Output directories and report file names.
pub mod output {
    /// Chart directory for the funnel analysis.
    pub const FUNNEL_PLOTS_DIR: &str = "plots";
    /// Chart directory for the statistical validation.
    pub const VALIDATION_PLOTS_DIR: &str = "validation_plots";
    /// Chart directory for the thesis report.
    pub const THESIS_PLOTS_DIR: &str = "thesis_plots";
    /// Chart directory for the supplementary analysis.
    pub const ADDITIONAL_PLOTS_DIR: &str = "additional_plots";
    /// Report written by the funnel analysis.
    pub const FUNNEL_REPORT: &str = "sicas_analysis_report.md";
    /// Report written by the statistical validation.
    pub const VALIDATION_REPORT: &str = "statistical_validation_report.md";
    /// Report written by the thesis pipeline.
    pub const THESIS_REPORT: &str = "thesis_report.md";
    /// Report written by the supplementary analysis.
    pub const ADDITIONAL_REPORT: &str = "additional_analysis_report.md";
    /// File extension of rendered charts.
    pub const CHART_EXTENSION: &str = "svg";
}

/// Fixed chart styling.
pub mod charts {
    /// Brand palette shared by the thesis and supplementary charts.
    pub const PALETTE: [(u8, u8, u8); 8] = [
        (0x2E, 0x6E, 0x91),
        (0x5C, 0xA2, 0xC3),
        (0x9C, 0xCF, 0xE8),
        (0xF0, 0xC5, 0x3F),
        (0xE5, 0x87, 0x23),
        (0xE6, 0x39, 0x46),
        (0x8D, 0x99, 0xAE),
        (0x57, 0xA7, 0x73),
    ];
    /// Per-stage colors of the funnel chart.
    pub const FUNNEL_PALETTE: [(u8, u8, u8); 5] = [
        (0xF9, 0xD5, 0xE5),
        (0xEE, 0xAC, 0x99),
        (0xE0, 0x63, 0x77),
        (0xC8, 0x33, 0x49),
        (0x5B, 0x9A, 0xA0),
    ];
    /// Bar color of funnel-stage frequency charts.
    pub const STAGE_BAR: (u8, u8, u8) = (0x87, 0xCE, 0xEB);
    /// Bar color of demographic frequency charts.
    pub const DEMOGRAPHIC_BAR: (u8, u8, u8) = (0x90, 0xEE, 0x90);
    /// Standard bar chart size in pixels.
    pub const BAR_SIZE: (u32, u32) = (1000, 600);
    /// Wide chart size used for horizontal bars and cross-tabs.
    pub const WIDE_SIZE: (u32, u32) = (1200, 800);
    /// Pie chart size.
    pub const PIE_SIZE: (u32, u32) = (1000, 800);
    /// Radar chart size.
    pub const RADAR_SIZE: (u32, u32) = (1000, 1000);
    /// Heatmap size.
    pub const HEATMAP_SIZE: (u32, u32) = (1200, 1000);
    /// Pie charts with more slices than this fold the tail into "Others".
    pub const MAX_PIE_SLICES: usize = 7;
    /// Slices kept when folding a pie chart.
    pub const PIE_KEPT_SLICES: usize = 6;
    /// Font family used for every label.
    pub const FONT_FAMILY: &str = "sans-serif";
}

/// Constants used when syncing outputs to a version-control remote.
pub mod sync {
    /// Commit message used by the statistical validation pipeline.
    pub const VALIDATION_COMMIT_MESSAGE: &str = "Added statistical validation of the SICAS model";
    /// Commit message used by the supplementary analysis pipeline.
    pub const ADDITIONAL_COMMIT_MESSAGE: &str = "Added extended analysis of additional columns";
}
