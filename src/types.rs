/// Cleaned survey column (question text without enumeration prefix).
/// Example: `您是否了解始祖鸟（Arc'teryx）品牌？`
pub type ColumnName = String;
/// Raw category label as exported by the survey platform.
/// Examples: `非常了解`, `是`, `经常互动(点赞、评论、分享等)`
pub type CategoryLabel = String;
/// Display label after translation (or the untouched raw label).
/// Examples: `Very Familiar`, `Yes`
pub type DisplayLabel = String;
/// Short item code used in encoded matrices.
/// Examples: `S1`, `I1`, `C1`, `C2`, `A1`, `S2`
pub type ItemCode = &'static str;
/// Key naming one frequency table inside a funnel stage or demographic group.
/// Examples: `awareness`, `interaction_types`, `social_media_usage`
pub type TableKey = &'static str;
/// Narrative text emitted into a report.
/// Example: `**Brand Awareness:** Arc'teryx enjoys high brand recognition, ...`
pub type Sentence = String;
/// Name of a text encoding attempted by the loader.
/// Examples: `UTF-8`, `GBK`, `gb18030`
pub type EncodingName = &'static str;
