//! Column-name cleanup for survey exports.

use crate::constants::loader::{FULLWIDTH_COLON, QUESTION_PREFIX_SEPARATOR};

/// Strip the enumeration prefix (`1、`) and one trailing full-width colon.
///
/// Pure and idempotent on names that carry neither; it does not check that
/// the result is unique or non-empty.
pub fn clean_column_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_prefix = match trimmed.split_once(QUESTION_PREFIX_SEPARATOR) {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    without_prefix
        .strip_suffix(FULLWIDTH_COLON)
        .unwrap_or(without_prefix)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_enumeration_prefix_and_colon() {
        assert_eq!(clean_column_name("12、您的性别："), "您的性别");
        assert_eq!(clean_column_name("您的性别："), "您的性别");
        assert_eq!(clean_column_name("3、您的年龄"), "您的年龄");
    }

    #[test]
    fn only_the_first_separator_is_consumed() {
        assert_eq!(
            clean_column_name("7、经常互动(点赞、评论)"),
            "经常互动(点赞、评论)"
        );
    }

    #[test]
    fn cleaning_is_a_no_op_on_clean_names() {
        for name in ["您的性别", "satisfaction", "始祖鸟的社交媒体内容对您的吸引力如何?"] {
            let once = clean_column_name(name);
            assert_eq!(once, name);
            assert_eq!(clean_column_name(&once), once);
        }
    }
}
