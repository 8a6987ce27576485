//! The five SICAS funnel stages and the survey items that measure them.

use serde::Serialize;

use crate::constants::columns;
use crate::types::ItemCode;

/// One stage of the SICAS funnel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dimension {
    /// Brand awareness.
    Sense,
    /// Interest in social media content.
    Interest,
    /// Interaction with the brand's accounts.
    Communication,
    /// Purchase behaviour.
    Action,
    /// Satisfaction and sharing.
    Share,
}

/// A single ordinal survey item.
#[derive(Clone, Copy, Debug)]
pub struct Item {
    /// Short code such as `S1`.
    pub code: ItemCode,
    /// Cleaned column name holding the answers.
    pub column: &'static str,
    /// Ordinal encoding of each recognized answer.
    pub scale: &'static [(&'static str, f64)],
}

impl Item {
    /// Numeric code of `answer`, `None` when unmapped.
    pub fn encode(&self, answer: &str) -> Option<f64> {
        self.scale
            .iter()
            .find(|(label, _)| *label == answer)
            .map(|(_, value)| *value)
    }
}

const AWARENESS_SCALE: &[(&str, f64)] = &[
    ("非常了解", 4.0),
    ("略有了解", 3.0),
    ("不太了解", 2.0),
    ("完全不了解", 1.0),
];

const ATTRACTION_SCALE: &[(&str, f64)] = &[
    ("非常吸引", 5.0),
    ("比较吸引", 4.0),
    ("一般", 3.0),
    ("不太吸引", 2.0),
    ("完全不吸引", 1.0),
];

const INTERACTION_SCALE: &[(&str, f64)] = &[
    ("经常互动(点赞、评论、分享等)", 4.0),
    ("偶尔互动", 3.0),
    ("很少互动", 2.0),
    ("从未互动", 1.0),
];

const EXPERIENCE_SCALE: &[(&str, f64)] = &[
    ("非常好", 5.0),
    ("比较好", 4.0),
    ("一般", 3.0),
    ("较差", 2.0),
    ("非常差", 1.0),
];

const PURCHASE_SCALE: &[(&str, f64)] = &[("是", 1.0), ("否", 0.0)];

const SATISFACTION_SCALE: &[(&str, f64)] = &[
    ("非常满意", 5.0),
    ("比较满意", 4.0),
    ("一般", 3.0),
    ("不太满意", 2.0),
    ("非常不满意", 1.0),
    ("很不满意", 1.0),
];

const SENSE_ITEMS: &[Item] = &[Item {
    code: "S1",
    column: columns::AWARENESS,
    scale: AWARENESS_SCALE,
}];

const INTEREST_ITEMS: &[Item] = &[Item {
    code: "I1",
    column: columns::ATTRACTION,
    scale: ATTRACTION_SCALE,
}];

const COMMUNICATION_ITEMS: &[Item] = &[
    Item {
        code: "C1",
        column: columns::INTERACTION,
        scale: INTERACTION_SCALE,
    },
    Item {
        code: "C2",
        column: columns::INTERACTION_EXPERIENCE,
        scale: EXPERIENCE_SCALE,
    },
];

const ACTION_ITEMS: &[Item] = &[Item {
    code: "A1",
    column: columns::PURCHASE,
    scale: PURCHASE_SCALE,
}];

const SHARE_ITEMS: &[Item] = &[Item {
    code: "S2",
    column: columns::SATISFACTION,
    scale: SATISFACTION_SCALE,
}];

impl Dimension {
    /// Funnel order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Sense,
        Dimension::Interest,
        Dimension::Communication,
        Dimension::Action,
        Dimension::Share,
    ];

    /// Name used in reports and chart axes.
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Sense => "Sense",
            Dimension::Interest => "Interest",
            Dimension::Communication => "Communication",
            Dimension::Action => "Action",
            Dimension::Share => "Share",
        }
    }

    /// Lower-case key used in result maps and file names.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Sense => "sense",
            Dimension::Interest => "interest",
            Dimension::Communication => "communication",
            Dimension::Action => "action",
            Dimension::Share => "share",
        }
    }

    /// What the stage measures, for report headings.
    pub fn description(self) -> &'static str {
        match self {
            Dimension::Sense => "Brand Awareness",
            Dimension::Interest => "Content Attraction",
            Dimension::Communication => "Interaction",
            Dimension::Action => "Purchase Behavior",
            Dimension::Share => "Satisfaction",
        }
    }

    /// Declared items, whether or not their columns exist in a given table.
    pub fn items(self) -> &'static [Item] {
        match self {
            Dimension::Sense => SENSE_ITEMS,
            Dimension::Interest => INTEREST_ITEMS,
            Dimension::Communication => COMMUNICATION_ITEMS,
            Dimension::Action => ACTION_ITEMS,
            Dimension::Share => SHARE_ITEMS,
        }
    }
}

/// Every declared item in funnel order.
pub fn all_items() -> impl Iterator<Item = &'static Item> {
    Dimension::ALL.into_iter().flat_map(|dimension| dimension.items())
}
