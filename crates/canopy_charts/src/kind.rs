use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The chart kinds sharing one renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Bar,
    Line,
    Donut,
    Stream,
    Treemap,
    StackedBar,
}

impl ChartKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Donut => "donut",
            Self::Stream => "stream",
            Self::Treemap => "treemap",
            Self::StackedBar => "stacked-bar",
        }
    }

    pub fn all() -> &'static [ChartKind] {
        const KINDS: [ChartKind; 6] = [
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Donut,
            ChartKind::Stream,
            ChartKind::Treemap,
            ChartKind::StackedBar,
        ];
        &KINDS
    }

    /// Accepts ids with `-` or `_` separators in any case.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase().replace('_', "-");
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Kinds drawing one shape per series rather than per category.
    pub fn is_multi_series(self) -> bool {
        matches!(self, Self::Line | Self::Stream | Self::StackedBar)
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_loosely() {
        assert_eq!(ChartKind::from_id("stacked_bar"), Some(ChartKind::StackedBar));
        assert_eq!(ChartKind::from_id("Donut"), Some(ChartKind::Donut));
        assert_eq!(ChartKind::from_id("pie"), None);
        for k in ChartKind::all() {
            assert_eq!(ChartKind::from_id(k.id()), Some(*k));
        }
    }
}
