//! Pointer hover reporting and the tooltip overlay state.

use canopy_core::Point;
use canopy_paint::ShapeMeta;

use crate::format::format_compact;

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
    /// Shape key, stable across renders.
    pub key: String,
    pub label: String,
    pub series: Option<String>,
    pub value: f32,
    pub formatted: String,
    pub position: Point,
}

/// Receives hover changes. Implementations must not reach back into the
/// chart's data or scales.
pub trait HoverCallbacks {
    fn on_hover(&mut self, info: &HoverInfo);
    fn on_hover_end(&mut self);
}

/// Callbacks that ignore everything.
impl HoverCallbacks for () {
    fn on_hover(&mut self, _info: &HoverInfo) {}
    fn on_hover_end(&mut self) {}
}

/// Tooltip overlay state, drawn separately from the chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub position: Point,
    pub info: Option<HoverInfo>,
}

impl TooltipState {
    /// `"Jan · sales: 30"` style text, or `None` while hidden.
    pub fn content(&self) -> Option<String> {
        let info = self.info.as_ref().filter(|_| self.visible)?;
        Some(match &info.series {
            Some(series) if *series != info.label => {
                format!("{} · {}: {}", info.label, series, info.formatted)
            }
            _ => format!("{}: {}", info.label, info.formatted),
        })
    }
}

impl HoverCallbacks for TooltipState {
    fn on_hover(&mut self, info: &HoverInfo) {
        self.visible = true;
        self.position = info.position;
        self.info = Some(info.clone());
    }

    fn on_hover_end(&mut self) {
        self.visible = false;
        self.info = None;
    }
}

pub(crate) fn info_from(key: &str, meta: &ShapeMeta, position: Point) -> HoverInfo {
    HoverInfo {
        key: key.to_string(),
        label: meta.label.clone(),
        series: meta.series.clone(),
        value: meta.value,
        formatted: format_compact(meta.value),
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_follows_callbacks() {
        let mut t = TooltipState::default();
        assert_eq!(t.content(), None);
        t.on_hover(&HoverInfo {
            key: "Jan".into(),
            label: "Jan".into(),
            series: Some("sales".into()),
            value: 1_500.0,
            formatted: "1.5K".into(),
            position: Point::new(3.0, 4.0),
        });
        assert!(t.visible);
        assert_eq!(t.position, Point::new(3.0, 4.0));
        assert_eq!(t.content().as_deref(), Some("Jan · sales: 1.5K"));
        t.on_hover_end();
        assert!(!t.visible);
        assert_eq!(t.content(), None);
    }
}
