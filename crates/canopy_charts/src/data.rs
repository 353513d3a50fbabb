//! Chart data model.
//!
//! Records are validated once when they enter the crate. After that a
//! [`DataPoint`] is a typed category key plus a series-to-value map and the
//! renderer never looks anything up by loose field name again.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

use crate::error::DataError;

/// Field names accepted as the category key, in priority order.
pub const KEY_FIELDS: [&str; 4] = ["label", "name", "category", "date"];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Label(String),
    Date(NaiveDate),
}

impl CategoryKey {
    /// Stable identity used to key shapes across renders.
    pub fn id(&self) -> String {
        match self {
            CategoryKey::Label(l) => l.clone(),
            CategoryKey::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CategoryKey::Date(d) => Some(*d),
            CategoryKey::Label(_) => None,
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKey::Label(l) => f.write_str(l),
            CategoryKey::Date(d) => write!(f, "{}", d.format("%b %d")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    key: CategoryKey,
    values: IndexMap<String, f32>,
}

impl DataPoint {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            key: CategoryKey::Label(label.into()),
            values: IndexMap::new(),
        }
    }

    pub fn dated(date: NaiveDate) -> Self {
        Self {
            key: CategoryKey::Date(date),
            values: IndexMap::new(),
        }
    }

    pub fn with(mut self, series: impl Into<String>, value: f32) -> Self {
        self.values.insert(series.into(), value);
        self
    }

    pub fn key(&self) -> &CategoryKey {
        &self.key
    }

    pub fn id(&self) -> String {
        self.key.id()
    }

    pub fn value(&self, series: &str) -> Option<f32> {
        self.values.get(series).copied()
    }

    /// Absent series read as zero.
    pub fn value_or_zero(&self, series: &str) -> f32 {
        self.value(series).unwrap_or(0.0)
    }

    pub fn values(&self) -> &IndexMap<String, f32> {
        &self.values
    }
}

/// An ordered, validated sequence of points. Point order is axis order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
    series: Vec<String>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Result<Self, DataError> {
        let mut seen = FxHashSet::default();
        let mut series: Vec<String> = Vec::new();
        for (index, p) in points.iter().enumerate() {
            if !seen.insert(p.id()) {
                return Err(DataError::DuplicateKey(p.id()));
            }
            for (name, v) in &p.values {
                if !v.is_finite() {
                    return Err(DataError::NonFinite {
                        index,
                        series: name.clone(),
                    });
                }
                if !series.contains(name) {
                    series.push(name.clone());
                }
            }
        }
        Ok(Self { points, series })
    }

    /// Parse an array of flat records such as
    /// `[{"label": "Jan", "value": 30}, ...]`.
    ///
    /// The first of [`KEY_FIELDS`] present is the category key; `date`
    /// keys must be `YYYY-MM-DD`. Every other numeric field is a series.
    /// Non-numeric extra fields are ignored.
    pub fn from_json(value: &Value) -> Result<Self, DataError> {
        let records = value.as_array().ok_or(DataError::NotAnArray)?;
        let points = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let obj = record
                    .as_object()
                    .ok_or(DataError::NotAnObject { index })?;
                parse_record(index, obj)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(points)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Series names in first-seen order.
    pub fn series_keys(&self) -> &[String] {
        &self.series
    }

    pub fn ids(&self) -> Vec<String> {
        self.points.iter().map(DataPoint::id).collect()
    }

    /// True when every key is a date.
    pub fn is_temporal(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.key.date().is_some())
    }

    /// Largest value over `series`, never below zero. Empty data gives 0.
    pub fn max_value(&self, series: &[String]) -> f32 {
        self.points
            .iter()
            .flat_map(|p| series.iter().filter_map(|s| p.value(s)))
            .fold(0.0, f32::max)
    }

    /// Largest per-point sum of the positive values of `series`.
    pub fn max_total(&self, series: &[String]) -> f32 {
        self.points
            .iter()
            .map(|p| {
                series
                    .iter()
                    .map(|s| p.value_or_zero(s).max(0.0))
                    .sum::<f32>()
            })
            .fold(0.0, f32::max)
    }
}

fn parse_record(index: usize, obj: &Map<String, Value>) -> Result<DataPoint, DataError> {
    let (field, raw) = KEY_FIELDS
        .iter()
        .find_map(|f| obj.get(*f).map(|v| (*f, v)))
        .ok_or(DataError::MissingKey { index })?;

    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(DataError::MissingKey { index }),
    };
    let key = if field == "date" {
        // Accept full timestamps by keeping the calendar date.
        let day = text.get(..10).unwrap_or(&text);
        NaiveDate::parse_from_str(day, DATE_FORMAT)
            .map(CategoryKey::Date)
            .map_err(|_| DataError::InvalidDate {
                index,
                value: text.clone(),
            })?
    } else {
        CategoryKey::Label(text)
    };

    let mut values = IndexMap::new();
    for (name, v) in obj {
        if name == field {
            continue;
        }
        let Value::Number(n) = v else {
            continue;
        };
        let v = n.as_f64().map(|v| v as f32).unwrap_or(f32::NAN);
        if !v.is_finite() {
            return Err(DataError::NonFinite {
                index,
                series: name.clone(),
            });
        }
        values.insert(name.clone(), v);
    }
    Ok(DataPoint { key, values })
}

/// Hierarchical data for treemaps.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub value: f32,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    pub fn node(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf value, or the sum of the children's weights.
    pub fn weight(&self) -> f32 {
        if self.is_leaf() {
            self.value.max(0.0)
        } else {
            self.children.iter().map(TreeNode::weight).sum()
        }
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }

    /// Parse `{"name": .., "children": [..]}` / `{"name": .., "value": ..}`.
    pub fn from_json(value: &Value) -> Result<Self, DataError> {
        let obj = value.as_object().ok_or(DataError::MissingName)?;
        let name = ["name", "label"]
            .iter()
            .find_map(|f| obj.get(*f).and_then(Value::as_str))
            .ok_or(DataError::MissingName)?
            .to_string();

        if let Some(children) = obj.get("children").and_then(Value::as_array) {
            let children = children
                .iter()
                .map(TreeNode::from_json)
                .collect::<Result<Vec<_>, _>>()?;
            let mut seen = FxHashSet::default();
            for child in &children {
                if !seen.insert(child.name.as_str()) {
                    return Err(DataError::DuplicateChild {
                        parent: name,
                        name: child.name.clone(),
                    });
                }
            }
            return Ok(Self::node(name, children));
        }
        match obj.get("value").and_then(Value::as_f64) {
            Some(v) if v.is_finite() => Ok(Self::leaf(name, v as f32)),
            _ => Err(DataError::EmptyNode(name)),
        }
    }

    /// One leaf per point, valued by `series`.
    pub fn from_dataset(name: impl Into<String>, data: &Dataset, series: &str) -> Self {
        Self::node(
            name,
            data.points()
                .iter()
                .map(|p| Self::leaf(p.id(), p.value_or_zero(series)))
                .collect(),
        )
    }
}

/// Data handed to a chart. Shared by `Arc` so unchanged data is recognised
/// by identity between renders.
#[derive(Clone, Debug)]
pub enum ChartData {
    Table(Arc<Dataset>),
    Tree(Arc<TreeNode>),
}

impl ChartData {
    pub fn table(&self) -> Option<&Dataset> {
        match self {
            ChartData::Table(d) => Some(d),
            ChartData::Tree(_) => None,
        }
    }

    /// Pointer identity of the shared data.
    pub fn identity(&self) -> usize {
        match self {
            ChartData::Table(d) => Arc::as_ptr(d) as *const () as usize,
            ChartData::Tree(t) => Arc::as_ptr(t) as *const () as usize,
        }
    }
}

impl Default for ChartData {
    fn default() -> Self {
        ChartData::Table(Arc::new(Dataset::default()))
    }
}

impl From<Dataset> for ChartData {
    fn from(d: Dataset) -> Self {
        ChartData::Table(Arc::new(d))
    }
}

impl From<TreeNode> for ChartData {
    fn from(t: TreeNode) -> Self {
        ChartData::Tree(Arc::new(t))
    }
}
