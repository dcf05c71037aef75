#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed Vega-Lite specification tree.
//!
//! Only the subset of the grammar the bike-share charts use is modelled:
//! concatenated and layered views, point/circle/bar/geoshape marks, field
//! and value encodings, selection params, and param filter transforms.
//!
//! Builders assemble a [`ChartSpec`] in memory; [`ChartSpec::to_json`] is
//! the single serialization step. Struct fields serialize in declaration
//! order and datasets live in a [`BTreeMap`], so the same tree always
//! produces byte-identical JSON.

use std::collections::BTreeMap;

use serde::Serialize;

/// `$schema` URL of the targeted Vega-Lite version.
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// A complete top-level chart specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Grammar schema URL.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Inline datasets referenced by name from [`Data::Named`].
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub datasets: BTreeMap<String, Vec<serde_json::Value>>,
    /// Top-level view composition.
    #[serde(flatten)]
    pub composition: Composition,
}

impl ChartSpec {
    /// Creates a spec for `composition` with no inline datasets.
    #[must_use]
    pub fn new(composition: Composition) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA.to_string(),
            datasets: BTreeMap::new(),
            composition,
        }
    }

    /// Registers an inline dataset under `name`.
    #[must_use]
    pub fn with_dataset(mut self, name: impl Into<String>, rows: Vec<serde_json::Value>) -> Self {
        self.datasets.insert(name.into(), rows);
        self
    }

    /// Rows of the inline dataset called `name`.
    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&[serde_json::Value]> {
        self.datasets.get(name).map(Vec::as_slice)
    }

    /// Top-level views of the composition.
    #[must_use]
    pub fn views(&self) -> &[View] {
        self.composition.views()
    }

    /// Every view in the tree, depth first, including layers.
    #[must_use]
    pub fn all_views(&self) -> Vec<&View> {
        let mut out = Vec::new();
        for view in self.views() {
            view.collect_into(&mut out);
        }
        out
    }

    /// Serializes the spec to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an inline dataset value cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the spec to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an inline dataset value cannot be serialized.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// How top-level views are arranged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Composition {
    /// Views stacked top to bottom (`a & b`).
    Vconcat(Vec<View>),
    /// Views side by side (`a | b`).
    Hconcat(Vec<View>),
}

impl Composition {
    /// The composed views, in order.
    #[must_use]
    pub fn views(&self) -> &[View] {
        match self {
            Self::Vconcat(views) | Self::Hconcat(views) => views,
        }
    }
}

/// A unit or layered view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer: Vec<View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl View {
    /// A single-mark view.
    #[must_use]
    pub fn unit(mark: Mark) -> Self {
        Self {
            mark: Some(mark),
            ..Self::default()
        }
    }

    /// A view overlaying `layers` on shared axes.
    #[must_use]
    pub fn layered(layers: Vec<Self>) -> Self {
        Self {
            layer: layers,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Declares a selection on this view.
    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Restricts this view's rows to those matching `predicate`.
    #[must_use]
    pub fn with_filter(mut self, predicate: ParamPredicate) -> Self {
        self.transform.push(Transform::Filter(predicate));
        self
    }

    #[must_use]
    pub const fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Names of the selections declared by this view.
    pub fn declared_params(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Names of the selections this view filters its rows by.
    pub fn filter_params(&self) -> impl Iterator<Item = &str> {
        self.transform.iter().map(|t| match t {
            Transform::Filter(predicate) => predicate.param.as_str(),
        })
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Self>) {
        out.push(self);
        for layer in &self.layer {
            layer.collect_into(out);
        }
    }
}

/// Where a view's rows come from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data {
    /// A top-level inline dataset.
    Named { name: String },
    /// A remote file.
    Url { url: String, format: DataFormat },
    /// The globe outline generator.
    Sphere { sphere: bool },
}

impl Data {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// A `TopoJSON` file, extracting the object called `feature`.
    #[must_use]
    pub fn topojson(url: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::Url {
            url: url.into(),
            format: DataFormat {
                kind: FormatType::Topojson,
                feature: feature.into(),
            },
        }
    }

    #[must_use]
    pub const fn sphere() -> Self {
        Self::Sphere { sphere: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFormat {
    #[serde(rename = "type")]
    pub kind: FormatType,
    pub feature: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    Topojson,
}

/// Mark type and static mark properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Mark {
    #[must_use]
    pub const fn new(kind: MarkType) -> Self {
        Self {
            kind,
            size: None,
            opacity: None,
            fill: None,
            stroke: None,
            stroke_width: None,
        }
    }

    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets fill, stroke colour and stroke width (used by geoshapes).
    #[must_use]
    pub fn with_outline(mut self, fill: &str, stroke: &str, stroke_width: f64) -> Self {
        self.fill = Some(fill.to_string());
        self.stroke = Some(stroke.to_string());
        self.stroke_width = Some(stroke_width);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Point,
    Circle,
    Bar,
    Geoshape,
}

/// Visual channels of a view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldDef>,
}

/// What drives a single channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Field(FieldDef),
    Value(ValueDef),
    Condition(ConditionalDef),
}

impl From<FieldDef> for Channel {
    fn from(def: FieldDef) -> Self {
        Self::Field(def)
    }
}

impl Channel {
    /// A constant value, typically a colour name.
    #[must_use]
    pub fn value(value: &str) -> Self {
        Self::Value(ValueDef {
            value: value.to_string(),
        })
    }

    /// `then` while `predicate` holds, otherwise the constant `otherwise`.
    #[must_use]
    pub fn when(predicate: ParamPredicate, then: ConditionTarget, otherwise: &str) -> Self {
        Self::Condition(ConditionalDef {
            condition: Condition {
                predicate,
                target: then,
            },
            value: otherwise.to_string(),
        })
    }
}

/// A data-driven channel definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    /// `Some(None)` hides the legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Option<Legend>>,
}

impl FieldDef {
    #[must_use]
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: Some(field.to_string()),
            kind,
            aggregate: None,
            bin: None,
            title: None,
            scale: None,
            sort: None,
            axis: None,
            legend: None,
        }
    }

    #[must_use]
    pub fn quantitative(field: &str) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    #[must_use]
    pub fn nominal(field: &str) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    /// `sum(field)`.
    #[must_use]
    pub fn sum(field: &str) -> Self {
        Self {
            aggregate: Some(Aggregate::Sum),
            ..Self::quantitative(field)
        }
    }

    /// `count()` over the rows of each group.
    #[must_use]
    pub fn count() -> Self {
        Self {
            field: None,
            aggregate: Some(Aggregate::Count),
            ..Self::quantitative("")
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub const fn with_domain(mut self, min: f64, max: f64) -> Self {
        let scale = match self.scale {
            Some(scale) => scale,
            None => Scale::EMPTY,
        };
        self.scale = Some(Scale {
            domain: Some([min, max]),
            ..scale
        });
        self
    }

    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        let scale = match self.scale {
            Some(scale) => scale,
            None => Scale::EMPTY,
        };
        self.scale = Some(Scale {
            range: Some([min, max]),
            ..scale
        });
        self
    }

    #[must_use]
    pub const fn with_maxbins(mut self, maxbins: u32) -> Self {
        self.bin = Some(Bin { maxbins });
        self
    }

    /// Orders categories by `op(field)`.
    #[must_use]
    pub fn sorted_by(mut self, op: Aggregate, field: &str, order: SortOrder) -> Self {
        self.sort = Some(SortField {
            field: field.to_string(),
            op,
            order,
        });
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_legend_title(mut self, title: &str) -> Self {
        self.legend = Some(Some(Legend {
            title: title.to_string(),
        }));
        self
    }

    #[must_use]
    pub fn without_legend(mut self) -> Self {
        self.legend = Some(None);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Sum,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bin {
    pub maxbins: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl Scale {
    const EMPTY: Self = Self {
        domain: None,
        range: None,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    pub field: String,
    pub op: Aggregate,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<AxisOrient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub title: String,
}

/// A constant channel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDef {
    pub value: String,
}

/// `{"condition": {...}, "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalDef {
    pub condition: Condition,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    #[serde(flatten)]
    pub predicate: ParamPredicate,
    #[serde(flatten)]
    pub target: ConditionTarget,
}

/// What a condition yields while its predicate holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionTarget {
    Field(FieldDef),
    Value(ValueDef),
}

impl ConditionTarget {
    #[must_use]
    pub fn value(value: &str) -> Self {
        Self::Value(ValueDef {
            value: value.to_string(),
        })
    }
}

/// A reference to a selection, as used by filters and conditions.
///
/// `empty` decides what the predicate evaluates to while nothing is
/// selected. It is always serialized so the policy never depends on the
/// runtime's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamPredicate {
    pub param: String,
    pub empty: bool,
}

impl ParamPredicate {
    /// Predicate under which an empty selection lets every row through.
    #[must_use]
    pub fn all_when_empty(param: &str) -> Self {
        Self {
            param: param.to_string(),
            empty: true,
        }
    }
}

/// A named interactive selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub select: Selection,
}

impl Param {
    /// A brush over the given encoding channels.
    #[must_use]
    pub fn interval(name: &str, encodings: &[SelectChannel]) -> Self {
        Self {
            name: name.to_string(),
            select: Selection {
                kind: SelectionType::Interval,
                encodings: encodings.to_vec(),
                fields: Vec::new(),
            },
        }
    }

    /// A click selection keyed by data fields.
    #[must_use]
    pub fn point(name: &str, fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            select: Selection {
                kind: SelectionType::Point,
                encodings: Vec::new(),
                fields: fields.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: SelectionType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub encodings: Vec<SelectChannel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Interval,
    Point,
}

/// Encoding channels a selection can be projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectChannel {
    X,
    Y,
    Longitude,
    Latitude,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Filter(ParamPredicate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: ProjectionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionType {
    NaturalEarth1,
    Mercator,
    EqualEarth,
}
