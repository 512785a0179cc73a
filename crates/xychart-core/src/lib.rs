// File: crates/xychart-core/src/lib.rs
// Summary: Core library entry point; exports the scatter/bubble chart pipeline (resolve -> facets -> render -> hit-test).

pub mod error;
pub mod frame;
pub mod mapping;
pub mod theme;
pub mod color;
pub mod display;
pub mod dims;
pub mod series;
pub mod resolve;
pub mod facet;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod axis;
pub mod quadtree;
pub mod bubbles;
pub mod interaction;
pub mod chart;

pub use chart::{prep_data, prep_scatter, RenderOptions, ScatterChart, ScatterPanel};
pub use error::ConfigError;
pub use frame::{Field, FieldType, Frame, Value};
pub use mapping::{AutoDims, DimensionMapping, PointColorConfig, PointSizeConfig, SeriesSpec, XyChartOptions};
pub use series::{DimensionValues, ScatterSeries, VisibilityMode};
pub use resolve::resolve;
pub use facet::{build_faceted_data, FacetSeries, FacetedData};
pub use quadtree::{HitRect, Quadtree};
pub use bubbles::{BubbleRenderer, DrawStats, RenderContext, SeriesPaint};
pub use interaction::{ChartHost, HoverEvent, InteractionController};
pub use theme::Theme;
