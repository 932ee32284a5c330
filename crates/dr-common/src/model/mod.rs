//! Report document model.
//!
//! Documents are serialized in camelCase JSON. Rendering hints owned by the
//! external plotting engine (series styling, layout, config) are kept as
//! opaque JSON and passed through untouched.

pub mod chart;
pub mod document;
pub mod series;
pub mod table;

pub use chart::{ChartKind, ChartOptions, ChartSpec, DEFAULT_CHART_HEIGHT};
pub use document::{export_filename, ReportDocument, Section, Theme};
pub use series::{GeoSeries, LabeledSeries, Series, SeriesKind, XySeries};
pub use table::{ColumnType, Row, TableColumn, TableSpec, DEFAULT_PAGE_SIZE};
