//! Bounded-depth relationship graph discovery, force-directed layout and
//! renderer-agnostic scene building.
//!
//! The entry point is [`render_graph`]: it validates a `(seed, depth)` request,
//! crawls the graph through a [`NeighborSource`], lays it out and returns a
//! [`Scene`]. Invalid requests produce [`Scene::empty`] instead of an error.

pub mod error;
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod request;
pub mod scene;
pub mod source;
pub mod visual;

mod util;

pub use error::{RequestError, SourceError};
pub use graph::{
    BoundedCrawler, CrawlConfig, CrawlOutcome, CrawlReport, Edge, FetchFailure, GraphStore,
};
pub use layout::{LayoutConfig, Point, PositionMap, spring_layout};
pub use pipeline::{RenderOptions, RenderOutcome, render_graph, render_input, render_request};
pub use request::{CrawlRequest, Depth};
pub use scene::{Bounds, HoverMode, Margins, Scene, SceneBuilder, SceneLayout, SceneStyle};
pub use source::{AdjacencyFile, CommandSource, NeighborSource};
pub use visual::{ColorBar, EdgeSegment, LineStyle, NodeMarker, Rgb};
