use serde::Serialize;

use crate::types::{Cell, PlayerId, RenderStyle};

/// One Plotly scatter trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
    pub mode: RenderStyle,
    pub x: Vec<Cell>,
    pub y: Vec<Cell>,
    /// Hover labels, aligned with x/y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    /// Player id behind each point, echoed back in selection events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<PlayerId>>,
}

impl Series {
    pub fn scatter(name: impl Into<String>, mode: RenderStyle) -> Self {
        Self {
            trace_type: "scatter",
            name: name.into(),
            mode,
            x: Vec::new(),
            y: Vec::new(),
            text: None,
            customdata: None,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub hovermode: &'static str,
}

/// A complete chart document: `{"data": [...], "layout": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Series>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Series>, x_title: impl Into<String>, y_title: impl Into<String>) -> Self {
        Self {
            data,
            layout: Layout {
                xaxis: Axis { title: x_title.into() },
                yaxis: Axis { title: y_title.into() },
                hovermode: "closest",
            },
        }
    }
}
