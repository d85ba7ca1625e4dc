//! Page text and surface attributes that follow the selected dataset.

use tv_core::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct PageChrome {
    pub title: &'static str,
    pub description: &'static str,
    /// Class on the map surface.
    pub surface_class: &'static str,
    pub legend_height: f64,
}

impl From<&Dataset> for PageChrome {
    fn from(ds: &Dataset) -> Self {
        Self {
            title: ds.title,
            description: ds.description,
            surface_class: ds.surface_class,
            legend_height: ds.legend_height,
        }
    }
}
