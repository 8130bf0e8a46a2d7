use crate::model::Restaurant;
use crate::project::{Criteria, project};
use crate::sync::{FallbackPolicy, Loaded};

/// State owned by the Cheap Eats view: the remote-loaded restaurant list plus
/// live search/filter criteria. Restaurant load failures render as an empty
/// list by explicit policy; no fallback substitution here.
pub struct EatsView {
    pub list: Loaded<Restaurant>,
    pub criteria: Criteria,
}

impl EatsView {
    pub fn new() -> Self {
        Self {
            list: Loaded::new("restaurants", FallbackPolicy::Never),
            criteria: Criteria::default(),
        }
    }

    /// The rendered sequence; re-derived on every call, never cached.
    pub fn visible(&self) -> Vec<Restaurant> {
        project(self.list.items(), &self.criteria)
    }
}

impl Default for EatsView {
    fn default() -> Self {
        Self::new()
    }
}
