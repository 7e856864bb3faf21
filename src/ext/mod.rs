mod best_effort_path_ext;
mod expand_tabs_ext;

pub use best_effort_path_ext::BestEffortPathExt;
pub use expand_tabs_ext::ExpandTabsExt;
