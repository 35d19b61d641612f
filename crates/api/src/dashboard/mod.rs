//! Server-rendered HTML dashboard.
//!
//! Three tabs (performance analysis, insights Q&A, trends) rendered as
//! plain HTML with inline SVG charts. Only the active tab is rendered;
//! tab navigation is a link to `/?tab=...`.

pub mod charts;
pub mod html;
pub mod page;

pub use page::{render_page, Notice, Tab, TabContent};
