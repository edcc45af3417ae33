//! Helper functions shared by the loader, the markdown renderer and the page templates

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
