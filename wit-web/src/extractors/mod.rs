mod identity;
mod page;

pub use identity::Identity;
pub use page::{Page, DEFAULT_PAGE_LIMIT};
