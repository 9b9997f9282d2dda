pub mod json;
pub mod limit;

pub use json::JsonBody;
pub use limit::LimitQuery;
