pub mod daily;
pub mod http;
pub mod util;

pub use daily::DailySource;
pub use http::HttpFeedClient;
