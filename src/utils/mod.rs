pub mod company_name;
pub mod http_client;
pub mod url;

pub use company_name::{company_initials, normalize_company_name};
pub use http_client::HttpClientFactory;
pub use url::UrlUtils;
