// 令牌缓存模块
// 包含缓存数据结构和刷新逻辑

pub mod models;
pub mod operations;

pub use models::token::{CachedToken, TOKEN_EXPIRY_MARGIN_SECS};
pub use operations::token::{Clock, ClientCredentials, TokenCache};
