//! 粗略定位模块
//!
//! 为点击记录提供 `"lat,lon"`（两位小数）形式的位置，支持：
//! - 固定坐标
//! - 外部 HTTP API（`external-geo` feature）
//!
//! 定位永远不会返回错误：失败、超时或未配置时结果均为 `None`

#[cfg(feature = "external-geo")]
mod external_api;
mod provider;

#[cfg(feature = "external-geo")]
pub use external_api::ExternalApiLocator;
pub use provider::{Coordinates, FixedLocator, GeoLocator, GeoProvider, NullLocator};
