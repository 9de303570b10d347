//! GeoLocator 抽象层
//!
//! 根据配置选择实现：
//! 1. none → NullLocator
//! 2. fixed → FixedLocator（缺少坐标时退化为 NullLocator）
//! 3. external → ExternalApiLocator（未编译该 feature 时退化为 NullLocator）

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{GeoConfig, GeoProviderKind};

/// 经纬度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// 超出范围或非有限值时返回 `None`
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    /// `"lat,lon"`，各保留两位小数
    pub fn coarse(&self) -> String {
        format!("{:.2},{:.2}", self.latitude, self.longitude)
    }
}

/// 定位 trait
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Option<Coordinates>;

    /// 获取 locator 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 不提供位置
pub struct NullLocator;

#[async_trait]
impl GeoLocator for NullLocator {
    async fn locate(&self) -> Option<Coordinates> {
        None
    }

    fn name(&self) -> &'static str {
        "None"
    }
}

/// 总是返回同一坐标
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl GeoLocator for FixedLocator {
    async fn locate(&self) -> Option<Coordinates> {
        Some(self.coordinates)
    }

    fn name(&self) -> &'static str {
        "Fixed"
    }
}

/// 统一定位入口，负责超时控制
#[derive(Clone)]
pub struct GeoProvider {
    inner: Arc<dyn GeoLocator>,
    timeout: Duration,
}

impl GeoProvider {
    /// 根据 GeoConfig 初始化
    pub fn new(config: &GeoConfig) -> Self {
        let inner: Arc<dyn GeoLocator> = match config.provider {
            GeoProviderKind::None => Arc::new(NullLocator),
            GeoProviderKind::Fixed => {
                match config
                    .latitude
                    .zip(config.longitude)
                    .and_then(|(lat, lon)| Coordinates::new(lat, lon))
                {
                    Some(coordinates) => Arc::new(FixedLocator::new(coordinates)),
                    None => {
                        warn!("Geo: fixed provider needs valid latitude and longitude, disabling");
                        Arc::new(NullLocator)
                    }
                }
            }
            GeoProviderKind::External => Self::external(config),
        };

        info!("Geo: initialized with {} locator", inner.name());
        Self::with_locator(inner, Duration::from_secs(config.timeout_secs))
    }

    #[cfg(feature = "external-geo")]
    fn external(config: &GeoConfig) -> Arc<dyn GeoLocator> {
        Arc::new(super::ExternalApiLocator::new(
            &config.api_url,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    #[cfg(not(feature = "external-geo"))]
    fn external(_config: &GeoConfig) -> Arc<dyn GeoLocator> {
        warn!("Geo: built without the external-geo feature, disabling");
        Arc::new(NullLocator)
    }

    pub fn with_locator(inner: Arc<dyn GeoLocator>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn disabled() -> Self {
        Self::with_locator(Arc::new(NullLocator), Duration::ZERO)
    }

    /// 查询粗略位置，超时视为不可用
    pub async fn coarse_location(&self) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.inner.locate()).await {
            Ok(coordinates) => coordinates.map(|c| c.coarse()),
            Err(_) => {
                debug!(
                    "Geo: {} locator timed out after {:?}",
                    self.inner.name(),
                    self.timeout
                );
                None
            }
        }
    }

    /// 获取当前使用的 locator 名称
    pub fn locator_name(&self) -> &'static str {
        self.inner.name()
    }
}
