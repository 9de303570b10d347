//! 外部定位 API 实现
//!
//! 请求一个按调用方出口 IP 返回经纬度的 HTTP 接口（如 ip-api.com），
//! 结果只用于粗略定位

use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{Coordinates, GeoLocator};

/// 外部 API Locator
pub struct ExternalApiLocator {
    api_url: String,
    agent: Agent,
}

impl ExternalApiLocator {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            api_url: api_url.to_string(),
            agent,
        }
    }

    /// 从响应 JSON 中提取坐标
    ///
    /// ip-api.com 返回格式: {"status": "success", "lat": 52.52, "lon": 13.40}
    /// 失败时返回: {"status": "fail", ...}
    /// 也接受 `latitude` / `longitude` 字段名
    fn parse_response(json: &serde_json::Value) -> Option<Coordinates> {
        if json["status"].as_str() == Some("fail") {
            trace!("External API returned fail status");
            return None;
        }

        let lat = json["lat"].as_f64().or_else(|| json["latitude"].as_f64())?;
        let lon = json["lon"].as_f64().or_else(|| json["longitude"].as_f64())?;
        Coordinates::new(lat, lon)
    }

    /// 同步请求，在 spawn_blocking 中调用
    fn fetch_sync(agent: Agent, url: String) -> Option<Coordinates> {
        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("Geo API request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: serde_json::Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("Geo API response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        Self::parse_response(&json)
    }
}

#[async_trait]
impl GeoLocator for ExternalApiLocator {
    async fn locate(&self) -> Option<Coordinates> {
        let agent = self.agent.clone();
        let url = self.api_url.clone();

        tokio::task::spawn_blocking(move || Self::fetch_sync(agent, url))
            .await
            .unwrap_or_else(|e| {
                warn!("Geo spawn_blocking failed: {}", e);
                None
            })
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ip_api_format() {
        let c = ExternalApiLocator::parse_response(&json!({
            "status": "success", "lat": 52.5196, "lon": 13.4069
        }))
        .unwrap();
        assert_eq!(c.coarse(), "52.52,13.41");
    }

    #[test]
    fn test_parse_alternate_field_names() {
        let c = ExternalApiLocator::parse_response(&json!({
            "latitude": -1.2921, "longitude": 36.8219
        }))
        .unwrap();
        assert_eq!(c.coarse(), "-1.29,36.82");
    }

    #[test]
    fn test_parse_fail_status() {
        assert!(
            ExternalApiLocator::parse_response(&json!({
                "status": "fail", "message": "private range"
            }))
            .is_none()
        );
        assert!(ExternalApiLocator::parse_response(&json!({ "lat": 10.0 })).is_none());
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[tokio::test]
    #[ignore]
    async fn test_external_api_lookup() {
        let locator = ExternalApiLocator::new(
            "http://ip-api.com/json/?fields=status,lat,lon",
            Duration::from_secs(5),
        );
        assert!(locator.locate().await.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_host_resolves_to_none() {
        // TEST-NET-1, 不可路由
        let locator =
            ExternalApiLocator::new("http://192.0.2.1/geo", Duration::from_millis(200));
        assert!(locator.locate().await.is_none());
    }
}
