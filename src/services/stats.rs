//! Per-link statistics

use std::sync::Arc;

use chrono::{DateTime, Utc};
use strum::AsRefStr;

use crate::storage::{ClickRecord, LinkStore, ShortLink};
use crate::utils::short_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum LinkStatus {
    Active,
    Expired,
}

#[derive(Debug, Clone)]
pub struct LinkStats {
    pub shortcode: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_at: DateTime<Utc>,
    pub status: LinkStatus,
    pub click_count: usize,
    /// Newest first.
    pub clicks: Vec<ClickRecord>,
}

impl LinkStats {
    pub fn from_link(link: ShortLink, base_url: &str, now: DateTime<Utc>) -> Self {
        let status = if link.is_expired_at(now) {
            LinkStatus::Expired
        } else {
            LinkStatus::Active
        };

        let mut clicks = link.clicks;
        // 稳定排序：同一时刻的点击保持插入的逆序
        clicks.reverse();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Self {
            short_url: short_url(base_url, &link.shortcode),
            shortcode: link.shortcode,
            long_url: link.long_url,
            created_at: link.created_at,
            expiry_at: link.expiry_at,
            status,
            click_count: clicks.len(),
            clicks,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_links: usize,
    pub active_links: usize,
    pub expired_links: usize,
    pub total_clicks: usize,
}

impl StatsSummary {
    pub fn from_stats(stats: &[LinkStats]) -> Self {
        stats.iter().fold(Self::default(), |mut acc, s| {
            acc.total_links += 1;
            acc.total_clicks += s.click_count;
            match s.status {
                LinkStatus::Active => acc.active_links += 1,
                LinkStatus::Expired => acc.expired_links += 1,
            }
            acc
        })
    }
}

pub struct StatsService {
    store: Arc<LinkStore>,
    base_url: String,
}

impl StatsService {
    pub fn new(store: Arc<LinkStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
        }
    }

    /// Every link, most recently created first. Status is evaluated now.
    pub fn link_stats(&self) -> Vec<LinkStats> {
        let now = self.store.now();
        let mut stats: Vec<LinkStats> = self
            .store
            .list_all()
            .into_iter()
            .map(|link| LinkStats::from_link(link, &self.base_url, now))
            .collect();
        stats.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.shortcode.cmp(&b.shortcode))
        });
        stats
    }

    pub fn link_stats_for(&self, shortcode: &str) -> Option<LinkStats> {
        self.store
            .lookup(shortcode)
            .map(|link| LinkStats::from_link(link, &self.base_url, self.store.now()))
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from_stats(&self.link_stats())
    }
}
