//! Redirect resolution
//!
//! Looks a shortcode up, checks expiry, records the visit and tells the
//! caller where to go. The caller performs the navigation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::services::geo::GeoProvider;
use crate::storage::{ClickOutcome, LinkStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Redirect { target: String, click: ClickOutcome },
    NotFound,
    Expired { expiry_at: DateTime<Utc> },
}

pub struct RedirectService {
    store: Arc<LinkStore>,
    geo: GeoProvider,
}

impl RedirectService {
    pub fn new(store: Arc<LinkStore>, geo: GeoProvider) -> Self {
        Self { store, geo }
    }

    /// Resolves `shortcode`, recording a click only when it redirects.
    ///
    /// The location lookup finishes before the click is appended, and the
    /// click is stored together with its location in one write.
    pub async fn resolve(&self, shortcode: &str, referrer: Option<&str>) -> RedirectOutcome {
        if shortcode.is_empty() {
            warn!("No shortcode provided");
            return RedirectOutcome::NotFound;
        }

        info!(shortcode = %shortcode, "Processing redirect request");

        let Some(link) = self.store.lookup(shortcode) else {
            warn!(shortcode = %shortcode, "Shortcode not found");
            return RedirectOutcome::NotFound;
        };

        if link.is_expired_at(self.store.now()) {
            warn!(
                shortcode = %shortcode,
                expiry_at = %link.expiry_at,
                "Shortcode expired"
            );
            return RedirectOutcome::Expired {
                expiry_at: link.expiry_at,
            };
        }

        let geo = self.geo.coarse_location().await;
        let click = self.store.append_click_with_geo(shortcode, referrer, geo);

        info!(
            shortcode = %shortcode,
            long_url = %link.long_url,
            "Redirecting to long URL"
        );

        RedirectOutcome::Redirect {
            target: link.long_url,
            click,
        }
    }
}
