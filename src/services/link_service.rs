//! Link creation service
//!
//! Validates user input, picks a shortcode (custom or generated), computes
//! the expiry and hands the record to the [`LinkStore`]. The store itself
//! never validates, so this is the gate invalid data must not get past.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::LinksConfig;
use crate::errors::{PocketlinkError, Result};
use crate::services::code_generator::{CodeGenerator, RandomCodeGenerator};
use crate::services::validation::{Field, ValidationErrors};
use crate::storage::models::{MAX_STORABLE_YEAR, expiry_after};
use crate::storage::{LinkStore, ShortLink, WriteOutcome};
use crate::utils::url_validator::{validate_url, validation_error_message};
use crate::utils::{is_valid_short_code, parse_validity_minutes, short_url};

// ============ Request/Response DTOs ============

/// Request to create a new link, as typed by the user
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Target URL
    pub long_url: String,
    /// Validity in minutes (blank or absent = configured default)
    pub validity_minutes: Option<String>,
    /// Custom shortcode (blank or absent = generated)
    pub custom_code: Option<String>,
}

impl CreateLinkRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Self::default()
        }
    }

    pub fn validity(mut self, minutes: impl Into<String>) -> Self {
        self.validity_minutes = Some(minutes.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: ShortLink,
    pub short_url: String,
    /// Whether the code was auto-generated
    pub generated_code: bool,
    pub validity_minutes: u32,
    /// A dropped write is not an error; the link simply will not survive.
    pub write: WriteOutcome,
}

struct ValidatedRequest {
    long_url: String,
    validity_minutes: u32,
    custom_code: Option<String>,
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    settings: LinksConfig,
}

impl LinkService {
    pub fn new(store: Arc<LinkStore>, settings: LinksConfig) -> Self {
        let generator = Arc::new(RandomCodeGenerator);
        Self::with_generator(store, generator, settings)
    }

    pub fn with_generator(
        store: Arc<LinkStore>,
        generator: Arc<dyn CodeGenerator>,
        settings: LinksConfig,
    ) -> Self {
        Self {
            store,
            generator,
            settings,
        }
    }

    pub fn short_url(&self, code: &str) -> String {
        short_url(&self.settings.base_url, code)
    }

    fn validate(
        &self,
        req: &CreateLinkRequest,
    ) -> std::result::Result<ValidatedRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_url(&req.long_url) {
            errors.add(Field::LongUrl, validation_error_message(&e));
        }

        let validity_minutes = match req.validity_minutes.as_deref().map(parse_validity_minutes) {
            Some(Ok(Some(minutes))) => minutes,
            Some(Ok(None)) | None => self.settings.default_validity_minutes,
            Some(Err(message)) => {
                errors.add(Field::ValidityMinutes, message);
                self.settings.default_validity_minutes
            }
        };
        if expiry_after(self.store.now(), validity_minutes).is_none() {
            errors.add(
                Field::ValidityMinutes,
                format!("Expiry must fall before the year {}", MAX_STORABLE_YEAR + 1),
            );
        }

        let custom_code = req.custom_code.as_deref().filter(|c| !c.is_empty());
        if let Some(code) = custom_code {
            if !is_valid_short_code(code) {
                errors.add(Field::CustomShortcode, "Must be 4-12 alphanumeric characters");
            } else if !self.store.is_available(code) {
                errors.add(Field::CustomShortcode, "Shortcode already exists");
            }
        }

        errors.into_result()?;
        Ok(ValidatedRequest {
            long_url: req.long_url.clone(),
            validity_minutes,
            custom_code: custom_code.map(str::to_string),
        })
    }

    /// Draws codes until one is free, giving up after
    /// `max_generation_attempts` collisions.
    pub fn generate_available_code(&self) -> Result<String> {
        let attempts = self.settings.max_generation_attempts.max(1);
        for attempt in 1..=attempts {
            let code = self.generator.generate();
            if self.store.is_available(&code) {
                return Ok(code);
            }
            warn!("LinkService: generated code '{}' is taken (attempt {})", code, attempt);
        }

        Err(PocketlinkError::code_space_exhausted(format!(
            "No free shortcode found after {} attempts",
            attempts
        )))
    }

    /// Create a new short link
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<CreatedLink> {
        let validated = self.validate(&req).inspect_err(|errors| {
            warn!("LinkService: validation failed: {}", errors);
        })?;

        let (code, generated_code) = match validated.custom_code {
            Some(code) => (code, false),
            None => (self.generate_available_code()?, true),
        };

        let link = ShortLink::new(
            code,
            validated.long_url,
            self.store.now(),
            validated.validity_minutes,
        )?;

        let write = self.store.create(link.clone());

        info!(
            "LinkService: shortened '{}' -> '{}' ({} min)",
            link.shortcode, link.long_url, validated.validity_minutes
        );

        Ok(CreatedLink {
            short_url: self.short_url(&link.shortcode),
            link,
            generated_code,
            validity_minutes: validated.validity_minutes,
            write,
        })
    }

    /// Shortens up to `max_batch_size` URLs, each independently and in order.
    ///
    /// A failing request does not stop the ones after it.
    pub async fn create_links(
        &self,
        requests: Vec<CreateLinkRequest>,
    ) -> Result<Vec<Result<CreatedLink>>> {
        if requests.len() > self.settings.max_batch_size {
            return Err(PocketlinkError::batch_too_large(format!(
                "At most {} URLs can be shortened at once, got {}",
                self.settings.max_batch_size,
                requests.len()
            )));
        }

        info!("LinkService: shortening batch of {}", requests.len());

        let mut results = Vec::with_capacity(requests.len());
        for req in requests {
            results.push(self.create_link(req).await);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use crate::utils::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    fn service() -> LinkService {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let store = Arc::new(LinkStore::with_clock(
            Arc::new(MemoryBackend::new()),
            "links",
            clock,
        ));
        LinkService::new(store, LinksConfig::default())
    }

    #[tokio::test]
    async fn test_blank_validity_uses_default() {
        let svc = service();
        let created = svc
            .create_link(CreateLinkRequest::new("https://example.com").validity(""))
            .await
            .unwrap();
        assert_eq!(created.validity_minutes, 30);
        assert!(created.generated_code);
        assert_eq!(created.link.shortcode.len(), 8);
    }

    #[tokio::test]
    async fn test_invalid_validity_is_rejected_not_coerced() {
        let svc = service();
        let err = svc
            .create_link(CreateLinkRequest::new("https://example.com").validity("abc"))
            .await
            .unwrap_err();
        match err {
            PocketlinkError::InvalidFields(errors) => {
                assert_eq!(
                    errors.get(Field::ValidityMinutes),
                    Some("Must be a positive integer")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_field_errors_reported_together() {
        let svc = service();
        let err = svc
            .create_link(CreateLinkRequest::new("").validity("0").code("a!"))
            .await
            .unwrap_err();
        let PocketlinkError::InvalidFields(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::LongUrl), Some("URL is required"));
    }

    #[test]
    fn test_short_url_joins_base() {
        let svc = service();
        assert_eq!(svc.short_url("abcd"), "http://localhost:3000/abcd");
    }
}
