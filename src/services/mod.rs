pub mod code_generator;
pub mod geo;
pub mod link_service;
pub mod redirect;
pub mod stats;
pub mod validation;

pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use geo::{Coordinates, GeoLocator, GeoProvider};
pub use link_service::{CreateLinkRequest, CreatedLink, LinkService};
pub use redirect::{RedirectOutcome, RedirectService};
pub use stats::{LinkStats, LinkStatus, StatsService, StatsSummary};
pub use validation::{Field, ValidationErrors};
