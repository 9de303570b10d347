//! Add link command

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::services::CreateLinkRequest;

use super::helpers::print_created;

pub async fn add_link(
    ctx: &StartupContext,
    url: String,
    code: Option<String>,
    validity: Option<String>,
) -> Result<(), CliError> {
    let request = CreateLinkRequest {
        long_url: url,
        validity_minutes: validity,
        custom_code: code,
    };

    let created = ctx.link_service.create_link(request).await?;
    print_created(&created);
    Ok(())
}
