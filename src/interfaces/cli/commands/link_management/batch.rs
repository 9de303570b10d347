//! Batch shorten command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::runtime::StartupContext;
use crate::services::CreateLinkRequest;

use super::helpers::print_created;

pub async fn batch_links(
    ctx: &StartupContext,
    urls: Vec<String>,
    validity: Option<String>,
) -> Result<(), CliError> {
    let requests: Vec<CreateLinkRequest> = urls
        .iter()
        .map(|url| CreateLinkRequest {
            long_url: url.clone(),
            validity_minutes: validity.clone(),
            custom_code: None,
        })
        .collect();

    let results = ctx.link_service.create_links(requests).await?;

    let mut failed = 0;
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(created) => print_created(&created),
            Err(e) => {
                failed += 1;
                println!(
                    "{} {} {}",
                    "✗".bold().red(),
                    url.blue(),
                    e.message().red()
                );
            }
        }
    }

    println!();
    println!(
        "{} {} shortened, {} failed",
        "ℹ".bold().blue(),
        (urls.len() - failed).to_string().green(),
        failed.to_string().red()
    );

    if failed == urls.len() {
        return Err(CliError::CommandError("No URL was shortened".to_string()));
    }
    Ok(())
}
