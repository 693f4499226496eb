use clap::Parser;
use paged_scrape::results::ScrapeSession;
use paged_scrape::{FilterError, Outcome, Scraper, SessionStatus, export, filter, utils};
use std::error::Error;
use std::ops::ControlFlow;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = args.to_config()?;
    args.check_filters()?;

    ::log::info!("Starting scrape for URL: {}", config.url_template);

    let scraper = Scraper::from_config(config);
    let session = scraper
        .run(|event| {
            eprintln!(
                "Scraping page {}... ({:.0}%, {} items)",
                event.page_index,
                event.percent(),
                event.item_count
            );
            ControlFlow::Continue(())
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    }

    if let SessionStatus::Failed(err) = &session.status {
        eprintln!(
            "Failed to fetch data: {} ({} items collected before the error)",
            err,
            session.items.len()
        );
        return Err(err.clone().into());
    }

    eprintln!(
        "Done! Scraped {} items across {} pages.",
        session.items.len(),
        session.pages_visited
    );

    if !args.json {
        display(&args, &session)?;
    }

    if let Some(target) = &args.export {
        let format = args.export_format();
        let path = if target.is_dir() {
            utils::default_export_path(target, &scraper.config().url_template, format)
        } else {
            target.clone()
        };
        export::export(&session.items, &args.column, format, &path)?;
        eprintln!("Data exported to {}", path.display());
    }

    Ok(())
}

/// Prints the items, or the result of `--filter` / `--regex` over them
fn display(args: &Args, session: &ScrapeSession) -> Result<(), Box<dyn Error>> {
    if (args.filter.is_some() || args.regex.is_some()) && session.items.is_empty() {
        return Err(FilterError::NoData.into());
    }

    let outcome = if let Some(keyword) = &args.filter {
        filter::filter_by_substring(&session.items, keyword)?
    } else if let Some(pattern) = &args.regex {
        filter::extract_by_regex(&session.items, pattern)?
    } else {
        for item in &session.items {
            println!("{}", item);
        }
        return Ok(());
    };

    match outcome {
        Outcome::Matched(items) => {
            for item in items {
                println!("{}", item);
            }
        }
        Outcome::NoResults => eprintln!("No Results: no items matched"),
    }
    Ok(())
}
