//! Debug script to exercise search, lookup and pagination against the live API
//!
//! Run with: cargo run --example debug_search -p eporner-core -- [query]

use eporner_core::format::{format_duration, format_rating, format_views};
use eporner_core::{EpornerClient, Order, RemovedFormat, SearchParams, ThumbSize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "teen".to_string());
    let client = EpornerClient::new()?;

    println!("Searching for '{}'...\n", query);

    let params = SearchParams::new(query.as_str())
        .with_per_page(5)
        .with_order(Order::TopWeekly)
        .with_thumbsize(ThumbSize::Big);
    let page = client.search(&params)?;

    println!(
        "Page {}/{} ({} total, {} ms)\n",
        page.page, page.total_pages, page.total_count, page.time_ms
    );

    if page.is_empty() {
        println!("No results found!");
        return Ok(());
    }

    for (i, video) in page.iter().enumerate() {
        println!("{}. {}", i + 1, video.title);
        println!("   ID: {}", video.id);
        println!("   Length: {}", format_duration(video.length_sec));
        println!("   Views: {}", format_views(video.views));
        println!("   Rating: {}", format_rating(video.rate));
        println!("   Thumb: {} ({})", video.default_thumb.src, video.default_thumb.dimensions());
        println!();
    }

    let first = &page.videos[0];
    println!("Looking up {} by ID...", first.id);
    match client.get_video(&first.id, None)? {
        Some(video) => println!("✓ {} -> {}\n", video.id, video.embed),
        None => println!("✗ Video has been removed\n"),
    }

    println!("Walking the first 12 results across pages...");
    let mut iter = client.search_iter(&params);
    let ids: Vec<String> = iter.by_ref().take(12).map(|v| v.id).collect();
    println!("   {} ids, next page would be {}", ids.len(), iter.current_page());
    if let Some(e) = iter.last_error() {
        println!("✗ Iteration stopped early: {}", e);
    }

    let removed = client.get_removed_videos(RemovedFormat::Txt)?;
    println!("\n{} removed videos listed", removed.len());

    Ok(())
}
