use anyhow::{Context, Result};
use cart::{StoreCartReader, StoreCatalogReader};
use clap::{Parser, Subcommand};
use colored::Colorize;
use recommender::{ScoredCandidate, DEFAULT_TOP_N};
use server::RecommendationService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use store::{StoreIndex, UserId};

/// ShopRecs - Cart-based product recommendations
#[derive(Parser)]
#[command(name = "shop-recs")]
#[command(about = "Product recommendations from cart contents using content-based similarity", long_about = None)]
struct Cli {
    /// Path to the store data directory (products.json, carts.json)
    #[arg(short, long, default_value = "data/store")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get product recommendations for a user's cart
    Recommend {
        /// User ID to recommend for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        limit: usize,
    },

    /// Show a user's cart contents
    Cart {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Search the catalog by product name or category
    Search {
        /// Name substring or exact category label (case-insensitive)
        #[arg(long)]
        query: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading store data from {}...", cli.data_dir.display());
    let start = Instant::now();
    let index = Arc::new(
        StoreIndex::load_from_files(&cli.data_dir).context("Failed to load store data")?,
    );
    println!("{} Loaded store in {:?}", "✓".green(), start.elapsed());

    // Dispatch to the command handler
    match cli.command {
        Commands::Recommend { user_id, limit } => handle_recommend(index, user_id, limit).await?,
        Commands::Cart { user_id } => handle_cart(index, user_id)?,
        Commands::Search { query } => handle_search(index, query)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(index, requests, concurrent).await?,
    }

    Ok(())
}

fn build_service(index: Arc<StoreIndex>) -> RecommendationService {
    RecommendationService::new(
        Arc::new(StoreCartReader::new(index.clone())),
        Arc::new(StoreCatalogReader::new(index)),
    )
}

/// Handle the 'recommend' command
async fn handle_recommend(index: Arc<StoreIndex>, user_id: UserId, limit: usize) -> Result<()> {
    let service = build_service(index);

    let recommendations = service.get_recommendations(user_id, limit).await?;

    if recommendations.is_empty() {
        println!(
            "No recommendations for user {} (empty cart or empty catalog).",
            user_id
        );
        return Ok(());
    }

    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'cart' command
fn handle_cart(index: Arc<StoreIndex>, user_id: UserId) -> Result<()> {
    let entries = index.get_cart_entries(user_id);

    print!("{}", format!("Cart for user {}\n", user_id).bold().blue());
    if entries.is_empty() {
        println!("  (empty)");
        return Ok(());
    }

    let mut total_value = 0.0;
    let mut total_items = 0u32;
    for entry in entries {
        match index.get_product(entry.product_id) {
            Some(product) => {
                println!(
                    "{}{} x{} - ${:.2} [{}]",
                    "• ".green(),
                    product.name,
                    entry.quantity,
                    product.price,
                    product.category
                );
                total_value += product.price * entry.quantity as f64;
                total_items += entry.quantity;
            }
            None => println!(
                "{}product {} (no longer in catalog) x{}",
                "• ".yellow(),
                entry.product_id,
                entry.quantity
            ),
        }
    }
    println!("{}Total items: {}", "• ".cyan(), total_items);
    println!("{}Total value: ${:.2}", "• ".cyan(), total_value);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(index: Arc<StoreIndex>, query: String) -> Result<()> {
    let query_lower = query.to_lowercase();

    // (product id, name, category, price, relevance rank)
    let mut matches: Vec<(u32, String, String, f64, usize)> = Vec::new();

    // Exact category match first, via the category index.
    for &product_id in index.get_products_by_category(&query_lower) {
        if let Some(product) = index.get_product(product_id) {
            matches.push((
                product_id,
                product.name.clone(),
                product.category.clone(),
                product.price,
                0,
            ));
        }
    }

    // Then name substring matches.
    for product_id in index.all_product_ids() {
        if let Some(product) = index.get_product(product_id) {
            if product.name.to_lowercase().contains(&query_lower)
                && !matches.iter().any(|m| m.0 == product_id)
            {
                matches.push((
                    product_id,
                    product.name.clone(),
                    product.category.clone(),
                    product.price,
                    1,
                ));
            }
        }
    }

    // Sort by relevance (category match first), then id for stable output
    matches.sort_by(|a, b| a.4.cmp(&b.4).then_with(|| a.0.cmp(&b.0)));

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for (product_id, name, category, price, _) in matches.iter().take(20) {
        println!("{}: {} [{}] ${:.2}", product_id, name, category, price);
    }
    if matches.is_empty() {
        println!("  (no matches)");
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    index: Arc<StoreIndex>,
    requests: usize,
    _concurrent: usize,
) -> Result<()> {
    let service = build_service(index);

    // Random user ids; unknown users cost a full catalog fetch too
    let user_ids: Vec<UserId> = (0..requests)
        .map(|_| rand::random::<u32>() % 100 + 1)
        .collect();

    let mut handles = vec![];
    for user in user_ids {
        let service = service.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            service.get_recommendations(user, DEFAULT_TOP_N).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[ScoredCandidate]) {
    print!("{}", "Recommended products:\n".bold().blue());
    for (rank, candidate) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] ${:.2} - Score: {:.2}",
            (rank + 1).to_string().green(),
            candidate.product.name,
            candidate.product.category,
            candidate.product.price,
            candidate.score
        );
        if !candidate.product.description.is_empty() {
            println!("   {}", candidate.product.description);
        }
    }
}
