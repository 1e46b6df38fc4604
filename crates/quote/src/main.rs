//! Pricing Quote
//!
//! Loads the catalog (pricing service or built-in fallback), applies a
//! selection described by environment variables and prints the summary as
//! JSON. Handy for checking catalog changes against the pricing page.
//!
//! Selection variables:
//! - `QUOTE_SOLUTION`: solution id to start from
//! - `QUOTE_MODULES`: comma-separated module keys to toggle, in order
//! - `QUOTE_CYCLE`: `monthly` or `yearly`
//! - `QUOTE_EXTRA_PACKS`: number of extra seat packs
//!
//! Set all four `ROI_HOURS_PER_MONTH`, `ROI_HOURLY_RATE`,
//! `ROI_MISSED_INVOICES` and `ROI_AVG_INVOICE_AMOUNT` to add an ROI estimate.

use anyhow::Context;
use pricing_engine::{
    compute_roi_with, BillingCycle, CatalogLoader, Configurator, PackOutcome, PricingConfig,
    RoiAssumptions, RoiInputs, ToggleOutcome,
};
use tracing::{info, warn};

fn env_list(name: &str) -> Vec<String> {
    std::env::var(name)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn env_f64(name: &str) -> anyhow::Result<Option<f64>> {
    match std::env::var(name) {
        Ok(v) => {
            let value = v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("{} must be a number", name))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

/// Apply `QUOTE_*` variables to the configurator
fn apply_selection(configurator: &mut Configurator) -> anyhow::Result<()> {
    if let Ok(solution) = std::env::var("QUOTE_SOLUTION") {
        if !configurator.select_solution(solution.trim()) {
            warn!(solution = %solution, "Unknown solution, ignoring");
        }
    }

    for key in env_list("QUOTE_MODULES") {
        if configurator.toggle_module(&key) == ToggleOutcome::Ignored {
            warn!(module = %key, "Module not in catalog, ignoring");
        }
    }

    if let Ok(cycle) = std::env::var("QUOTE_CYCLE") {
        let cycle = BillingCycle::from_str(&cycle).with_context(|| {
            format!("QUOTE_CYCLE must be monthly or yearly, got {:?}", cycle)
        })?;
        configurator.set_billing_cycle(cycle);
    }

    if let Ok(packs) = std::env::var("QUOTE_EXTRA_PACKS") {
        let requested: u32 = packs.trim().parse().with_context(|| {
            format!("QUOTE_EXTRA_PACKS must be a whole number, got {:?}", packs)
        })?;
        if let PackOutcome::ContactSales { requested, applied } =
            configurator.set_extra_user_packs(requested)
        {
            warn!(
                requested = requested,
                applied = applied,
                "Seat packs capped, larger teams should contact sales"
            );
        }
    }

    Ok(())
}

fn roi_inputs() -> anyhow::Result<Option<RoiInputs>> {
    let fields = (
        env_f64("ROI_HOURS_PER_MONTH")?,
        env_f64("ROI_HOURLY_RATE")?,
        env_f64("ROI_MISSED_INVOICES")?,
        env_f64("ROI_AVG_INVOICE_AMOUNT")?,
    );

    match fields {
        (
            Some(hours_per_month),
            Some(hourly_rate),
            Some(missed_invoices),
            Some(avg_invoice_amount),
        ) => Ok(Some(RoiInputs {
            hours_per_month,
            hourly_rate,
            missed_invoices,
            avg_invoice_amount,
        })),
        _ => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize logging (stderr, so stdout stays pure JSON)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,pricing_engine=debug")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pricing quote v{}", env!("CARGO_PKG_VERSION"));

    let config = PricingConfig::from_env()?;
    info!(
        endpoint = %config.pricing_endpoint(),
        fetch_enabled = config.fetch_enabled,
        "Configuration loaded"
    );

    let loader = CatalogLoader::new(&config);
    let loaded = loader.load_with_source().await;
    info!(source = ?loaded.source, "Catalog ready");

    let mut configurator = Configurator::new(loaded.catalog);
    apply_selection(&mut configurator)?;

    let summary = configurator.summary();
    let comparison = configurator.cycle_comparison();
    let roi = roi_inputs()?.map(|inputs| {
        compute_roi_with(inputs, &RoiAssumptions::with_annual_cost(config.roi_annual_cost))
    });

    info!(
        total = summary.total,
        modules = summary.module_count,
        cycle = %summary.billing_cycle,
        "Quote computed"
    );

    let output = serde_json::json!({
        "catalogSource": loaded.source,
        "selection": configurator.snapshot(),
        "summary": summary,
        "cycleComparison": comparison,
        "roi": roi,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
