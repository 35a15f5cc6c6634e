//! Development seeder for Sarraf.
//!
//! Seeds banks, markets and accounts, plus a few sample transfers when the
//! transfer collections are empty. Writes to whichever backend the
//! configuration selects, so it doubles as a smoke test of that choice.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sarraf_core::gateway::DocumentGateway;
use sarraf_core::ledger::{BankRepository, Draft, HawalaRepository};
use sarraf_core::reference::{AddOutcome, ReferenceCollection, ReferenceRepository};
use sarraf_db::ConfiguredGateway;
use sarraf_shared::AppConfig;

const BANKS: [&str; 4] = [
    "Rafidain Bank",
    "Rasheed Bank",
    "Kurdistan International Bank",
    "Trade Bank of Iraq",
];

const MARKETS: [&str; 3] = ["Erbil", "Sulaymaniyah", "Baghdad Al-Kifah"];

const ACCOUNTS: [&str; 3] = ["Main Account", "Payroll", "Supplier Settlements"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sarraf=debug,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let gateway = Arc::new(ConfiguredGateway::from_config(&config).await?);
    info!(backend = ?config.storage.backend, "seeding");

    seed_reference(&gateway, ReferenceCollection::Banks, &BANKS).await?;
    seed_reference(&gateway, ReferenceCollection::Markets, &MARKETS).await?;
    seed_reference(&gateway, ReferenceCollection::Accounts, &ACCOUNTS).await?;
    seed_bank_transfers(BankRepository::new(Arc::clone(&gateway))).await?;
    seed_hawala_transfers(HawalaRepository::new(gateway)).await?;

    info!("seeding complete");
    Ok(())
}

/// Adds each name; names already present are skipped.
async fn seed_reference<G: DocumentGateway>(
    gateway: &Arc<G>,
    collection: ReferenceCollection,
    names: &[&str],
) -> anyhow::Result<()> {
    let repository = ReferenceRepository::new(Arc::clone(gateway), collection);
    let mut added = 0;
    for name in names {
        if let AddOutcome::Added(_) = repository.add(name).await? {
            added += 1;
        }
    }
    info!(%collection, added, skipped = names.len() - added, "reference entries seeded");
    Ok(())
}

async fn seed_bank_transfers<G: DocumentGateway>(repo: BankRepository<G>) -> anyhow::Result<()> {
    if !repo.list().await?.is_empty() {
        info!("bank transfers present, skipping");
        return Ok(());
    }

    let samples = [
        ("2500.00", "USD", "receive", "Rafidain Bank", Some("25.00")),
        ("1200.50", "EUR", "send", "Kurdistan International Bank", None),
        ("3000000", "IQD", "send", "Trade Bank of Iraq", Some("15000")),
    ];
    for (amount, currency, direction, bank, tax) in samples {
        let mut draft = Draft::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("transactionType", direction)
            .with("bankName", bank)
            .with("accountName", "Main Account");
        if let Some(tax) = tax {
            draft.set("tax", tax);
        }
        repo.save(&draft).await?;
    }
    info!(count = samples.len(), "bank transfers seeded");
    Ok(())
}

async fn seed_hawala_transfers<G: DocumentGateway>(
    repo: HawalaRepository<G>,
) -> anyhow::Result<()> {
    if !repo.list().await?.is_empty() {
        info!("hawala transfers present, skipping");
        return Ok(());
    }

    let samples = [
        ("750", "USD", "send", "Erbil", "Payroll", Some("family support")),
        ("1500000", "IQD", "receive", "Sulaymaniyah", "Supplier Settlements", None),
    ];
    for (amount, currency, direction, market, account, purpose) in samples {
        let mut draft = Draft::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("transactionType", direction)
            .with("market", market)
            .with("accountName", account);
        if let Some(purpose) = purpose {
            draft.set("purpose", purpose);
        }
        let saved = repo.save(&draft).await?;
        if direction == "receive" {
            repo.toggle_status(&saved.id.to_string()).await?;
        }
    }
    info!(count = samples.len(), "hawala transfers seeded");
    Ok(())
}
