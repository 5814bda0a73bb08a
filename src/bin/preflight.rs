use imbibe_action::domain::connection::Connection;
use imbibe_action::infra::config::Config;
use imbibe_action::solana::RpcConnection;
use imbibe_action::{resolve_sns_domain, ImbibeParams};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--domain <name.sol>]\n\
         \n\
         Optional env vars:\n\
           SOLANA_RPC_URL (default: https://api.mainnet-beta.solana.com)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imbibe_action=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let params = ImbibeParams::default();
    let domain = match args.iter().position(|a| a == "--domain") {
        Some(i) => match args.get(i + 1) {
            Some(d) => d.clone(),
            None => usage_and_exit(),
        },
        None => params.recipient_domain.clone(),
    };

    // Force-read config (nice error messages if invalid)
    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  SOLANA_RPC_URL={}", config.solana_rpc_url);

    let connection = RpcConnection::new(&config.solana_rpc_url);

    // Basic RPC connectivity
    let version = connection.client().get_version().await?;
    println!("  RPC version: {}", version.solana_core);
    connection
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("RPC node reports unhealthy: {}", e))?;
    println!("  RPC node is healthy.");

    // Recipient resolution
    let recipient = resolve_sns_domain(&connection, &domain).await?;
    println!("  {} resolves to {}", domain, recipient);

    let balance_lamports = connection.client().get_balance(&recipient).await?;
    let sol = balance_lamports as f64 / 1_000_000_000_f64;
    println!("  Recipient balance: {} lamports (~{:.6} SOL)", balance_lamports, sol);

    println!(
        "  Action: {} ({}), priority fee {}, CU limit {}",
        params.description(),
        params.amount_label(),
        params.priority_fee_label(),
        params.compute_unit_limit
    );

    println!("> Preflight OK.");
    Ok(())
}
