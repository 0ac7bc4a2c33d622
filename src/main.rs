use clap::Parser;
use small_order::utils::error::AppError;
use small_order::utils::{logger, validation::Validate};
use small_order::{build_order_service, CliConfig, OrderRequest};
use std::error::Error;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 設定檔載入失敗時仍以預設值初始化日誌
    let settings = config.load_settings();
    logger::init_cli_logger(
        config.verbose,
        settings.as_ref().ok().and_then(|s| s.logging.as_ref()),
    );

    tracing::info!("Starting small-order CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    let request = OrderRequest {
        user_id: config.user_id(),
        amount: config.amount,
    };
    let service = build_order_service(&settings);

    match service.place_order(request.user_id, request.amount).await {
        Ok(receipt) => {
            tracing::info!(
                "✅ Order placed for user {}: final amount {}, discount {}, remaining balance {}",
                receipt.user_id,
                receipt.final_amount,
                receipt.discount,
                receipt.remaining_balance
            );
            if config.json {
                match serde_json::to_string_pretty(&receipt) {
                    Ok(json) => println!("{}", json),
                    Err(e) => exit_with(AppError::from(e)),
                }
            } else {
                println!("{}", receipt.message());
            }
        }
        Err(e) => {
            if e.charged_without_balance_update() {
                tracing::error!(
                    "⚠️ User {} was charged but the stored balance was not updated",
                    request.user_id
                );
            }
            exit_with(AppError::from(e));
        }
    }
}

fn exit_with(e: AppError) -> ! {
    let cause = e.source().and_then(|s| s.source()).map(|s| s.to_string());
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?}, Cause: {:?})",
        e,
        e.category(),
        e.severity(),
        cause
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
