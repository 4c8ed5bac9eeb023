//! Command line interface for the credit-program client harness.
//!
//! Two one-shot flows: `read-price` submits a `ReadBonoPrice` instruction
//! and prints the on-chain logs next to a client-side price computation;
//! `swap` quotes a USDC-for-BONO swap, submits the `Swap` instruction and
//! verifies the resulting balance. Every failure is fatal to the run.

use anyhow::Result;
use clap::{Parser, Subcommand};
use credit_domain::math::sqrt_price::u64_to_decimal;
use credit_domain::value_objects::Slippage;
use credit_execution::prelude::*;
use credit_protocols::PoolFetcher;
use credit_protocols::orca::quote::quote_swap_by_input;
use credit_protocols::orca::reader::WhirlpoolReader;
use credit_protocols::rpc::RpcProvider;
use dotenv::dotenv;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;

/// BONO/USDC whirlpool on the local test validator.
const DEFAULT_POOL: &str = "DBJ5hywaJQKfjyt8Ekng4t6KB1gvqnYFdcJoTppCNikt";

#[derive(Parser)]
#[command(name = "credit-cli")]
#[command(about = "Invoke the credit program against a Whirlpool pool", long_about = None)]
struct Cli {
    /// RPC endpoint URL
    #[arg(long, env = "RPC_URL", default_value = "http://localhost:8899")]
    rpc_url: String,

    /// Path to the JSON keypair file
    #[arg(long, env = "KEYPAIR_PATH", default_value = "test_wallet.json")]
    keypair: String,

    /// Whirlpool pool address
    #[arg(long, default_value = DEFAULT_POOL)]
    pool: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the pool price client-side and via the on-chain program
    ReadPrice {
        /// BONO amount to value, raw u64 units
        #[arg(long, default_value_t = 2_000_000_000)]
        amount: u64,
    },
    /// Swap USDC for BONO through the credit program
    Swap {
        /// USDC input amount, raw u64 units
        #[arg(long, default_value_t = 1_000_000)]
        amount_in: u64,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 100)]
        slippage_bps: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let provider = Arc::new(RpcProvider::new(cli.rpc_url.clone()));
    println!("rpc: {}", provider.url());

    let wallet = Arc::new(Wallet::from_file(&cli.keypair)?);
    println!("wallet: {}", wallet.pubkey());

    let pool_address = Pubkey::from_str(&cli.pool)?;
    let reader = WhirlpoolReader::new(provider.clone());
    let pipeline = SubmissionPipeline::new(provider.clone(), wallet.clone());

    match cli.command {
        Commands::ReadPrice { amount } => {
            read_price(&reader, &pipeline, &pool_address, amount).await
        }
        Commands::Swap {
            amount_in,
            slippage_bps,
        } => {
            swap(
                &reader,
                &pipeline,
                &provider,
                &wallet,
                &pool_address,
                amount_in,
                Slippage::from_bps(slippage_bps),
            )
            .await
        }
    }
}

async fn read_price(
    reader: &WhirlpoolReader,
    pipeline: &SubmissionPipeline,
    pool_address: &Pubkey,
    amount: u64,
) -> Result<()> {
    let pool = reader.fetch_pool(pool_address).await?;
    println!("decimalsA (BONO): {}", pool.decimals_a);
    println!("decimalsB (USDC): {}", pool.decimals_b);
    println!("sqrtPriceX64: {}", pool.sqrt_price);

    let ui_price = pool.ui_price()?;
    println!("uiPrice: {} USDC/BONO", ui_price.trunc_with_scale(6));

    let usdc_value = ui_price * u64_to_decimal(amount, pool.decimals_a)?;
    println!("{amount} BONO in USDC: {}", usdc_value.trunc_with_scale(6));

    // Have the program read and log the same price on chain. The account
    // set is static, so preflight stays enabled.
    let instruction = CreditInstruction::ReadBonoPrice {
        bono_amount: amount,
    }
    .into_instruction(read_price_accounts(pool_address));
    let submitted = pipeline.submit(instruction, false).await?;

    println!("signature: {}", submitted.signature);
    println!("confirmed at slot {}", submitted.slot);
    for line in &submitted.logs {
        println!("log: {line}");
    }
    Ok(())
}

async fn swap(
    reader: &WhirlpoolReader,
    pipeline: &SubmissionPipeline,
    provider: &RpcProvider,
    wallet: &Wallet,
    pool_address: &Pubkey,
    amount_in: u64,
    slippage: Slippage,
) -> Result<()> {
    // Quote against the freshest snapshot; it feeds both the payload and
    // the tick-array accounts.
    let pool = reader.fetch_pool(pool_address).await?;
    let quote = quote_swap_by_input(&pool, &pool.token_mint_b, amount_in, slippage)?;

    println!("slippage tolerance: {}", slippage.as_fraction());
    println!("quote.amount: {}", quote.amount_in);
    println!("quote.estimatedOut: {}", quote.estimated_out);
    println!("quote.otherAmountThreshold: {}", quote.other_amount_threshold);
    for (i, tick_array) in quote.tick_arrays.iter().enumerate() {
        println!("quote.tickArray{i}: {tick_array}");
    }

    let instruction = CreditInstruction::Swap {
        usdc_amount: quote.amount_in,
        bono_amount_threshold: quote.other_amount_threshold,
    }
    .into_instruction(swap_accounts(&pool, &wallet.pubkey(), &quote.tick_arrays));

    // Preflight would simulate against pool state that may have moved
    // since the quote; skip it and let the threshold guard the swap.
    let submitted = pipeline.submit(instruction, true).await?;

    println!("signature: {}", submitted.signature);
    println!("confirmed at slot {}", submitted.slot);
    for line in &submitted.logs {
        println!("log: {line}");
    }

    let pda_bono_ata = {
        let signing_pda = derive_signing_pda();
        credit_protocols::orca::pda::derive_ata(&signing_pda, &pool.token_mint_a)
    };
    let balance = provider.get_token_balance(&pda_bono_ata).await?;
    println!("program BONO balance: {balance}");
    Ok(())
}
