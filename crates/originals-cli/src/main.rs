//! originals-cli
//!
//! Demonstration CLI driving a single asset through create -> publish ->
//! inscribe -> transfer against in-memory mock adapters. Not a server, not a
//! wallet: there is no persistence between invocations, so `demo` runs the
//! whole pipeline in one process and prints what happened at each step.
//!
//! Usage:
//!   originals-cli demo --domain <domain> [--text <content>] [--recipient <address>]
//!   originals-cli info

use std::sync::Arc;

use anyhow::Context;
use bitcoin::secp256k1::{rand, Secp256k1, SecretKey};
use bitcoin::Address;
use clap::{Parser, Subcommand};
use tracing::info;

use originals_adapters::{FixedFeeOracle, InMemoryStorageAdapter, LocalExternalSigner, MockOrdinalsProvider};
use originals_bitcoin::untweaked_internal_key;
use originals_core::{BitcoinNetwork, KeyType, Resource, ResourceContent, ResourceType};
use originals_crypto::KeyPair;
use originals_sdk::{
    CreateDraftOptions, InscribeOptions, OriginalsConfigBuilder, OriginalsSdk, PublishOptions,
    PublishTarget, TransferRequestOptions,
};

#[derive(Parser, Debug)]
#[command(
    name = "originals-cli",
    version,
    about = "Originals SDK demo CLI — create, publish, inscribe, and transfer a digital asset"
)]
struct Args {
    /// Bitcoin network the ordinals/inscription steps simulate.
    #[arg(long, global = true, default_value = "regtest")]
    network: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full create -> publish -> inscribe -> transfer pipeline
    /// against mock adapters and print the resulting asset state.
    Demo {
        /// Domain the asset is published under on `did:webvh`.
        #[arg(long, default_value = "example.com")]
        domain: String,
        /// Resource content (a short text document).
        #[arg(long, default_value = "hello, originals")]
        text: String,
        /// Recipient address for the final ownership transfer. Defaults to a
        /// freshly generated throwaway P2TR address on `--network`.
        #[arg(long)]
        recipient: Option<String>,
    },

    /// Print the constants this build of the SDK was wired with.
    Info,
}

fn to_bitcoin_network(network: BitcoinNetwork) -> bitcoin::Network {
    match network {
        BitcoinNetwork::Mainnet => bitcoin::Network::Bitcoin,
        BitcoinNetwork::Testnet => bitcoin::Network::Testnet,
        BitcoinNetwork::Signet => bitcoin::Network::Signet,
        BitcoinNetwork::Regtest => bitcoin::Network::Regtest,
    }
}

/// A throwaway P2TR address on `network`, standing in for a recipient
/// wallet address in the demo pipeline.
fn generate_recipient_address(network: BitcoinNetwork) -> String {
    let secp = Secp256k1::new();
    let secret_key = SecretKey::new(&mut rand::thread_rng());
    let internal_key = untweaked_internal_key(&secp, &secret_key);
    Address::p2tr(&secp, internal_key, None, to_bitcoin_network(network)).to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let network = parse_network(&args.network)?;

    match args.command {
        Command::Demo { domain, text, recipient } => cmd_demo(network, &domain, &text, recipient).await,
        Command::Info => cmd_info(network),
    }
}

fn parse_network(name: &str) -> anyhow::Result<BitcoinNetwork> {
    originals_sdk::parse_network(name).map_err(|e| anyhow::anyhow!("invalid --network: {e}"))
}

fn build_sdk(network: BitcoinNetwork) -> anyhow::Result<OriginalsSdk> {
    let signer_key = KeyPair::generate(KeyType::Ed25519).context("generating keystore keypair")?;
    let config = OriginalsConfigBuilder::new()
        .network(network)
        .default_key_type(KeyType::Ed25519)
        .ordinals_provider(Arc::new(MockOrdinalsProvider::default()))
        .fee_oracle(Arc::new(FixedFeeOracle::new(4.0)))
        .storage_adapter(Arc::new(InMemoryStorageAdapter::new("example.com", "demo")))
        .key_store(Arc::new(LocalExternalSigner::new("did:peer:demo#key-1", signer_key)))
        .build()
        .context("building OriginalsConfig")?;
    Ok(OriginalsSdk::new(config))
}

async fn cmd_demo(network: BitcoinNetwork, domain: &str, text: &str, recipient: Option<String>) -> anyhow::Result<()> {
    let sdk = build_sdk(network)?;
    let recipient = recipient.unwrap_or_else(|| generate_recipient_address(network));
    let recipient = recipient.as_str();

    let resource = Resource {
        id: "doc-1".to_string(),
        resource_type: ResourceType::Text,
        content_type: "text/plain".to_string(),
        hash: originals_crypto::sha256_hex(text.as_bytes()),
        size: text.len() as u64,
        version: 1,
        previous_version_hash: None,
        created_at: chrono::Utc::now().timestamp(),
        url: None,
        content: Some(ResourceContent::Bytes(text.as_bytes().to_vec())),
    };

    info!("creating draft asset");
    let mut handle = sdk
        .create_draft(vec![resource], CreateDraftOptions::default())
        .context("create_draft")?;
    println!("1. created draft:   {}", handle.id());

    sdk.publish(
        &mut handle,
        PublishTarget { domain: domain.to_string(), slug: None },
        PublishOptions::default(),
    )
    .await
    .context("publish")?;
    println!("2. published:       {}", handle.id());

    sdk.inscribe(&mut handle, InscribeOptions::default()).await.context("inscribe")?;
    println!("3. inscribed:       {}", handle.id());

    let outcome = sdk
        .transfer(&mut handle, recipient, TransferRequestOptions::default())
        .await
        .context("transfer")?;
    println!("4. transferred to:  {} (txid {}, fee {} sats)", recipient, outcome.txid, outcome.fee);

    let summary = sdk.get_provenance_summary(&handle);
    println!();
    println!("Provenance summary");
    println!("  created:        {:?}", summary.created);
    println!("  current layer:  {}", summary.current_layer);
    println!("  migrations:     {}", summary.migration_count);
    println!("  transfers:      {}", summary.transfer_count);
    println!("  verified:       {}", sdk.verify_asset(&handle));

    Ok(())
}

fn cmd_info(network: BitcoinNetwork) -> anyhow::Result<()> {
    println!("Originals SDK demo CLI");
    println!("Network:      {}", network);
    println!("Default key:  Ed25519");
    println!("Adapters:     mock ordinals provider, fixed fee oracle, in-memory storage");
    Ok(())
}
