// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use num_bigint::BigInt;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use toncenter::client::StackParam;
use toncenter::decoder::{
    AutoDecoder, JettonData, JettonWalletData, NftItemData, StackEntry, parse_hex_int,
};
use toncenter::logging::{self, LoggingConfig};
use toncenter::{Address, ToncenterClient, ToncenterConfig};
use toncenter_config::ConfigArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every textual form of an address
    Address {
        address: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decode a saved get-method result stack
    Decode {
        /// JSON file with a stack array or a runGetMethod response
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Schema::Auto)]
        schema: Schema,
    },

    /// Run a get-method and decode its result stack
    RunGetMethod {
        address: String,
        method: String,

        /// Argument as KIND:VALUE (num:42, bool:true, cell:<base64>, slice:<base64>)
        #[arg(long = "arg", value_parser = parse_stack_param)]
        args: Vec<StackParam>,

        #[arg(long, value_enum, default_value_t = Schema::Auto)]
        schema: Schema,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Schema {
    Auto,
    JettonData,
    JettonWallet,
    NftItem,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ToncenterConfig::load(&cli.config).context("Failed to load configuration")?;

    logging::init_with_config(LoggingConfig {
        filter: config.log.level.filter_directive(),
        json_format: config.log.json,
        strip_ansi: config.log.strip_ansi,
    })?;

    match cli.command {
        Command::Address { address, json } => show_address(&address, json),
        Command::Decode { file, schema } => {
            let stack = read_stack(&file)?;
            print_json(&decode_stack(&stack, schema)?)
        }
        Command::RunGetMethod {
            address,
            method,
            args,
            schema,
        } => {
            let address = Address::parse(&address)
                .with_context(|| format!("Invalid address '{}'", address))?;
            let client = ToncenterClient::from_config(&config.network)?;
            tracing::info!(network = %config.network.network, base_url = %client.base_url(), "Using TON Center");

            let response = client.run_get_method(&address, &method, &args).await?;
            if !response.is_success() {
                eprintln!(
                    "{} get-method exited with code {}",
                    "warning:".yellow().bold(),
                    response.exit_code
                );
            }
            eprintln!("gas used: {}", response.gas_used);
            print_json(&decode_stack(&response.stack, schema)?)
        }
    }
}

fn show_address(input: &str, json: bool) -> Result<()> {
    let address =
        Address::parse(input).with_context(|| format!("Invalid address '{}'", input))?;
    let forms = address.forms();

    if json {
        return print_json(&forms);
    }

    println!("{:<24}{}", "raw".bold(), forms.raw_form);
    println!("{:<24}{}", "bounceable".bold(), forms.bounceable.b64url.green());
    println!("{:<24}{}", "bounceable (std)".bold(), forms.bounceable.b64);
    println!("{:<24}{}", "non-bounceable".bold(), forms.non_bounceable.b64url.cyan());
    println!("{:<24}{}", "non-bounceable (std)".bold(), forms.non_bounceable.b64);
    println!("{:<24}{}", "given type".bold(), forms.given_type);
    println!("{:<24}{}", "test only".bold(), forms.test_only);
    Ok(())
}

/// Accept either a bare stack array or an object carrying a `stack` field.
fn read_stack(path: &Path) -> Result<Vec<StackEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

    let stack = match json {
        Value::Object(mut map) => map
            .remove("stack")
            .context("JSON object has no 'stack' field")?,
        other => other,
    };

    serde_json::from_value(stack).context("Invalid stack entries")
}

fn decode_stack(stack: &[StackEntry], schema: Schema) -> Result<Value> {
    let value = match schema {
        Schema::Auto => {
            let decoded = AutoDecoder::new().decode(stack);
            for warning in decoded.warnings() {
                eprintln!("{} {}", "warning:".yellow().bold(), warning);
            }
            serde_json::to_value(&decoded)?
        }
        Schema::JettonData => serde_json::to_value(JettonData::from_stack(stack)?)?,
        Schema::JettonWallet => serde_json::to_value(JettonWalletData::from_stack(stack)?)?,
        Schema::NftItem => serde_json::to_value(NftItemData::from_stack(stack)?)?,
    };
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_stack_param(input: &str) -> Result<StackParam, String> {
    let (kind, value) = input
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:VALUE, got '{}'", input))?;

    match kind {
        "num" => {
            let number = if value.trim_start_matches('-').starts_with("0x") {
                parse_hex_int(value).map_err(|e| e.to_string())?
            } else {
                value
                    .parse::<BigInt>()
                    .map_err(|e| format!("invalid number '{}': {}", value, e))?
            };
            Ok(StackParam::num(number))
        }
        "bool" => match value {
            "true" => Ok(StackParam::boolean(true)),
            "false" => Ok(StackParam::boolean(false)),
            other => Err(format!("invalid bool '{}'", other)),
        },
        "cell" => Ok(StackParam::cell(value)),
        "slice" => Ok(StackParam::slice(value)),
        other => Err(format!("unknown argument kind '{}'", other)),
    }
}
