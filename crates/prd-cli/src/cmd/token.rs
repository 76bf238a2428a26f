use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use prd_core::token::{mask, TokenStore};
use std::path::Path;

#[derive(Subcommand)]
pub enum TokenSubcommand {
    /// Store the API token used for generation
    Set {
        /// Token value
        token: String,
    },

    /// Show the stored token (masked)
    Show,

    /// Remove the stored token
    Clear,
}

pub fn run(home: &Path, subcmd: TokenSubcommand, json: bool) -> anyhow::Result<()> {
    let store = TokenStore::new(home);
    match subcmd {
        TokenSubcommand::Set { token } => set(&store, &token, json),
        TokenSubcommand::Show => show(&store, json),
        TokenSubcommand::Clear => clear(&store, json),
    }
}

fn set(store: &TokenStore, token: &str, json: bool) -> anyhow::Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("token must not be empty");
    }
    store.save(token).context("failed to save token")?;
    if json {
        print_json(&serde_json::json!({ "saved": true, "path": store.path() }))?;
    } else {
        println!("Token saved to {}", store.path().display());
    }
    Ok(())
}

fn show(store: &TokenStore, json: bool) -> anyhow::Result<()> {
    let token = store.load().context("failed to read token")?;
    let masked = token.as_deref().map(mask);
    if json {
        print_json(&serde_json::json!({
            "stored": masked.is_some(),
            "token": masked,
        }))?;
    } else {
        match masked {
            Some(m) => println!("{m}"),
            None => println!("No token stored. Run `prdgen token set <TOKEN>`."),
        }
    }
    Ok(())
}

fn clear(store: &TokenStore, json: bool) -> anyhow::Result<()> {
    let removed = store.clear().context("failed to clear token")?;
    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else if removed {
        println!("Token removed.");
    } else {
        println!("No token stored.");
    }
    Ok(())
}
