use crate::cmd::editor::ExternalEditor;
use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use hf_inference::InferenceClient;
use prd_core::config::Config;
use prd_core::document::edit_in_place;
use prd_core::token::TokenStore;
use prd_core::{export, run_attempt, CannedGenerator, DocumentState, NormalizedDocument, ProjectInputs};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GenerateArgs {
    /// Project name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Project description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Features, one per line
    #[arg(long, conflicts_with = "features_file")]
    pub features: Option<String>,

    /// Read features from a file, one per line
    #[arg(long, value_name = "PATH")]
    pub features_file: Option<PathBuf>,

    /// Use the built-in canned generator instead of the hosted model
    #[arg(long)]
    pub offline: bool,

    /// API token for this run (overrides the stored token)
    #[arg(long, env = "PRDGEN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory to save the document in
    #[arg(long, default_value = ".", conflicts_with = "stdout")]
    pub out: PathBuf,

    /// Print the document instead of saving it
    #[arg(long)]
    pub stdout: bool,

    /// Open the result in $VISUAL / $EDITOR before saving
    #[arg(long)]
    pub edit: bool,
}

pub fn run(home: &Path, args: GenerateArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load(home).context("failed to load config")?;

    let features = match &args.features_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read features from {}", path.display()))?,
        None => args.features.clone().unwrap_or_default(),
    };
    let inputs = ProjectInputs::from_form(args.name.clone(), args.description.clone(), &features);

    let doc = generate_document(home, &config, &inputs, &args)?;

    let mut state = DocumentState::new();
    state.replace(doc);
    if args.edit {
        let editor = ExternalEditor::from_env()?;
        edit_in_place(&editor, &mut state).context("editor failed")?;
    }
    let markdown = state.markdown().unwrap_or_default();
    let filename = export::filename_for(&inputs.name, &config.default_filename);

    if args.stdout {
        if json {
            print_json(&serde_json::json!({
                "filename": filename,
                "markdown": markdown,
                "origin": state.origin(),
            }))?;
        } else {
            println!("{markdown}");
        }
        return Ok(());
    }

    let path = export::save_markdown(&args.out, &filename, markdown)
        .with_context(|| format!("failed to save {filename}"))?;

    if json {
        print_json(&serde_json::json!({
            "path": path,
            "filename": filename,
            "origin": state.origin(),
        }))?;
    } else {
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn generate_document(
    home: &Path,
    config: &Config,
    inputs: &ProjectInputs,
    args: &GenerateArgs,
) -> anyhow::Result<NormalizedDocument> {
    let params = config.params();
    let rt = tokio::runtime::Runtime::new()?;

    if args.offline {
        let canned = CannedGenerator::new(inputs.clone());
        return Ok(rt.block_on(run_attempt(&canned, inputs, params, None))?);
    }

    config.ensure_valid()?;
    let token = match args.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => Some(t.to_string()),
        None => TokenStore::new(home)
            .load()
            .context("failed to read stored token")?,
    };

    let client = InferenceClient::new(config.endpoint.clone());
    Ok(rt.block_on(run_attempt(&client, inputs, params, token.as_deref()))?)
}
