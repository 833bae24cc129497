// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Skiform CLI

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use skiform::cli::{init_tracing, load_configuration, Reporter};
use skiform::suggest::{quick_prompts, CancelToken, SuggestionClient, SuggestionOutcome};
use skiform::texture::TextureSynthesizer;
use skiform::{io, Configuration, EngineSettings, EquipmentKind, ExternalServiceError, ModelAssembler};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "skiform")]
#[command(about = "Parametric ski and snowboard geometry and texture synthesis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine settings file (defaults to ./skiform.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Ski,
    Snowboard,
}

impl From<Kind> for EquipmentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Ski => EquipmentKind::Ski,
            Kind::Snowboard => EquipmentKind::Snowboard,
        }
    }
}

#[derive(Args)]
struct Source {
    /// Configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start from this preset when no configuration file is given
    #[arg(short, long, value_enum)]
    kind: Option<Kind>,
}

impl Source {
    fn load(&self) -> Result<Configuration> {
        load_configuration(self.config.as_deref(), self.kind.map(Into::into))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a model and export it (gltf, glb, stl or png by extension)
    Render {
        #[command(flatten)]
        source: Source,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Synthesize only the topsheet texture as PNG
    Texture {
        #[command(flatten)]
        source: Source,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },

    /// Print a configuration and its model statistics
    Inspect {
        #[command(flatten)]
        source: Source,

        /// Print the model summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the preset configuration for a kind as JSON
    Preset {
        #[arg(value_enum)]
        kind: Kind,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a design-assistant response to a configuration
    Suggest {
        #[command(flatten)]
        source: Source,

        /// Prompt text (omit to list the quick prompts)
        prompt: Option<String>,

        /// File holding the assistant's JSON answer ("-" for stdin)
        #[arg(short, long, value_name = "FILE")]
        response: Option<PathBuf>,

        /// Write the updated configuration here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::load()?,
    };

    let result = match cli.command {
        Commands::Render { source, output } => render_command(&source, &output, settings),
        Commands::Texture {
            source,
            output,
            width,
            height,
        } => texture_command(&source, &output, settings, width, height),
        Commands::Inspect { source, json } => inspect_command(&source, settings, json),
        Commands::Preset { kind, output } => preset_command(kind, output.as_deref()),
        Commands::Suggest {
            source,
            prompt,
            response,
            output,
        } => suggest_command(&source, prompt, response, output.as_deref(), settings),
        Commands::Version => {
            println!("Skiform v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = &result {
        Reporter::report_error(&format!("{err:#}"));
        std::process::exit(1);
    }
    Ok(())
}

fn render_command(source: &Source, output: &Path, settings: EngineSettings) -> Result<()> {
    let config = source.load()?;
    let start = Instant::now();
    let mut assembler = ModelAssembler::new(settings);
    let model = assembler.update(&config).context("Failed to assemble model")?;
    Reporter::report_model(config.kind.label(), model, start.elapsed());

    let format = io::export_model(model, output)?;
    Reporter::success(&format!("Wrote {:?} to {}", format, output.display()));
    Ok(())
}

fn texture_command(
    source: &Source,
    output: &Path,
    settings: EngineSettings,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let config = source.load()?;
    let mut texture = settings.texture;
    texture.width = width.unwrap_or(texture.width);
    texture.height = height.unwrap_or(texture.height);

    let image = TextureSynthesizer::new(texture)
        .render(&config)
        .context("Failed to synthesize texture")?;
    io::export_png(&image, output)?;
    Reporter::success(&format!(
        "Wrote {}x{} texture to {}",
        image.width(),
        image.height(),
        output.display()
    ));
    Ok(())
}

fn inspect_command(source: &Source, settings: EngineSettings, json: bool) -> Result<()> {
    let config = source.load()?;
    let start = Instant::now();
    let model = skiform::assembly::compute(&config, &settings)?;
    let elapsed = start.elapsed();

    if json {
        let bbox = model.bounding_box();
        let summary = serde_json::json!({
            "type": config.kind,
            "instances": model.instances.len(),
            "vertices": model.vertex_count(),
            "triangles": model.triangle_count(),
            "bindingParts": model.bindings.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "boundingBox": { "min": bbox.min.coords.as_slice(), "max": bbox.max.coords.as_slice() },
            "textureFallback": model.texture_fallback,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        Reporter::report_configuration(&config);
        Reporter::report_model(config.kind.label(), &model, elapsed);
    }
    Ok(())
}

fn preset_command(kind: Kind, output: Option<&Path>) -> Result<()> {
    let config = Configuration::preset(kind.into());
    let json = serde_json::to_string_pretty(&config)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            Reporter::success(&format!("Wrote preset to {}", path.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn suggest_command(
    source: &Source,
    prompt: Option<String>,
    response: Option<PathBuf>,
    output: Option<&Path>,
    settings: EngineSettings,
) -> Result<()> {
    let config = source.load()?;
    let Some(prompt) = prompt else {
        Reporter::report_info(&format!("Quick prompts for {}:", config.kind.label()));
        for quick in quick_prompts(config.kind) {
            println!("  {quick}");
        }
        return Ok(());
    };
    let Some(response) = response else {
        bail!("No transport configured; pass the assistant's answer with --response <FILE|->");
    };

    // Offline transport: the answer was produced elsewhere
    let answer = read_response(&response)?;
    let mut client = SuggestionClient::new(
        move |_: &str, _: &CancelToken| -> Result<String, ExternalServiceError> { Ok(answer.clone()) },
        settings.suggestion_timeout(),
    );
    client.submit(&prompt, &config);
    let Some(outcome) = client.wait(&config) else {
        bail!("Suggestion request produced no outcome");
    };
    Reporter::report_suggestion(&outcome);

    let SuggestionOutcome::Applied { config: next, .. } = outcome else {
        std::process::exit(1);
    };
    let json = serde_json::to_string_pretty(&next)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn read_response(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read response from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response: {}", path.display()))
    }
}
