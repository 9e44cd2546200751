use clap::{Parser, Subcommand};
use respimg::aspect::select_aspect_ratio_with_default;
use respimg::resolve::{self, Variant};
use respimg::types::ResolutionRequest;
use respimg::{config, output, render};
use std::path::{Path, PathBuf};

/// Shared flags for commands that resolve a request.
#[derive(clap::Args, Clone)]
struct RequestArgs {
    /// Request JSON file (use `-` for stdin)
    request: PathBuf,

    /// Override the request's aspect ratio name
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Resolve for <amp-img> instead of <picture>
    #[arg(long)]
    amp: bool,
}

impl RequestArgs {
    fn variant(&self) -> Variant {
        if self.amp { Variant::Amp } else { Variant::Picture }
    }
}

#[derive(Parser)]
#[command(name = "respimg")]
#[command(about = "Responsive image markup from image API metadata")]
#[command(long_about = "\
Responsive image markup from image API metadata

Reads a request JSON file describing one image and prints the attributes or
markup for a <picture> element, or an <amp-img> element with --amp.

Request shape:

  {
    \"image\": { \"fallback\": \"...\", \"aspect_ratios\": { ... }, \"short_caption\": \"...\" },
    \"aspectRatio\": \"widescreen\",
    \"elementClass\": \"hero\",
    \"sizes\": \"(min-width: 960px) 720px, 100vw\",
    \"fallbackSrc\": \"...\", \"fallbackSrcSet\": \"...\", \"alt\": \"...\",
    \"fallbackWidth\": \"900\", \"fallbackHeight\": \"500\"
  }

Either \"image\" or \"fallbackSrc\" is required. Without \"image\", \"alt\" is
required too.

Aspect ratio resolution (first available wins):
  requested name → preferredAspectRatio → preferred slug → uncropped

Run 'respimg gen-config' to generate a documented respimg.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing respimg.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print resolved attributes as JSON
    Attrs(RequestArgs),
    /// Print rendered HTML markup
    Render(RequestArgs),
    /// Validate a request without rendering
    Check(RequestArgs),
    /// Print a stock respimg.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Attrs(args) => {
            let render_config = config::load_config(&cli.config_dir)?;
            let request = read_request(&args)?;
            let attrs = resolve::resolve_attributes(&request, args.variant(), &render_config)?;
            output::print_diagnostics(&attrs.diagnostics);
            println!("{}", serde_json::to_string_pretty(&attrs)?);
        }
        Command::Render(args) => {
            let render_config = config::load_config(&cli.config_dir)?;
            let request = read_request(&args)?;
            let rendered = render::render(&request, args.variant(), &render_config)?;
            output::print_diagnostics(&rendered.attributes.diagnostics);
            println!("{}", rendered.markup.into_string());
        }
        Command::Check(args) => {
            let render_config = config::load_config(&cli.config_dir)?;
            let request = read_request(&args)?;
            let attrs = resolve::resolve_attributes(&request, args.variant(), &render_config)?;
            let selection = select_aspect_ratio_with_default(
                &request,
                render_config.aspect_ratio.precedence,
                &render_config.aspect_ratio.default,
            );
            output::print_check_output(&request, &selection, &attrs);
            output::print_diagnostics(&attrs.diagnostics);
            println!("Request is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read the request JSON and apply command-line overrides.
fn read_request(args: &RequestArgs) -> Result<ResolutionRequest, Box<dyn std::error::Error>> {
    let content = read_input(&args.request)?;
    let mut request: ResolutionRequest = serde_json::from_str(&content)?;
    if let Some(name) = &args.aspect_ratio {
        request.aspect_ratio = Some(name.clone());
    }
    Ok(request)
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    }
}
