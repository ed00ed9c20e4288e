use clap::{Parser, Subcommand};
use static_pages::compile::{CompileReport, Compiler, TEMPLATES_SUBDIR};
use static_pages::{config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that render pages.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Templates directory, relative to the input root
    #[arg(long, default_value = TEMPLATES_SUBDIR)]
    templates: String,

    /// Print the compile report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn version_string() -> &'static str {
    if env!("STATIC_PAGES_RELEASE") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("STATIC_PAGES_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "static-pages")]
#[command(about = "Compile Handlebars templates into static HTML pages")]
#[command(long_about = "\
Compile Handlebars templates into static HTML pages

Every template is rendered once, at build time, with its helpers and
partials resolved by name. The output tree mirrors the templates tree.

Input layout (under the input root):

  static-pages/
  ├── helpers/                     # Rhai scripts, one helper per file
  │   ├── title-helper.rhai        # {{title-helper}}
  │   └── nested/nested-helper.rhai  # {{nested/nested-helper}}
  ├── partials/                    # Handlebars fragments
  │   └── footer.hbs               # {{> footer}}
  └── templates/                   # One page per file
      ├── index.hbs                # → compiled-templates/index.html
      └── docs/intro.hbs           # → compiled-templates/docs/intro.html

Referencing a helper or partial that does not exist is an error.

Run 'static-pages gen-config' to print a documented static-pages.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Base directory the input and output roots are relative to
    #[arg(long, default_value = ".", global = true)]
    app_root: PathBuf,

    /// Input root (overrides static-pages.toml)
    #[arg(long, global = true)]
    input: Option<String>,

    /// Output root (overrides static-pages.toml)
    #[arg(long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove the output root, then compile every template
    Build(RenderArgs),
    /// Compile every template into the existing output root
    Compile(RenderArgs),
    /// Remove the output root
    Clean,
    /// Load helpers and partials and list the pages a build would write
    Check {
        /// Templates directory, relative to the input root
        #[arg(long, default_value = TEMPLATES_SUBDIR)]
        templates: String,
    },
    /// Print a stock static-pages.toml with all options documented
    GenConfig,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("static_pages=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    match &cli.command {
        Command::Build(args) => {
            let mut compiler = compiler_from(&cli)?;
            if !args.json {
                println!("==> Building {}", compiler.config().input_dir().display());
            }
            let report = compiler.rebuild(&args.templates)?;
            print_report(&report, args.json)?;
        }
        Command::Compile(args) => {
            let mut compiler = compiler_from(&cli)?;
            if !args.json {
                println!("==> Compiling {}", compiler.config().input_dir().display());
            }
            let report = compiler.compile(&args.templates)?;
            print_report(&report, args.json)?;
        }
        Command::Clean => {
            let mut compiler = compiler_from(&cli)?;
            compiler.cleanup()?;
            println!("==> Removed {}", compiler.config().output_dir().display());
        }
        Command::Check { templates } => {
            let compiler = compiler_from(&cli)?;
            println!("==> Checking {}", compiler.config().input_dir().display());
            let (_registry, helpers, partials) = compiler.load_registry()?;
            let templates = compiler.discover_templates(templates)?;
            output::print_check_output(&helpers, &partials, &templates);
            println!("==> Inputs are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the run config: `static-pages.toml` in the app root, then CLI overrides.
fn compiler_from(cli: &Cli) -> Result<Compiler, Box<dyn std::error::Error>> {
    let app_root = std::path::absolute(&cli.app_root)?;
    let file_config = config::load_config(&app_root)?;
    let site_config = config::CompilerConfig::new(
        app_root,
        cli.input.as_deref().unwrap_or(&file_config.input_root),
        cli.output.as_deref().unwrap_or(&file_config.output_root),
    )?;
    Ok(Compiler::new(site_config))
}

fn print_report(report: &CompileReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        output::print_compile_output(report);
    }
    Ok(())
}
