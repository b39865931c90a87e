use attrset::error::{AttrError, Result};
use attrset::escape::{escape, unescape};
use attrset::AttributeSet;
use clap::Parser;
use colored::*;
use tracing::debug;

mod args;
use args::{BuildArgs, Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            build,
            add_class,
            remove_class,
            json,
        } => handle_render(&build, &add_class, &remove_class, json),
        Commands::HasClass { class, build } => handle_has_class(&build, &class),
        Commands::Escape { text } => {
            println!("{}", escape(&text));
            Ok(())
        }
        Commands::Unescape { text } => {
            println!("{}", unescape(&text));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build a set from the file (if any), then apply the --set assignments in order.
fn build_set(build: &BuildArgs) -> Result<AttributeSet> {
    let mut attrs = match &build.from {
        Some(path) => {
            debug!(path = %path.display(), "loading attributes");
            AttributeSet::load(path)?
        }
        None => AttributeSet::new(),
    };

    for assignment in &build.set {
        let (name, value) = parse_assignment(assignment)?;
        attrs.set_attribute(name, value);
    }

    Ok(attrs)
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(AttrError::InvalidAssignment(assignment.to_string())),
    }
}

fn handle_render(
    build: &BuildArgs,
    add_class: &[String],
    remove_class: &[String],
    json: bool,
) -> Result<()> {
    let mut attrs = build_set(build)?;

    for classes in add_class {
        attrs.add_class(classes.as_str());
    }
    for classes in remove_class {
        attrs.remove_class(classes.as_str());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&attrs)?);
    } else {
        println!("{}", attrs);
    }
    Ok(())
}

fn handle_has_class(build: &BuildArgs, class: &str) -> Result<()> {
    let attrs = build_set(build)?;
    println!("{}", attrs.has_class(class));
    Ok(())
}
