// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, anyhow};
use config::Config;
use std::env;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tierview_app::{Navigator, PaneRect, ParseOutcome, Tree, load_outline, require_categories};
use tierview_tui::Theme;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `tierview --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    if let Some(log_path) = logging::init(&config)? {
        tracing::debug!(path = %log_path.display(), "file logging enabled");
    }

    let document = resolve_document(options.document.clone(), &config, &options.config_path)?;
    let outcome = load_outline(&document)?;

    if options.check_only {
        print!("{}", check_report(&document, &outcome));
        require_categories(outcome.tree, &document)?;
        return Ok(());
    }

    if options.dump {
        let json = serde_json::to_string_pretty(&outcome.tree).context("serialize outline")?;
        println!("{json}");
        return Ok(());
    }

    let tree = require_categories(outcome.tree, &document)?;
    let mut navigator = Navigator::new(tree, config.layout_spec(), PaneRect::default());
    tierview_tui::run_app(&mut navigator, &Theme::default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    document: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    dump: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        document: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        dump: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown if unknown.starts_with('-') => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
            path => {
                if let Some(existing) = &options.document {
                    return Err(anyhow!(
                        "unexpected extra document {path:?}; already opening {}",
                        existing.display()
                    ));
                }
                options.document = Some(PathBuf::from(path));
            }
        }
    }

    Ok(options)
}

/// The command line beats `[source].document`.
fn resolve_document(
    from_args: Option<PathBuf>,
    config: &Config,
    config_path: &Path,
) -> Result<PathBuf> {
    from_args.or_else(|| config.document()).ok_or_else(|| {
        anyhow!(
            "no outline document given; pass a path or set [source].document in {}",
            config_path.display()
        )
    })
}

fn check_report(document: &Path, outcome: &ParseOutcome) -> String {
    let counts = TreeCounts::of(&outcome.tree);
    let mut report = format!(
        "{}: {} categories, {} functions ({} without sub-items), {} sub-items, {} detail lines\n",
        document.display(),
        counts.categories,
        counts.functions,
        counts.bare_functions,
        counts.sub_items,
        counts.details,
    );
    let _ = writeln!(
        report,
        "{} entries, {} ignored lines",
        outcome.accepted_lines,
        outcome.diagnostics.len()
    );
    for diagnostic in &outcome.diagnostics {
        let _ = writeln!(report, "  {diagnostic}");
    }
    report
}

#[derive(Debug, Default, PartialEq, Eq)]
struct TreeCounts {
    categories: usize,
    functions: usize,
    bare_functions: usize,
    sub_items: usize,
    details: usize,
}

impl TreeCounts {
    fn of(tree: &Tree) -> Self {
        let mut counts = Self {
            categories: tree.category_count(),
            ..Self::default()
        };
        for function in tree.categories.iter().flat_map(|category| &category.functions) {
            counts.functions += 1;
            if !function.has_sub_items() {
                counts.bare_functions += 1;
            }
            counts.sub_items += function.sub_item_count();
            counts.details += function.detail_count()
                + function
                    .sub_items
                    .iter()
                    .map(|sub_item| sub_item.detail_count())
                    .sum::<usize>();
        }
        counts
    }
}

fn print_help() {
    println!("tierview [options] [document]");
    println!("  Browse an indented category/function/option outline in four panes.");
    println!();
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Parse the document and report counts and ignored lines");
    println!("  --dump                   Print the parsed outline as JSON");
    println!("  --help                   Show this help");
}
