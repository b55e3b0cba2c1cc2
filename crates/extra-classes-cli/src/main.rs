use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, ArgGroup, Parser};
use extra_classes_config::Config;
use extra_classes_engine::ancestors::menu_item_ancestor_ids;
use extra_classes_engine::{
    ClassList, GenericToggle, MenuItem, MenuPipeline, ObjectId, PageContext, PipelineRun,
    RenderArgs, SiteSnapshot, Stage, TemplateRegistry, View,
};
use std::path::{Path, PathBuf};

/// Replay one menu render against a site snapshot and print the resulting classes.
#[derive(Debug, Parser)]
#[command(name = "extra-classes", version, about)]
#[command(group(ArgGroup::new("view").multiple(false)))]
struct Cli {
    /// Site snapshot (TOML); defaults to `site` from the config file
    #[arg(long)]
    site: Option<PathBuf>,

    /// Config file; defaults to ~/.config/extra-classes/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// View a single content object instead of the snapshot's context
    #[arg(long, value_name = "OBJECT_ID", group = "view")]
    single: Option<u64>,

    /// View a post type archive
    #[arg(long, value_name = "POST_TYPE", group = "view")]
    archive: Option<String>,

    /// View a term archive, e.g. `category:news`
    #[arg(long, value_name = "TAXONOMY:SLUG", group = "view", value_parser = parse_term)]
    term: Option<(String, String)>,

    /// View the not-found page
    #[arg(long, group = "view")]
    not_found: bool,

    /// Menu name passed to item filters
    #[arg(long)]
    menu: Option<String>,

    /// Print only the classes each item gained or lost
    #[arg(long)]
    diff: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn view(&self) -> Option<View> {
        if let Some(id) = self.single {
            Some(View::Single(ObjectId(id)))
        } else if let Some(post_type) = &self.archive {
            Some(View::Archive(post_type.clone()))
        } else if let Some((taxonomy, slug)) = &self.term {
            Some(View::Term {
                taxonomy: taxonomy.clone(),
                slug: slug.clone(),
            })
        } else if self.not_found {
            Some(View::NotFound)
        } else {
            None
        }
    }
}

fn parse_term(arg: &str) -> Result<(String, String), String> {
    match arg.split_once(':') {
        Some((taxonomy, slug)) if !taxonomy.is_empty() && !slug.is_empty() => {
            Ok((taxonomy.to_string(), slug.to_string()))
        }
        _ => Err(format!("expected TAXONOMY:SLUG, got '{arg}'")),
    }
}

fn build_pipeline(config: &Config) -> MenuPipeline {
    let mut registry = if config.builtin_states {
        TemplateRegistry::with_builtin_states()
    } else {
        TemplateRegistry::new()
    };
    for state in &config.selected_states {
        registry.register_selected(state);
    }
    for state in &config.deselected_states {
        registry.register_deselected(state);
    }

    MenuPipeline::new(registry)
        .with_toggle(GenericToggle {
            type_prefix: config.toggle.type_prefix.clone(),
            taxonomy_prefix: config.toggle.taxonomy_prefix.clone(),
        })
        .with_stage(Stage::ContextualHighlight, config.stages.contextual)
        .with_stage(Stage::StateTemplates, config.stages.states)
        .with_stage(Stage::GenericToggle, config.stages.toggle)
}

fn load_site(path: &Path) -> Result<SiteSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read site snapshot {}", path.display()))?;
    let site: SiteSnapshot = toml::from_str(&content)
        .with_context(|| format!("Failed to parse site snapshot {}", path.display()))?;
    if let Err(e) = site.validate() {
        log::warn!("Site snapshot {} is inconsistent: {e}", path.display());
    }
    Ok(site)
}

fn render(menu: &[MenuItem], run: &PipelineRun, diff_only: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (before, item) in menu.iter().zip(&run.items) {
        let depth = menu_item_ancestor_ids(item.id, run.items.as_slice())
            .map(|ancestors| ancestors.len())
            .unwrap_or(0);
        let indent = "  ".repeat(depth);
        let title = if item.title.is_empty() {
            format!("#{}", item.id)
        } else {
            item.title.clone()
        };

        if diff_only {
            let diff = ClassList::diff(&before.classes, &item.classes);
            if diff.is_empty() {
                continue;
            }
            let changes: Vec<String> = diff
                .added
                .iter()
                .map(|c| format!("+{c}"))
                .chain(diff.removed.iter().map(|c| format!("-{c}")))
                .collect();
            lines.push(format!("{indent}{title}: {}", changes.join(" ")));
        } else {
            let classes: Vec<&str> = item.classes.iter().collect();
            lines.push(format!("{indent}{title}: {}", classes.join(" ")));
        }
    }
    lines
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    }
    .unwrap_or_default();

    let Some(site_path) = cli.site.clone().or_else(|| config.site.clone()) else {
        bail!(
            "No site snapshot given; pass --site or set `site` in {}",
            cli.config
                .clone()
                .unwrap_or_else(Config::default_path)
                .display()
        );
    };
    let site = load_site(&site_path)?;

    let context: PageContext = match cli.view() {
        Some(view) => site
            .context_for(&view)
            .ok_or_else(|| anyhow!("Site snapshot has nothing to show for {view:?}"))?,
        None => site.context.clone(),
    };
    let args = RenderArgs {
        menu: cli.menu.clone(),
        ..RenderArgs::default()
    };

    let pipeline = build_pipeline(&config);
    let run = pipeline.run(site.menu.clone(), &context, &args, &site);

    for line in render(&site.menu, &run, cli.diff) {
        println!("{line}");
    }
    for failure in &run.failures {
        eprintln!("Warning: stage '{}' skipped: {}", failure.stage, failure.error);
    }

    Ok(())
}
