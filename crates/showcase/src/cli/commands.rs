//! # CLI Dispatch
//!
//! The CLI layer is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Parses arguments
//! - Formats output for humans
//!
//! `run` parses arguments, builds the context (which seeds a fresh data directory),
//! dispatches to one handler per command and prints what the handler renders.

use super::render::{self, FeaturedCard};
use super::setup::{parse_cli, AdminCommands, BulkArgs, Cli, Commands, ImageCommands, ThemeChoice};
use anyhow::{Context, Result};
use showcaseapp::api::ShowcaseApi;
use showcaseapp::blob::fs::FsBlobBackend;
use showcaseapp::commands::services::BulkAction;
use showcaseapp::commands::CmdResult;
use showcaseapp::init::{initialize, ShowcaseContext};
use showcaseapp::model::{FeaturedDraft, ServiceDraft, Theme};
use showcaseapp::seed::SeedReport;
use showcaseapp::query::{
    AdminSort, CategoryFilter, Selection, ServiceQuery, SortDirection, SortField,
};
use showcaseapp::store::fs::FileStore;
use tracing_subscriber::EnvFilter;

type Api = ShowcaseApi<FileStore, FsBlobBackend>;

pub const LOG_ENV: &str = "SHOWCASE_LOG";

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let ShowcaseContext {
        mut api,
        data_dir,
        seed_report,
    } = initialize(cli.data.clone()).context("failed to open the catalog")?;
    tracing::debug!(data_dir = %data_dir.display(), "catalog opened");

    let result = dispatch(&mut api, cli, &seed_report);
    api.close();
    result
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(api: &mut Api, cli: Cli, startup: &SeedReport) -> Result<()> {
    match cli.command {
        None => handle_store(api, "all", ""),
        Some(Commands::Store { category, search }) => handle_store(api, &category, &search),
        Some(Commands::Featured) => handle_featured(api),
        Some(Commands::Admin { command }) => handle_admin(api, command),
        Some(Commands::Image { command }) => handle_image(api, command),
        Some(Commands::Theme { choice }) => handle_theme(api, choice),
        Some(Commands::Seed) => handle_seed(api, startup),
    }
}

fn print_result(result: &CmdResult) {
    print!("{}", render::render_messages(&result.messages));
}

fn handle_store(api: &Api, category: &str, search: &str) -> Result<()> {
    let query = ServiceQuery::new(CategoryFilter::parse(category), search);
    let result = api.storefront_services(&query)?;
    let icons: Vec<String> = result
        .listed_services
        .iter()
        .map(|s| api.resolve_image(&s.icon))
        .collect();
    print!("{}", render::render_storefront(&result.listed_services, &icons));
    Ok(())
}

fn handle_featured(api: &Api) -> Result<()> {
    let result = api.storefront_featured()?;
    let mut cards = Vec::new();
    for item in result.listed_featured {
        let recommended = api
            .recommended_services(&item)?
            .into_iter()
            .filter(|s| s.is_live())
            .collect();
        cards.push(FeaturedCard {
            image_url: api.resolve_image(&item.image),
            item,
            recommended,
        });
    }
    print!("{}", render::render_featured(&cards));
    Ok(())
}

fn handle_admin(api: &mut Api, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Services { sort, desc } => {
            let field: SortField = sort.parse().map_err(anyhow::Error::msg)?;
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            let result = api.admin_services(&AdminSort::new(field, direction))?;
            print!("{}", render::render_admin_services(&result.listed_services));
        }
        AdminCommands::Add(fields) => {
            let mut draft = ServiceDraft::default();
            fields.apply(&mut draft);
            let result = api.save_service(draft, None)?;
            print_result(&result);
            if let Some(created) = result.affected_services.first() {
                println!("{}", created.id);
            }
        }
        AdminCommands::Edit { id, fields } => {
            let mut draft = api.get_service(id)?.to_draft();
            fields.apply(&mut draft);
            print_result(&api.save_service(draft, Some(id))?);
        }
        AdminCommands::Delete(target) => run_bulk(api, target, BulkAction::Delete)?,
        AdminCommands::Publish(target) => run_bulk(api, target, BulkAction::Publish)?,
        AdminCommands::Unpublish(target) => run_bulk(api, target, BulkAction::Unpublish)?,
        AdminCommands::Toggle { id } => print_result(&api.toggle_published(id)?),
        AdminCommands::Retire(target) => run_bulk(api, target, BulkAction::Retire)?,
        AdminCommands::Restore(target) => run_bulk(api, target, BulkAction::Restore)?,
        AdminCommands::FeaturedList => {
            let result = api.admin_featured()?;
            print!("{}", render::render_admin_featured(&result.listed_featured));
        }
        AdminCommands::AddFeatured(mut fields) => {
            let mut draft = FeaturedDraft::new("", "", "");
            fields.apply(&mut draft);
            for service_id in &fields.recommend {
                api.toggle_recommended(&mut draft, *service_id)?;
            }
            let result = api.save_featured(draft, None)?;
            print_result(&result);
            if let Some(created) = result.affected_featured.first() {
                println!("{}", created.id);
            }
        }
        AdminCommands::EditFeatured { id, mut fields } => {
            let mut draft = api.get_featured(id)?.to_draft();
            fields.apply(&mut draft);
            for service_id in &fields.recommend {
                api.toggle_recommended(&mut draft, *service_id)?;
            }
            print_result(&api.save_featured(draft, Some(id))?);
        }
        AdminCommands::DeleteFeatured { id } => print_result(&api.delete_featured(id)?),
    }
    Ok(())
}

fn run_bulk(api: &mut Api, target: BulkArgs, action: BulkAction) -> Result<()> {
    let mut selection = Selection::new();
    if target.all {
        api.toggle_select_all(&mut selection)?;
    }
    for id in target.ids {
        if !selection.contains(id) {
            selection.toggle(id);
        }
    }
    print_result(&api.apply_to_selection(&mut selection, action)?);
    Ok(())
}

fn handle_image(api: &Api, command: ImageCommands) -> Result<()> {
    match command {
        ImageCommands::Add { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let key = api.upload_image(&bytes)?;
            println!("{}", key);
        }
        ImageCommands::Resolve { reference } => {
            let resolution = api.try_resolve_image(&reference);
            print!("{}", render::render_resolution(&reference, &resolution));
        }
        ImageCommands::Export { key, output } => {
            let bytes = api.export_image(key)?;
            std::fs::write(&output, &bytes)
                .with_context(|| format!("cannot write {}", output.display()))?;
            println!("Exported to {}", output.display());
        }
    }
    Ok(())
}

fn handle_theme(api: &mut Api, choice: Option<ThemeChoice>) -> Result<()> {
    let theme = match choice {
        None => api.theme()?,
        Some(ThemeChoice::Light) => api.set_theme(Theme::Light)?,
        Some(ThemeChoice::Dark) => api.set_theme(Theme::Dark)?,
        Some(ThemeChoice::Toggle) => api.toggle_theme()?,
    };
    println!("{}", theme);
    Ok(())
}

fn handle_seed(api: &mut Api, startup: &SeedReport) -> Result<()> {
    // Opening the catalog already seeds it; report that pass plus anything left over.
    let again = api.seed()?;
    let services = startup.seeded_services + again.seeded_services;
    let featured = startup.seeded_featured + again.seeded_featured;
    let patched = startup.patched_services
        + startup.patched_featured
        + again.patched_services
        + again.patched_featured;
    if services + featured + patched > 0 {
        println!(
            "Seeded {} services and {} featured entries, patched {} records",
            services, featured, patched
        );
    } else {
        println!("Catalog is up to date");
    }
    Ok(())
}
