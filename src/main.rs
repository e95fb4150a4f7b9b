use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;
use uuid::Uuid;

use crate::{
    config::Config,
    entry_points::{WidgetInstance, render_shortcode, render_widget},
    i18n::Catalog,
    media::UploadsDirectory,
    models::area::{Area, Status},
    services::{
        areas::{
            AreaForm, CreateAreaError, DeleteAreaError, UpdateAreaError, ValidationError,
            create_area, delete_area, list_areas, update_area,
        },
        settings::{SettingsForm, UpdateSettingsError, update_settings},
    },
    storage::{Storage, json::JsonFileStorage},
};

mod assets;
mod config;
mod entry_points;
mod i18n;
mod logging;
mod media;
mod models;
mod render;
mod services;
mod storage;

#[derive(Parser)]
#[command(
    name = "service-areas",
    about = "Manage service areas and render them as a grid of cards"
)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the store file, overrides the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage areas
    #[command(subcommand)]
    Area(AreaCommands),

    /// Manage the grid heading
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Print public markup
    #[command(subcommand)]
    Render(RenderCommands),
}

#[derive(Debug, Subcommand)]
enum AreaCommands {
    /// Create a new area
    New {
        name: String,

        /// Display order, lower numbers first
        #[arg(short, long, default_value = "")]
        order: String,

        /// available, unavailable or coming_soon
        #[arg(short, long, default_value = "")]
        status: String,

        /// File name of an uploaded image shown instead of the flag
        #[arg(short, long, default_value = "")]
        image: String,

        /// Absolute URL the card links to
        #[arg(short, long, default_value = "")]
        link: String,
    },
    /// Edit an area. Omitted fields keep their value, an empty value clears it
    Edit {
        id: Uuid,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        order: Option<String>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        image: Option<String>,

        #[arg(short, long)]
        link: Option<String>,
    },
    /// Delete an area
    Delete { id: Uuid },
    /// List all areas in display order
    List,
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Show the heading used by the shortcode
    Show,
    /// Change the heading. Omitted fields keep their value, an empty value
    /// restores the default
    Set {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        subtitle: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum RenderCommands {
    /// Inline embed using the stored heading
    Shortcode,
    /// Page-builder widget with per-instance overrides
    Widget {
        /// Instance id used to scope the style overrides
        #[arg(long, default_value = "")]
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        subtitle: Option<String>,

        /// Heading color, hex
        #[arg(long)]
        title_color: Option<String>,

        /// Card background color, hex
        #[arg(long)]
        card_background: Option<String>,
    },
    /// Client-side click effect for the cards
    Script,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    logging::init(config.log_format);

    let storage_path = cli.store.clone().unwrap_or_else(|| config.store_path());

    // Create parent directory if it doesn't exist
    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error: Failed to create data directory: {}", e);
            std::process::exit(1);
        });
    }

    let storage = JsonFileStorage::new(storage_path);

    let mut store = match storage.load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load store: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match &config.i18n.catalog {
        Some(path) => Catalog::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => Catalog::default(),
    };

    let media = UploadsDirectory::new(config.uploads_dir(), config.media.base_url.clone());

    match cli.command {
        Commands::Area(AreaCommands::New {
            name,
            order,
            status,
            image,
            link,
        }) => {
            let form = AreaForm {
                name,
                order,
                status,
                custom_image: image,
                link_url: link,
            };
            match create_area(&mut store, &storage, &media, form) {
                Ok(area) => {
                    println!("✓ Area {} created with id {}", area.name.bold(), area.id);
                }
                Err(CreateAreaError::Invalid(e)) => exit_invalid(&e),
                Err(CreateAreaError::Storage(e)) => {
                    eprintln!("Error: Failed to create area: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Area(AreaCommands::Edit {
            id,
            name,
            order,
            status,
            image,
            link,
        }) => {
            let Some(area) = store.get_area(id) else {
                exit_area_not_found(id);
            };

            let mut form = AreaForm::from_area(area);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(order) = order {
                form.order = order;
            }
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(image) = image {
                form.custom_image = image;
            }
            if let Some(link) = link {
                form.link_url = link;
            }

            match update_area(&mut store, &storage, &media, id, form) {
                Ok(area) => println!("✓ Area {} updated", area.name.bold()),
                Err(UpdateAreaError::AreaNotFound(id)) => exit_area_not_found(id),
                Err(UpdateAreaError::Invalid(e)) => exit_invalid(&e),
                Err(UpdateAreaError::Storage(e)) => {
                    eprintln!("Error: Failed to update area: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Area(AreaCommands::Delete { id }) => match delete_area(&mut store, &storage, id) {
            Ok(area) => println!("✓ Area deleted: {}", area.name),
            Err(DeleteAreaError::AreaNotFound(id)) => exit_area_not_found(id),
            Err(DeleteAreaError::Storage(e)) => {
                eprintln!("Error: Failed to delete area: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Area(AreaCommands::List) => {
            let areas = list_areas(&store);

            if areas.is_empty() {
                println!("No areas found");
            } else {
                println!(
                    "{} ({} {})\n",
                    "AREAS".cyan(),
                    areas.len(),
                    if areas.len() == 1 { "area" } else { "areas" }
                );

                for area in areas {
                    render_area_line(area);
                }
            }
        }
        Commands::Settings(SettingsCommands::Show) => {
            println!("{} {}", "Title:".dimmed(), store.settings.title(&catalog));
            println!("{} {}", "Subtitle:".dimmed(), store.settings.subtitle(&catalog));
        }
        Commands::Settings(SettingsCommands::Set { title, subtitle }) => {
            let mut form = SettingsForm::from_settings(&store.settings);
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(subtitle) = subtitle {
                form.subtitle = subtitle;
            }

            match update_settings(&mut store, &storage, form) {
                Ok(_) => println!("✓ Settings saved"),
                Err(UpdateSettingsError::Storage(e)) => {
                    eprintln!("Error: Failed to save settings: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Render(RenderCommands::Shortcode) => {
            print!("{}", render_shortcode(&store, &catalog, &media));
        }
        Commands::Render(RenderCommands::Widget {
            id,
            title,
            subtitle,
            title_color,
            card_background,
        }) => {
            let instance = WidgetInstance {
                id,
                title,
                subtitle,
                title_color,
                card_background,
            };
            print!("{}", render_widget(&store, &instance, &catalog, &media));
        }
        Commands::Render(RenderCommands::Script) => {
            print!("{}", assets::card_script());
        }
    }
}

fn exit_invalid(error: &ValidationError) -> ! {
    eprintln!("Error: The area was not saved. Please fix these fields:");
    for field_error in &error.errors {
        eprintln!("  - {}: {}", field_error.field.as_str().bold(), field_error.message);
    }
    std::process::exit(1);
}

fn exit_area_not_found(id: Uuid) -> ! {
    eprintln!("Error: Area '{}' not found", id);
    eprintln!("\nRun 'service-areas area list' to see area ids.");
    std::process::exit(1);
}

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Available => "available".green(),
        Status::Unavailable => "unavailable".red(),
        Status::ComingSoon => "coming soon".yellow(),
    }
}

/// One area per line: order, name and right-aligned status, then id and link
fn render_area_line(area: &Area) {
    let order = area
        .order
        .map(|o| format!("{:>3}", o))
        .unwrap_or_else(|| "  -".to_string());
    let left_section = format!("  {}  {}", order, area.name);
    let status = status_label(area.status);

    let left_visible_len = left_section.chars().count();
    let right_visible_len = status.chars().count();
    let terminal_width = get_terminal_width();

    if left_visible_len + right_visible_len + 4 < terminal_width {
        let padding = terminal_width - left_visible_len - right_visible_len - 2;
        println!("{}{}{}", left_section.bold(), " ".repeat(padding), status);
    } else {
        println!("{}  {}", left_section.bold(), status);
    }

    println!("       {}", area.id.to_string().dimmed());
    if let Some(link) = &area.link_url {
        println!("       {} {}", "Link:".dimmed(), link.blue());
    }
    if let Some(image) = &area.custom_image {
        println!("       {} {}", "Image:".dimmed(), image);
    }
    println!();
}
