use clap::{Args, Parser, Subcommand, ValueEnum};
use showcaseapp::blob::BlobKey;
use showcaseapp::model::{FeaturedDraft, RecordId, ServiceDraft};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "showcase",
    bin_name = "showcase",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Storefront and admin console for a local service catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SHOWCASE_DATA, then the OS data directory)
    #[arg(long, global = true, help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse published services
    #[command(display_order = 1)]
    Store {
        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show featured entries and the services they recommend
    #[command(display_order = 2)]
    Featured,

    /// Manage services and featured entries
    #[command(display_order = 3)]
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Upload, resolve and export images
    #[command(display_order = 4)]
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },

    /// Show or change the theme
    #[command(display_order = 5)]
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },

    /// Seed an empty catalog and apply pending data fixes
    #[command(display_order = 6)]
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List every service, including drafts and retired ones
    Services {
        /// Field to sort by (e.g. title, pricingModel, updatedAt)
        #[arg(long, default_value = "sortOrder")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Create a service
    Add(ServiceFields),

    /// Change fields of a service
    Edit {
        id: RecordId,

        #[command(flatten)]
        fields: ServiceFields,
    },

    /// Permanently delete services
    Delete(BulkArgs),

    /// Publish services
    Publish(BulkArgs),

    /// Unpublish services
    Unpublish(BulkArgs),

    /// Flip the published state of one service
    Toggle { id: RecordId },

    /// Hide services from the storefront without deleting them
    Retire(BulkArgs),

    /// Bring retired services back
    Restore(BulkArgs),

    /// List every featured entry
    #[command(name = "featured")]
    FeaturedList,

    /// Create a featured entry
    AddFeatured(FeaturedFields),

    /// Change fields of a featured entry
    EditFeatured {
        id: RecordId,

        #[command(flatten)]
        fields: FeaturedFields,
    },

    /// Delete a featured entry
    DeleteFeatured { id: RecordId },
}

/// Which services a bulk action applies to.
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Service ids
    #[arg(required_unless_present = "all", num_args = 1..)]
    pub ids: Vec<RecordId>,

    /// Every service in the catalog
    #[arg(long, conflicts_with = "ids")]
    pub all: bool,
}

#[derive(Args, Debug, Default)]
pub struct ServiceFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub short_desc: Option<String>,
    /// Image reference: URL, pic/ asset path or image key
    #[arg(long)]
    pub icon: Option<String>,
    /// Replaces the case images (repeatable)
    #[arg(long = "case-image")]
    pub case_images: Vec<String>,
    /// Replaces the highlights (repeatable)
    #[arg(long = "highlight")]
    pub highlights: Vec<String>,
    #[arg(long)]
    pub service_type: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub pricing_model: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    /// Replaces the feature tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub published: Option<bool>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long = "service-version")]
    pub version: Option<String>,
}

impl ServiceFields {
    /// Overlay the given flags on `draft`; absent flags leave fields alone.
    pub fn apply(self, draft: &mut ServiceDraft) {
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if self.short_desc.is_some() {
            draft.short_desc = self.short_desc;
        }
        if let Some(v) = self.icon {
            draft.icon = v;
        }
        if !self.case_images.is_empty() {
            draft.case_images = self.case_images;
        }
        if !self.highlights.is_empty() {
            draft.highlights = self.highlights;
        }
        if let Some(v) = self.service_type {
            draft.service_type = v;
        }
        if let Some(v) = self.category {
            draft.category = v;
        }
        if let Some(v) = self.pricing_model {
            draft.pricing_model = v;
        }
        if let Some(v) = self.price {
            draft.price = v;
        }
        if self.contact.is_some() {
            draft.contact_info = self.contact;
        }
        if !self.tags.is_empty() {
            draft.feature_tags = self.tags;
        }
        if let Some(v) = self.published {
            draft.is_published = v;
        }
        if self.author.is_some() {
            draft.author = self.author;
        }
        if self.version.is_some() {
            draft.version = self.version;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct FeaturedFields {
    #[arg(long)]
    pub title: Option<String>,
    /// Rich-text body
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Cover image reference
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub publish_date: Option<String>,
    #[arg(long)]
    pub published: Option<bool>,
    /// Add or remove a recommended service (repeatable)
    #[arg(long = "recommend")]
    pub recommend: Vec<RecordId>,
}

impl FeaturedFields {
    /// Overlay the scalar flags on `draft`. Recommendations are toggled separately
    /// so the cap is enforced one id at a time.
    pub fn apply(&mut self, draft: &mut FeaturedDraft) {
        if let Some(v) = self.title.take() {
            draft.title = v;
        }
        if let Some(v) = self.description.take() {
            draft.description = v;
        }
        if let Some(v) = self.content.take() {
            draft.content = v;
        }
        if let Some(v) = self.image.take() {
            draft.image = v;
        }
        if let Some(v) = self.author.take() {
            draft.author = Some(v);
        }
        if let Some(v) = self.publish_date.take() {
            draft.publish_date = Some(v);
        }
        if let Some(v) = self.published.take() {
            draft.is_published = v;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Store an image file and print its key
    Add { path: PathBuf },

    /// Show what an image reference resolves to
    Resolve { reference: String },

    /// Write the bytes stored under a key to a file
    Export { key: BlobKey, output: PathBuf },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_filters() {
        let cli = Cli::try_parse_from(["showcase", "store", "-c", "Workspace", "-s", "access"]).unwrap();
        match cli.command {
            Some(Commands::Store { category, search }) => {
                assert_eq!(category, "Workspace");
                assert_eq!(search, "access");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_bulk_ids() {
        let cli = Cli::try_parse_from(["showcase", "admin", "publish", "1", "2", "3"]).unwrap();
        match cli.command {
            Some(Commands::Admin {
                command: AdminCommands::Publish(target),
            }) => {
                assert_eq!(target.ids, vec![1, 2, 3]);
                assert!(!target.all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn bulk_commands_require_ids() {
        assert!(Cli::try_parse_from(["showcase", "admin", "delete"]).is_err());
    }

    #[test]
    fn bulk_all_replaces_ids() {
        let cli = Cli::try_parse_from(["showcase", "admin", "retire", "--all"]).unwrap();
        match cli.command {
            Some(Commands::Admin {
                command: AdminCommands::Retire(target),
            }) => {
                assert!(target.all);
                assert!(target.ids.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["showcase", "admin", "retire", "--all", "1"]).is_err());
    }

    #[test]
    fn service_fields_overlay_only_given_values() {
        let cli = Cli::try_parse_from([
            "showcase", "admin", "edit", "7", "--price", "49", "--tag", "Hot", "--tag", "New",
        ])
        .unwrap();
        let fields = match cli.command {
            Some(Commands::Admin {
                command: AdminCommands::Edit { id, fields },
            }) => {
                assert_eq!(id, 7);
                fields
            }
            other => panic!("unexpected command: {:?}", other),
        };
        let mut draft = ServiceDraft::new("Keep", "pic/keep.png");
        fields.apply(&mut draft);
        assert_eq!(draft.title, "Keep");
        assert_eq!(draft.price, "49");
        assert_eq!(draft.feature_tags, vec!["Hot", "New"]);
    }

    #[test]
    fn theme_choice_is_optional() {
        let cli = Cli::try_parse_from(["showcase", "theme"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Theme { choice: None })));
        let cli = Cli::try_parse_from(["showcase", "theme", "toggle"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                choice: Some(ThemeChoice::Toggle)
            })
        ));
    }

    #[test]
    fn data_flag_is_global() {
        let cli = Cli::try_parse_from(["showcase", "seed", "--data", "/tmp/x"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
    }
}
