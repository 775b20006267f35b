use clap::{Args, Parser, Subcommand};
use instdir_core::{FilterParams, ListQuery, PageParams};

/// CLI arguments for instdir-cli
#[derive(Debug, Parser)]
#[command(
    name = "instdir",
    version,
    about = "CLI for querying and inspecting the ranked institution directory"
)]
pub struct CliArgs {
    /// Dataset to load: a raw `.json`/`.json.gz` export or a built binary
    /// (default: the dataset bundled with instdir-core)
    #[arg(short = 'i', long = "input", global = true, env = "INSTDIR_DATA")]
    pub input: Option<String>,

    /// Optional comma-separated list of countries to load (e.g. Austria,Brazil)
    #[arg(short = 'f', long = "countries", global = true, env = "INSTDIR_COUNTRY_FILTER")]
    pub countries: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// List distinct country names
    Countries,

    /// Filter, order and page through institutions
    List(ListArgs),

    /// Show one institution with every indicator
    Show {
        /// Institution identity
        id: String,
    },

    /// Convert a raw export into a binary dataset
    #[cfg(feature = "builder")]
    Build {
        /// Raw `.json` or `.json.gz` export
        source: String,
        /// Output path for the binary dataset
        out: String,
        /// Write uncompressed even when gzip is available
        #[arg(long)]
        no_compress: bool,
    },
}

/// Same parameters as the HTTP list endpoint. Values are passed through
/// unparsed so bad input is dropped the same way.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Substring of name or country (case- and accent-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Exact normalized rank
    #[arg(long)]
    pub rank: Option<String>,
    #[arg(long)]
    pub rank_gte: Option<String>,
    #[arg(long)]
    pub rank_lte: Option<String>,
    #[arg(long)]
    pub rank_gt: Option<String>,
    #[arg(long)]
    pub rank_lt: Option<String>,
    /// Very High, High, Medium or Low
    #[arg(long)]
    pub research: Option<String>,
    /// Extra Large, Large, Medium or Small
    #[arg(long)]
    pub size: Option<String>,
    /// Full comprehensive, Comprehensive, Focused or Specialist
    #[arg(long)]
    pub focus: Option<String>,
    /// Comma-separated fields, `-` for descending (e.g. `-rank,name`)
    #[arg(short, long)]
    pub ordering: Option<String>,
    #[arg(short, long)]
    pub page: Option<String>,
    #[arg(long)]
    pub page_size: Option<String>,
}

impl From<ListArgs> for ListQuery {
    fn from(a: ListArgs) -> Self {
        ListQuery {
            filter: FilterParams {
                search: a.search,
                country: a.country,
                rank: a.rank,
                rank_gte: a.rank_gte,
                rank_lte: a.rank_lte,
                rank_gt: a.rank_gt,
                rank_lt: a.rank_lt,
                research: a.research,
                size: a.size,
                focus: a.focus,
            },
            ordering: a.ordering,
            page: PageParams {
                page: a.page,
                page_size: a.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_flags_map_onto_the_query() {
        let args = CliArgs::parse_from([
            "instdir", "list", "--country", "Austria", "--rank-gte", "600", "-o", "-rank,name",
            "--page-size", "5",
        ]);
        let Commands::List(list) = args.command else {
            panic!("expected list");
        };
        let q = ListQuery::from(list);
        assert_eq!(q.filter.country.as_deref(), Some("Austria"));
        assert_eq!(q.filter.rank_gte.as_deref(), Some("600"));
        assert_eq!(q.ordering.as_deref(), Some("-rank,name"));
        assert_eq!(q.page.page_size.as_deref(), Some("5"));
        assert!(q.page.page.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["instdir", "show", "42", "--json", "-i", "x.bin"]);
        assert!(args.json);
        assert_eq!(args.input.as_deref(), Some("x.bin"));
        assert!(matches!(args.command, Commands::Show { ref id } if id == "42"));
    }

    #[test]
    fn clap_config_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
