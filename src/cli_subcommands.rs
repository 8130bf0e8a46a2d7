use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List nearby eateries, closest first
    Eats {
        /// Case-insensitive name search
        #[arg(short, long)]
        query: Option<String>,
        /// Activate a filter chip by label (repeatable), e.g. "Near Campus"
        #[arg(long = "chip", value_name = "LABEL")]
        chips: Vec<String>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the community feed
    Feed {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Share a tip with the community
    Post {
        /// Tip text
        text: String,
        /// Tag, e.g. "Near Campus" or "Grocery Hack"
        #[arg(long, default_value = "Near Campus")]
        tag: String,
    },

    /// List featured budget recipes
    Recipes {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the recipe chatbot (one-shot)
    Chat {
        /// Ingredients you have, e.g. "eggs, spinach, tortilla"
        message: String,
    },
}
