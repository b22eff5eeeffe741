use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mmsearch", version, about = "Multimodal visual search, VQA and index admin client")]
pub struct Cli {
    /// Backend base URL (overrides config.toml and APP_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check backend liveness
    Health,

    /// Print backend metrics text
    Metrics,

    /// Print index statistics
    Stats,

    /// Search images by text, image, or both
    Search(SearchArgs),

    /// Ask a question about an image
    Ask {
        image: String,
        question: String,
    },

    /// Caption an image
    Describe {
        image: String,
    },

    /// Build or extend the index
    #[command(subcommand)]
    Index(IndexCommands),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub mode: SearchMode,
}

#[derive(Subcommand, Debug)]
pub enum SearchMode {
    /// Text → image
    Text {
        query: String,
        /// Top-k results (1-60; non-numeric falls back to 12)
        #[arg(long, default_value = "")]
        k: String,
        /// Optional similarity threshold
        #[arg(long, default_value = "")]
        threshold: String,
    },

    /// Image → image
    Image {
        image: String,
        #[arg(long, default_value = "")]
        k: String,
    },

    /// Text + image
    Multimodal {
        image: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        k: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum IndexCommands {
    /// (Re)build the index from a server-side directory
    Build {
        /// Image directory on the server; omitted when not given
        #[arg(long)]
        image_dir: Option<String>,
        /// Skip index training
        #[arg(long)]
        no_train: bool,
    },

    /// Upload images; directories are walked for image files
    Add {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}
