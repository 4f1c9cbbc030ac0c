use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Show the cached entry and whether it is still usable (default)
    #[command(alias = "s")]
    Show {
        /// Print the raw stored JSON
        #[arg(short, long)]
        raw: bool,
    },

    /// Print the cache file location
    Path,

    /// Remove the cached entry
    Clear,
}
