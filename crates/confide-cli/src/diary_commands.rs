use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum DiaryCommands {
    /// List your entries, newest first
    List,

    /// Write a new entry
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// One of the values printed by `confide moods`
        #[arg(long)]
        mood: Option<String>,
    },

    /// Edit an entry; omitted fields keep their current value
    Edit {
        /// Entry ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Pass an empty value to clear the mood
        #[arg(long)]
        mood: Option<String>,
    },

    /// Delete an entry permanently
    Delete {
        /// Entry ID
        id: String,
    },
}
