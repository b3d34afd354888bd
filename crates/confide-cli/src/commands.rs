use crate::diary_commands::DiaryCommands;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Must match --password when given
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Continue without an account
    Anonymous,

    /// Sign out and forget the local session
    Logout,

    /// Show the current identity
    Whoami,

    /// List the moods an entry can carry
    Moods,

    /// Private diary operations (registered users only)
    Diary {
        #[command(subcommand)]
        action: DiaryCommands,
    },
}
