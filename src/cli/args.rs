use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cragbook", version, author, about = "A terminal logbook for your indoor climbing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in as a climber (created on first use)
    Login {
        /// E-mail address; falls back to `user.email` in config.toml
        email: Option<String>,
        /// Display name for a new account
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out of the current climber
    Logout,
    /// Show the signed-in climber
    Whoami,
    /// Update your profile
    Profile {
        /// New display name
        #[arg(long)]
        name: String,
    },
    /// Log a climb
    Log(LogArgs),
    /// List logged climbs
    List {
        /// Only climbs on this day (YYYY-MM-DD, today, yesterday)
        #[arg(long, conflicts_with = "month")]
        date: Option<String>,
        /// Only climbs in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Edit a logged climb
    Edit(EditArgs),
    /// Delete a logged climb
    Delete {
        /// Climb id (see `cragbook list`)
        id: i64,
    },
    /// Show today's climbs by outcome
    Today,
    /// Show weekly streak and monthly statistics
    Stats {
        /// Month to summarize (YYYY-MM); defaults to the latest month climbed
        #[arg(long)]
        month: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List months that have climbs, most recent first
    Months,
    /// Show monthly max-grade progression
    Progression {
        /// Last month to include (YYYY-MM); defaults to the current month
        #[arg(long)]
        upto: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export all your climbs as JSON to stdout
    Export,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Gym name; defaults to `climbing.default_gym`
    #[arg(long)]
    pub gym: Option<String>,
    /// Boulder, top rope, lead or auto belay
    #[arg(long = "type", short = 't')]
    pub route_type: String,
    /// Grade from the configured scale (e.g. 6a+)
    #[arg(long, short = 'g')]
    pub grade: String,
    /// Send, flash, project or attempt
    #[arg(long, short = 'o')]
    pub outcome: String,
    #[arg(long)]
    pub notes: Option<String>,
    /// Link to a photo or video
    #[arg(long)]
    pub media: Option<String>,
    /// Day of the climb (YYYY-MM-DD, today, yesterday)
    #[arg(long, default_value = "today")]
    pub date: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Climb id (see `cragbook list`)
    pub id: i64,
    #[arg(long)]
    pub gym: Option<String>,
    #[arg(long = "type", short = 't')]
    pub route_type: Option<String>,
    #[arg(long, short = 'g')]
    pub grade: Option<String>,
    #[arg(long, short = 'o')]
    pub outcome: Option<String>,
    /// New notes; pass "" to clear
    #[arg(long)]
    pub notes: Option<String>,
    /// New media link; pass "" to clear
    #[arg(long)]
    pub media: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
}
