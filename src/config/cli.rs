use crate::domain::model::PhonePolicy;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PhonePolicyArg {
    Strict,
    Lenient,
}

impl From<PhonePolicyArg> for PhonePolicy {
    fn from(arg: PhonePolicyArg) -> Self {
        match arg {
            PhonePolicyArg::Strict => PhonePolicy::Strict,
            PhonePolicyArg::Lenient => PhonePolicy::Lenient,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "clinic-site")]
#[command(about = "Replays page events against the clinic site's front-end state machines")]
pub struct CliConfig {
    /// Path to the TOML site configuration
    #[arg(short, long, default_value = "site.toml")]
    pub config: String,

    /// JSON Lines event script to replay
    #[arg(short, long)]
    pub script: Option<String>,

    /// Address fragment present at page load (e.g. "#contact")
    #[arg(long)]
    pub fragment: Option<String>,

    /// Override the phone validation policy from the config
    #[arg(long, value_enum)]
    pub phone_policy: Option<PhonePolicyArg>,

    /// Sleep through script waits instead of only advancing virtual time
    #[arg(long)]
    pub realtime: bool,

    /// Validate the config and print the page-load effects only
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
