use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::quantity::KilowattHours;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Synthesize the standard load profile for one day.
    Profile(ProfileArgs),

    /// Reconstruct one day of meter readings at quarter-hour cadence.
    Day(DayArgs),

    /// Daily overview and statistics for a readings file.
    Overview(OverviewArgs),
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Date to synthesize, ISO 8601.
    #[clap(long)]
    pub date: String,

    /// Yearly energy consumption in kWh used to scale the normalized shape.
    #[clap(long = "yearly-kwh", default_value = "1000", env = "YEARLY_KWH")]
    pub yearly_energy: KilowattHours,

    /// Label the slots by interval start (00:00–23:45) instead of interval
    /// end (00:15–24:00).
    #[clap(long)]
    pub shift: bool,
}

#[derive(Parser)]
pub struct ReadingsArgs {
    /// JSON file with the raw `{timestamp, value}` meter readings.
    #[clap(long, env = "READINGS_PATH")]
    pub readings: PathBuf,
}

#[derive(Parser)]
pub struct DayArgs {
    #[clap(flatten)]
    pub readings: ReadingsArgs,

    /// Day to reconstruct.
    #[clap(long)]
    pub date: NaiveDate,

    /// Overlay the expected standard load profile, scaled by the annualized
    /// energy estimate of the whole readings file.
    #[clap(long)]
    pub with_profile: bool,
}

#[derive(Parser)]
pub struct OverviewArgs {
    #[clap(flatten)]
    pub readings: ReadingsArgs,

    /// First day of the statistics range.
    #[clap(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the statistics range.
    #[clap(long)]
    pub end: Option<NaiveDate>,
}
