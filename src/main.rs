mod calendar;
mod cli;
mod error;
mod prelude;
mod profile;
mod quantity;
mod reading;
mod render;
mod series;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    calendar::holidays::GermanHolidays,
    cli::{Args, Command},
    prelude::*,
    profile::{
        SlotLabeling, Synthesizer,
        tables::{DynamizationTable, ShapeTable},
    },
    quantity::KilowattHours,
    series::{ONE_DAY, QUARTER_HOUR, RegularSeries},
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let synthesizer =
        Synthesizer::new(ShapeTable::bundled()?, DynamizationTable::bundled()?, GermanHolidays);

    match Args::parse().command {
        Command::Profile(args) => {
            let labeling = if args.shift {
                SlotLabeling::IntervalStart
            } else {
                SlotLabeling::IntervalEnd
            };
            let profile = synthesizer.synthesize_iso(&args.date, args.yearly_energy, labeling)?;
            println!("{}", render::build_profile_table(&profile));
            info!(total = %profile.total(), "synthesized");
        }

        Command::Day(args) => {
            let readings = reading::load(&args.readings.readings)?;
            let day = reading::day(&readings, args.date);
            let series = RegularSeries::reconstruct(&day, QUARTER_HOUR)?;
            let profile = if args.with_profile {
                let overview =
                    RegularSeries::reconstruct(&reading::overview(&readings), ONE_DAY)?;
                let yearly_energy = KilowattHours(overview.annualized_energy()? * 1000.0);
                info!(%yearly_energy, "estimated annual consumption");
                Some(synthesizer.synthesize(
                    args.date,
                    yearly_energy,
                    SlotLabeling::IntervalStart,
                )?)
            } else {
                None
            };
            println!("{}", render::build_day_table(&series, profile.as_ref()));
        }

        Command::Overview(args) => {
            let readings = reading::overview(&reading::load(&args.readings.readings)?);
            let series = RegularSeries::reconstruct(&readings, ONE_DAY)?;
            println!("{}", render::build_overview_table(&series, args.start, args.end));
            println!("{}", render::build_statistics_table(&series, args.start, args.end));
        }
    }
    Ok(())
}
