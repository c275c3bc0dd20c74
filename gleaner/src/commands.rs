use crate::CLAP_STYLING;
use clap::{ArgAction, arg, command, value_parser};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("gleaner")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("gleaner")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("discover")
                .about("Explores the topic graph, harvesting the most-followed topics first")
                .arg(
                    arg!(-n --"max-visits" <COUNT> "Maximum number of topics to ingest")
                        .value_parser(value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(-d --"data-dir" <DIR> "Directory holding the per-topic store files")
                        .default_value("training-data"),
                )
                .arg(
                    arg!(-s --"seed" <TOPIC> "Seed topic, replaces the built-in seed set")
                        .action(ArgAction::Append)
                        .required(false),
                )
                .arg(
                    arg!(--"forum-url" <URL> "Override the forum root URL").required(false),
                )
                .arg(
                    arg!(--"cookie" <COOKIE> "Session cookie sent with page fetches")
                        .required(false),
                ),
        )
        .subcommand(
            command!("ingest")
                .about("Fetches a single topic's feed and merges it into its store")
                .arg(arg!(<TOPIC> "The topic to ingest"))
                .arg(
                    arg!(-d --"data-dir" <DIR> "Directory holding the per-topic store files")
                        .default_value("training-data"),
                )
                .arg(
                    arg!(--"forum-url" <URL> "Override the forum root URL").required(false),
                )
                .arg(
                    arg!(--"cookie" <COOKIE> "Session cookie sent with page fetches")
                        .required(false),
                ),
        )
        .subcommand(
            command!("archive")
                .about("Harvests the monthly top-post archive")
                .arg(
                    arg!(-m --"month" <MONTH> "Single month to harvest, given as YYYY-MM")
                        .required(false),
                )
                .arg(
                    arg!(--"since" <MONTH> "Harvest every month from YYYY-MM through now")
                        .required(false),
                )
                .arg(
                    arg!(-d --"data-dir" <DIR> "Directory the archive exports land in")
                        .default_value("training-data"),
                )
                .arg(
                    arg!(--"archive-url" <URL> "Override the archive root URL").required(false),
                ),
        )
        .subcommand(
            command!("report")
                .about("Summarizes the harvested corpus")
                .arg(
                    arg!(-d --"data-dir" <DIR> "Directory holding the per-topic store files")
                        .default_value("training-data"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT> "Report format: text or json")
                        .default_value("text"),
                ),
        )
}
