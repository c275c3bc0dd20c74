use chrono::Utc;
use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use gleaner_core::archive::{ARCHIVE_EPOCH, ArchiveOptions, execute_archive};
use gleaner_core::discovery::{DiscoveryOptions, execute_discovery, execute_topic_ingest};
use gleaner_core::print_banner;
use gleaner_core::report::{
    ReportFormat, gather_corpus_report, generate_json_report, generate_text_report,
};
use gleaner_harvester::CorpusStore;
use handlers::{expand_data_dir, parse_month_arg, parse_root_url, parse_since_arg, seed_override};

mod commands;
mod handlers;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("discover", primary_command)) => handle_discover(primary_command).await,
        Some(("ingest", primary_command)) => handle_ingest(primary_command).await,
        Some(("archive", primary_command)) => handle_archive(primary_command).await,
        Some(("report", primary_command)) => handle_report(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

// Handler functions

fn fail(message: String) -> ! {
    eprintln!("{} {}", "✗".red(), message);
    std::process::exit(1);
}

fn root_url_override(args: &ArgMatches, name: &str) -> Option<String> {
    match args
        .get_one::<String>(name)
        .map(|raw| parse_root_url(raw))
        .transpose()
    {
        Ok(url) => url,
        Err(e) => fail(e),
    }
}

async fn handle_discover(args: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let max_visits = *args.get_one::<usize>("max-visits").unwrap();
    let data_dir = expand_data_dir(args.get_one::<String>("data-dir").unwrap());
    let seeds = seed_override(
        args.get_many::<String>("seed")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    );
    let forum_url = root_url_override(args, "forum-url");
    let session_cookie = args.get_one::<String>("cookie").cloned().unwrap_or_default();

    println!("🌾 Discovering topics");
    println!("Visit budget: {}", max_visits);
    println!("Data dir: {}\n", data_dir.display());

    let options = DiscoveryOptions {
        max_visits,
        data_dir,
        seeds,
        forum_url,
        session_cookie,
        show_progress_bars: true,
    };

    match execute_discovery(options).await {
        Ok(summary) => {
            println!("\n{} Discovery complete!\n", "✓".green());
            println!("  Topics visited: {}", summary.visited.len());
            for topic in &summary.visited {
                println!("    - {}", topic);
            }
            println!("  New answers: {}", summary.new_answers);
            println!("  Frontier left unexplored: {}", summary.frontier_len);
        }
        Err(e) => fail(e),
    }
}

async fn handle_ingest(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let topic = args.get_one::<String>("TOPIC").unwrap();
    let data_dir = expand_data_dir(args.get_one::<String>("data-dir").unwrap());
    let forum_url = root_url_override(args, "forum-url");
    let session_cookie = args.get_one::<String>("cookie").cloned().unwrap_or_default();

    println!("🌾 Ingesting {}\n", topic);

    match execute_topic_ingest(topic, data_dir, forum_url, session_cookie).await {
        Ok(summary) => {
            println!("\n{} Ingest complete!\n", "✓".green());
            println!(
                "  Store size: {} answers ({} new)",
                summary.total_answers, summary.new_answers
            );

            let mut tally: Vec<(&String, &u32)> = summary.tally.iter().collect();
            tally.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            println!("  Co-occurring topics:");
            for (label, count) in tally.iter().take(15) {
                println!("    {:>4}  {}", count, label);
            }
        }
        Err(e) => fail(e),
    }
}

async fn handle_archive(args: &ArgMatches) {
    tracing_subscriber::fmt::init();

    let data_dir = expand_data_dir(args.get_one::<String>("data-dir").unwrap());
    let archive_url = root_url_override(args, "archive-url");

    let months = if let Some(month) = args.get_one::<String>("month") {
        match parse_month_arg(month) {
            Ok(segment) => vec![segment],
            Err(e) => fail(e),
        }
    } else {
        // Default to the whole archive, from its first listed month to now.
        let since = args
            .get_one::<String>("since")
            .cloned()
            .unwrap_or_else(|| format!("{}-{:02}", ARCHIVE_EPOCH.0, ARCHIVE_EPOCH.1));
        match parse_since_arg(&since, Utc::now().date_naive()) {
            Ok(months) => months,
            Err(e) => fail(e),
        }
    };

    println!("🌾 Harvesting {} archive month(s)\n", months.len());

    let options = ArchiveOptions {
        months,
        data_dir,
        archive_url,
        show_progress_bars: true,
    };

    match execute_archive(options).await {
        Ok(total) => println!("\n{} Archive harvest complete! {} posts\n", "✓".green(), total),
        Err(e) => fail(e),
    }
}

async fn handle_report(args: &ArgMatches) {
    let data_dir = expand_data_dir(args.get_one::<String>("data-dir").unwrap());
    let format_raw = args.get_one::<String>("format").unwrap();
    let Some(format) = ReportFormat::from_str(format_raw) else {
        fail(format!("Unknown report format '{}'", format_raw));
    };

    let store = CorpusStore::new(data_dir);
    let report = match gather_corpus_report(&store).await {
        Ok(report) => report,
        Err(e) => fail(e),
    };

    match format {
        ReportFormat::Text => print!("{}", generate_text_report(&report)),
        ReportFormat::Json => match generate_json_report(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        },
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
