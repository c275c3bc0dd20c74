pub mod archive;
pub mod discovery;
pub mod report;

use colored::Colorize;

const BANNER: &str = r#"
        _
   __ _| | ___  __ _ _ __   ___ _ __
  / _` | |/ _ \/ _` | '_ \ / _ \ '__|
 | (_| | |  __/ (_| | | | |  __/ |
  \__, |_|\___|\__,_|_| |_|\___|_|
  |___/
"#;

pub fn print_banner() {
    println!("{}", BANNER.cyan());
    println!("  gleaner v{} - topic harvester\n", env!("CARGO_PKG_VERSION"));
}
