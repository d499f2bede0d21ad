//
// main.rs
//
// Copyright (C) 2026 Jonathan Marc Bearak
//

use std::env;

use robovars::cli::complete;

fn print_usage() {
    println!(
        "robovars {}, static variable completion for Robot Framework.",
        env!("CARGO_PKG_VERSION")
    );
    print!(
        r#"
Usage: robovars complete <file> <line> <column> [OPTIONS]

Lines and columns start at 1; columns count UTF-16 code units.

Available options:

--config <json>              Settings file (robot.variables, robot.pythonpath, ...)
--timeout-ms <n>             Cancel the request after n milliseconds
--json                       Print LSP completion items and diagnostics as JSON
--version                    Print the version
--help                       Print this help message

Set ROBOVARS_PERF=1 to log stage timings.

"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut argv = env::args();
    argv.next(); // skip executable name

    let Some(command) = argv.next() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "complete" => {
            let args = complete::parse_args(&mut argv).map_err(|e| anyhow::anyhow!(e))?;
            env_logger::init();
            let outcome = complete::run_complete(&args).await?;
            if args.json {
                complete::print_results_json(&outcome)?;
            } else {
                complete::print_results(&outcome);
            }
            Ok(())
        }
        "--version" => {
            println!("robovars {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "--help" => {
            print_usage();
            Ok(())
        }
        other => Err(anyhow::anyhow!("Unknown argument: '{other}'")),
    }
}
