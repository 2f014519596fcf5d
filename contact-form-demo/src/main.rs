//! Console host for the contact form.
//!
//! Reads one command per line from stdin and prints what the page would show:
//!
//! ```text
//! input <field> <value...>   type into a field
//! blur <field>               leave a field
//! consent on|off             tick or untick consent
//! submit | confirm | cancel
//! wait                       wait for the in-flight submission
//! show                       print the form
//! quit
//! ```

mod paths;

use std::fs::File;
use std::path::PathBuf;

use contact_form::prelude::*;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

fn init_logging() {
    let path = paths::start_session_log(&paths::log_dir());
    let log_file = File::create(&path).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");
    info!("logging to {}", path.display());
}

fn load_config() -> FormConfig {
    let Some(path) = paths::resolve_config(std::env::args().nth(1).map(PathBuf::from)) else {
        return FormConfig::default();
    };

    match FormConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            error!("{}: {}", path.display(), e);
            eprintln!("Ignoring config {}: {}", path.display(), e);
            FormConfig::default()
        }
    }
}

fn print_form(form: &Controller<PageView>) {
    let workflow = form.workflow();
    println!("── {} ({})", workflow.form_id(), workflow.stage());
    for field in workflow.fields() {
        let marker = if field.spec().required { "*" } else { " " };
        println!("  {}{:<8} {}", marker, field.id().as_str(), field.value());
    }
    let consent = if workflow.consent() { "x" } else { " " };
    println!("  [{}] {}", consent, workflow.consent_id());
    println!("{}", form.view());
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = load_config();
    let backend = SimulatedBackend::new(config.submission_delay);
    let mut form = Controller::new(FormSpec::contact(), config, PageView::default(), backend);
    print_form(&form);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        };

        let mut words = line.split_whitespace();
        match words.next() {
            Some("input") => match words.next() {
                Some(field) => {
                    let value = words.collect::<Vec<_>>().join(" ");
                    form.input(field, value);
                }
                None => eprintln!("usage: input <field> <value...>"),
            },
            Some("blur") => match words.next() {
                Some(field) => form.blur(field),
                None => eprintln!("usage: blur <field>"),
            },
            Some("consent") => match words.next() {
                Some("on") => form.set_consent(true),
                Some("off") => form.set_consent(false),
                _ => eprintln!("usage: consent on|off"),
            },
            Some("submit") => form.submit(),
            Some("confirm") => form.confirm(),
            Some("cancel") => form.cancel(),
            Some("wait") => {
                if form.settle().await.is_none() {
                    println!("nothing in flight");
                }
            }
            Some("show") => {}
            Some("quit") => break,
            Some(other) => {
                eprintln!("unknown command: {}", other);
                continue;
            }
            None => continue,
        }
        print_form(&form);
    }

    form.settle().await;
}
