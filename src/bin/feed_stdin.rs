//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! Usage: `feed_stdin <base-url> [patterns.json]`
//!
//! Without a descriptor the page goes through heuristic extraction and a
//! descriptor is derived from the heuristic items. With one, the stored
//! descriptor is replayed. Logs go to stderr (`RUST_LOG` controls the level).

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use rssbridge::dom;
use rssbridge::metadata::native_feeds;
use rssbridge::pattern::{self, PatternDescriptor};
use rssbridge::{extract_feed, replay, structured_content, ExtractedItem, Options};
use serde::Serialize;

#[derive(Serialize)]
struct AnalysisOutput {
    title: String,
    description: String,
    items: Vec<ExtractedItem>,
    native_feeds: Vec<String>,
    structured_content: String,
    patterns: PatternDescriptor,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(base_url) = args.next() else {
        eprintln!("Usage: feed_stdin <base-url> [patterns.json]");
        process::exit(2);
    };
    let patterns_path = args.next();

    // Read HTML from stdin
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        process::exit(1);
    }

    let doc = match dom::parse_document(&html) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    let options = Options::default();

    let json = match patterns_path {
        Some(path) => {
            let descriptor = match fs::read_to_string(&path)
                .map_err(|err| rssbridge::Error::InvalidPattern(format!("{path}: {err}")))
                .and_then(|text| PatternDescriptor::from_json(&text))
            {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    eprintln!("{err}");
                    process::exit(1);
                }
            };
            serde_json::to_string_pretty(&replay(&doc, &descriptor, &base_url, &options))
        }
        None => {
            let feed = extract_feed(&doc, &base_url, &options);
            let output = AnalysisOutput {
                patterns: pattern::derive(&doc, &base_url, &feed, &options),
                native_feeds: native_feeds(&doc, &base_url),
                structured_content: structured_content(&doc, &base_url, &options).text,
                title: feed.title,
                description: feed.description,
                items: feed.items,
            };
            serde_json::to_string_pretty(&output)
        }
    };

    if let Err(err) = write_json(json, &mut io::stdout().lock()) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn write_json(json: serde_json::Result<String>, out: &mut impl Write) -> Result<(), String> {
    let json = json.map_err(|err| format!("Failed to serialize output: {err}"))?;
    writeln!(out, "{json}").map_err(|err| format!("Failed to write output: {err}"))
}
