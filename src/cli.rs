// src/cli.rs
use std::{env, time::Duration};

use crate::config::options::{AppOptions, UnitSelector};
use crate::data::Unit;
use crate::error::ScrapeError;
use crate::progress::Progress;
use crate::remote::NetNutrition;
use crate::{file, scrape};

const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub options: AppOptions,
    pub list_units: bool,
    pub help: bool,
}

/// Prints `[i/n] Fetching <name>... N items across M categories`.
pub struct CliProgress {
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn unit_started(&mut self, index: usize, unit: &Unit) {
        use std::io::Write;
        print!("[{}/{}] Fetching {}... ", index + 1, self.total, unit.name);
        let _ = std::io::stdout().flush();
    }
    fn unit_done(&mut self, _unit: &Unit, categories: usize, items: usize) {
        println!("{items} items across {categories} categories");
    }
    fn unit_failed(&mut self, _unit: &Unit, _error: &str) {
        println!("failed");
    }
}

pub fn run() -> Result<(), ScrapeError> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{HELP}");
        return Ok(());
    }
    let opts = args.options;
    let remote = NetNutrition::new(&opts.scrape)?;

    if args.list_units {
        let discovery = scrape::discover_units(&remote, &opts.scrape)?;
        for u in &discovery.units {
            println!("{},{}", u.id, u.name);
        }
        return Ok(());
    }

    let mut progress = CliProgress { total: 0 };
    let catalog = scrape::collect_catalog(&remote, &opts.scrape, Some(&mut progress))?;
    let written = file::export_catalog(&opts.export, &catalog)?;
    let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    println!("Wrote {} ({} items captured)", paths.join(" and "), catalog.items_total);
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<CliArgs, ScrapeError> {
    let mut out = CliArgs::default();
    let mut args = argv.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--units" => {
                let v = value(&mut args, "--units")?;
                out.options.scrape.units = UnitSelector::Ids(parse_ids_list(&v)?);
            }
            "--list-units" => out.list_units = true,
            "-o" | "--out" => {
                let v = value(&mut args, "--out")?;
                out.options.export.set_json_path(&v);
            }
            "--csv" => {
                let v = value(&mut args, "--csv")?;
                out.options.export.set_csv_path(&v);
            }
            "--no-csv" => out.options.export.csv_path = None,
            "--delay-ms" => {
                let v = value(&mut args, "--delay-ms")?;
                let ms: u64 = v.parse().map_err(|_| usage(format!("Invalid --delay-ms: {v}")))?;
                out.options.scrape.label_delay = Duration::from_millis(ms);
            }
            "--base-url" => out.options.scrape.base_url = value(&mut args, "--base-url")?,
            "-h" | "--help" => out.help = true,
            _ => return Err(usage(format!("Unknown arg: {a}"))),
        }
    }
    Ok(out)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ScrapeError> {
    args.next().ok_or_else(|| usage(format!("Missing value for {flag}")))
}

fn usage(msg: String) -> ScrapeError {
    ScrapeError::Usage(msg)
}

/// `3,7,10-12` → [3, 7, 10, 11, 12], sorted and deduplicated.
fn parse_ids_list(s: &str) -> Result<Vec<i64>, ScrapeError> {
    let num = |t: &str| t.trim().parse::<i64>().map_err(|_| usage(format!("Invalid unit id: {t}")));
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some(dash) = part.find('-') {
            let a = num(&part[..dash])?;
            let b = num(&part[dash + 1..])?;
            if a > b { return Err(usage(format!("Invalid range: {part}"))); }
            out.extend(a..=b);
        } else {
            out.push(num(part)?);
        }
    }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}
