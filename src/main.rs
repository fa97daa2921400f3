// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthowire CLI entrypoint.
//!
//! Loads a circuit (or builds the demo circuit), optionally reroutes every wire
//! and checks wire invariants, then writes the result to `--out` or stdout.

use std::error::Error;
use std::path::Path;

use orthowire::config::RouteConfig;
use orthowire::model::{Circuit, WireId};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <circuit.json> [--out <path>] [--reroute] [--check] [route options]\n  {program} --demo [--out <path>] [--reroute] [--check] [route options]\n\nRoute options:\n  --grid <n>            routing grid size (default 20)\n  --turn-penalty <n>    extra cost per bend (default 50)\n  --max-expansions <n>  search budget before falling back to an L-shape (default 5000)\n\n--reroute replans every committed wire around components and other wires.\n--check exits with status 1 when any wire is diagonal or detached from its terminal.\nWithout --out the resulting circuit JSON is written to stdout."
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    input: Option<String>,
    out: Option<String>,
    demo: bool,
    reroute: bool,
    check: bool,
    grid: Option<f64>,
    turn_penalty: Option<u32>,
    max_expansions: Option<usize>,
}

impl CliOptions {
    fn route_config(&self) -> RouteConfig {
        let mut config = RouteConfig::default();
        if let Some(grid) = self.grid {
            config.grid_size = grid;
        }
        if let Some(turn_penalty) = self.turn_penalty {
            config.turn_penalty = turn_penalty;
        }
        if let Some(max_expansions) = self.max_expansions {
            config.max_expansions = max_expansions;
        }
        config
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--reroute" => {
                if options.reroute {
                    return Err(());
                }
                options.reroute = true;
            }
            "--check" => {
                if options.check {
                    return Err(());
                }
                options.check = true;
            }
            "--out" => {
                if options.out.is_some() {
                    return Err(());
                }
                options.out = Some(args.next().ok_or(())?);
            }
            "--grid" => {
                if options.grid.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let grid: f64 = raw.parse().map_err(|_| ())?;
                if !grid.is_finite() || grid <= 0.0 {
                    return Err(());
                }
                options.grid = Some(grid);
            }
            "--turn-penalty" => {
                if options.turn_penalty.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.turn_penalty = Some(raw.parse().map_err(|_| ())?);
            }
            "--max-expansions" => {
                if options.max_expansions.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.max_expansions = Some(raw.parse().map_err(|_| ())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.input.is_some() {
                    return Err(());
                }
                options.input = Some(arg);
            }
        }
    }

    if options.demo == options.input.is_some() {
        return Err(());
    }

    Ok(options)
}

fn reroute_all(circuit: &mut Circuit, config: &RouteConfig) -> usize {
    let wire_ids = circuit
        .wires()
        .iter()
        .filter(|wire| wire.path().len() >= 2)
        .map(|wire| wire.id().clone())
        .collect::<Vec<WireId>>();

    let mut changed = 0;
    for wire_id in &wire_ids {
        if orthowire::route::reroute_wire(circuit, wire_id, config) {
            changed += 1;
        }
    }
    if changed > 0 {
        circuit.bump_rev();
    }
    changed
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "orthowire".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut circuit = match options.input.as_deref() {
            Some(input) => orthowire::store::load_circuit(Path::new(input))?,
            None => orthowire::demo::demo_circuit(),
        };

        if options.reroute {
            let changed = reroute_all(&mut circuit, &options.route_config());
            eprintln!("orthowire: rerouted {changed} of {} wire(s)", circuit.wires().len());
        }

        if options.check {
            let violations = orthowire::query::violations(&circuit);
            for violation in &violations {
                eprintln!("orthowire: {violation}");
            }
            if !violations.is_empty() {
                return Err(format!("{} wire violation(s)", violations.len()).into());
            }
        }

        match options.out.as_deref() {
            Some(out) => {
                orthowire::store::save_circuit(Path::new(out), &circuit)?;
                eprintln!("orthowire: wrote {out}");
            }
            None => println!("{}", orthowire::store::to_json(&circuit)?),
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("orthowire: {err}");
        std::process::exit(1);
    }
}
