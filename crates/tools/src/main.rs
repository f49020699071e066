use std::env;
use std::fs;

use board::element::ElementKind;
use compute::analysis::spatial::SpatialAnalysis;
use compute::analysis::statistics::Statistics;
use foundation::math::Vec2;
use formats::{BoardManifest, id_for_manifest_bytes, load_board_from_json_str};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "inspect" => cmd_inspect(args),
        "hash" => cmd_hash(args),
        "normalize" => cmd_normalize(args),
        "stats" => cmd_stats(args),
        _ => Err(usage()),
    }
}

fn cmd_inspect(args: Vec<String>) -> Result<(), String> {
    // boardctl inspect <board.json>
    let [path] = args.as_slice() else {
        return Err(usage());
    };

    let payload = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let loaded = load_board_from_json_str(&payload).map_err(|e| e.to_string())?;
    info!(
        "built board from {path}: {} named elements, {} sliders",
        loaded.elements.len(),
        loaded.sliders.len()
    );

    for (name, id) in &loaded.elements {
        let kind = loaded
            .board
            .kind(*id)
            .map(|k| format!("{k:?}"))
            .unwrap_or_else(|| "?".to_string());
        match loaded.board.position(*id) {
            Some(p) => println!("{name}\t{kind}\t({:.3}, {:.3})", p.x, p.y),
            None => println!("{name}\t{kind}"),
        }
    }

    for (name, slider) in &loaded.sliders {
        println!(
            "slider {name}: value {:.prec$} in [{}, {}]",
            slider.value(&loaded.board),
            slider.min(),
            slider.max(),
            prec = slider.precision()
        );
    }

    let positions: Vec<Vec2> = loaded
        .board
        .elements()
        .filter(|(_, kind)| matches!(kind, ElementKind::Point | ElementKind::Glider))
        .filter_map(|(id, _)| loaded.board.position(id))
        .collect();
    if let Some(b) = SpatialAnalysis::aabb2_points(&positions) {
        println!(
            "bounds: [{:.3}, {:.3}] .. [{:.3}, {:.3}]",
            b.min[0], b.min[1], b.max[0], b.max[1]
        );
    }

    Ok(())
}

fn cmd_hash(args: Vec<String>) -> Result<(), String> {
    // boardctl hash <board.json>
    let [path] = args.as_slice() else {
        return Err(usage());
    };

    let bytes = fs::read(path).map_err(|e| format!("read {path}: {e}"))?;
    println!("{}", id_for_manifest_bytes(&bytes));
    Ok(())
}

fn cmd_normalize(args: Vec<String>) -> Result<(), String> {
    // boardctl normalize <board.json>  -- parse and pretty-print the manifest
    let [path] = args.as_slice() else {
        return Err(usage());
    };

    let payload = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let manifest: BoardManifest =
        serde_json::from_str(&payload).map_err(|e| format!("parse {path}: {e}"))?;
    let out = serde_json::to_string_pretty(&manifest).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

fn cmd_stats(args: Vec<String>) -> Result<(), String> {
    // boardctl stats <values.txt>  -- whitespace/comma separated numbers
    let [path] = args.as_slice() else {
        return Err(usage());
    };

    let payload = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let mut values: Vec<f64> = Vec::new();
    for token in payload.split([',', ' ', '\t', '\n', '\r']) {
        if token.is_empty() {
            continue;
        }
        let v: f64 = token
            .parse()
            .map_err(|e| format!("bad number {token:?}: {e}"))?;
        values.push(v);
    }
    info!("parsed {} values from {path}", values.len());

    let (min, max) = Statistics::range(&values);
    println!("count\t{}", values.len());
    println!("sum\t{}", Statistics::sum(&values));
    println!("mean\t{}", Statistics::mean(&values));
    println!("median\t{}", Statistics::median(&values));
    println!("sd\t{}", Statistics::sd(&values));
    println!("min\t{min}");
    println!("max\t{max}");
    Ok(())
}

fn usage() -> String {
    [
        "usage: boardctl <command> [args]",
        "",
        "commands:",
        "  inspect <board.json>    build the board and print its elements",
        "  hash <board.json>       print the manifest content id",
        "  normalize <board.json>  parse and pretty-print the manifest",
        "  stats <values.txt>      summarize a numeric series",
    ]
    .join("\n")
}
