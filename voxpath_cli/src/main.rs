// CLI entry point: answer the path requests in a scene file.
//
// Loads the scene, runs every request against its terrain, and prints the
// responses to stdout as a JSON array (one entry per request, in order).
// Logging goes to stderr; set RUST_LOG=debug to see per-search details.
//
// Usage:
//   voxpath <SCENE> [OPTIONS]
//     --mode <greedy|shortest>  Default search mode (overrides the scene config)
//     --no-smooth               Return raw search paths
//     --budget <N>              Default dequeue budget per request
//     --pretty                  Pretty-print the JSON output

use std::path::PathBuf;

use voxpath_cli::{Scene, SceneOverrides};
use voxpath_nav::SearchMode;

struct Args {
    scene: PathBuf,
    overrides: SceneOverrides,
    pretty: bool,
}

fn main() {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .parse_env("RUST_LOG")
        .init();

    let args = parse_args();

    let scene = match Scene::load(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", args.scene.display());
            std::process::exit(1);
        }
    };

    let responses = match scene.run(&args.overrides) {
        Ok(responses) => responses,
        Err(e) => {
            eprintln!("Failed to run scene: {e}");
            std::process::exit(1);
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&responses)
    } else {
        serde_json::to_string(&responses)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize responses: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut scene = None;
    let mut overrides = SceneOverrides::default();
    let mut pretty = false;
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                overrides.mode = match args.get(i).map(String::as_str) {
                    Some("greedy") => Some(SearchMode::Greedy),
                    Some("shortest") => Some(SearchMode::Shortest),
                    _ => {
                        eprintln!("--mode requires `greedy` or `shortest`");
                        std::process::exit(1);
                    }
                };
            }
            "--no-smooth" => overrides.smooth = Some(false),
            "--budget" => {
                i += 1;
                overrides.search_iterations =
                    Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--budget requires a non-negative number");
                        std::process::exit(1);
                    }));
            }
            "--pretty" => pretty = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            path => {
                if scene.replace(PathBuf::from(path)).is_some() {
                    eprintln!("Only one scene file may be given");
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let Some(scene) = scene else {
        print_usage();
        std::process::exit(1);
    };
    Args {
        scene,
        overrides,
        pretty,
    }
}

fn print_usage() {
    println!("Usage: voxpath <SCENE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --mode <greedy|shortest>  Default search mode (overrides the scene config)");
    println!("  --no-smooth               Return raw search paths");
    println!("  --budget <N>              Default dequeue budget per request");
    println!("  --pretty                  Pretty-print the JSON output");
    println!("  --help, -h                Show this help");
}
