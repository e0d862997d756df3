use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use pyntcloud_plot::{PlotOptions, Plotter, PointCloud, Polylines, TerminalSink};

#[derive(Parser)]
#[command(name = "pyntplot", version)]
#[command(about = "pyntcloud-plot — export point clouds as browser-viewable scenes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a point cloud (ASCII PLY) to an HTML/JSON/PLY artifact set
    Plot {
        /// Input .ply file (ASCII)
        file: PathBuf,

        /// Point sprite size
        #[arg(long, default_value_t = 0.3)]
        point_size: f64,

        /// Point opacity (0 transparent, 1 opaque)
        #[arg(long, default_value_t = 0.9)]
        point_opacity: f64,

        /// File stem for the generated artifacts
        #[arg(long, default_value = "pyntcloud_plot")]
        output_name: String,

        /// Width of the embeddable frame
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Height of the embeddable frame
        #[arg(long, default_value_t = 500)]
        height: u32,

        /// Polyline overlay, repeatable: COLOR=x,y,z;x,y,z;...
        /// e.g. --polyline "0xFF00FF=0,0,0;1,0,0;1,1,1"
        #[arg(long = "polyline")]
        polylines: Vec<String>,
    },

    /// Serve generated artifacts over localhost with live reload
    Serve {
        /// Directory holding the artifacts (default: current directory)
        dir: Option<PathBuf>,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            file,
            point_size,
            point_opacity,
            output_name,
            width,
            height,
            polylines,
        } => {
            let cloud = match PointCloud::from_ply_file(&file) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            };

            let polylines = match parse_polylines(&polylines) {
                Ok(p) => p,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    process::exit(1);
                }
            };

            let opts = PlotOptions {
                point_size,
                point_opacity,
                output_name,
                frame_shape: (width, height),
                polylines,
            };

            let plotter = match Plotter::new(Some(Box::new(TerminalSink))) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            };

            if let Err(e) = plotter.show(&cloud, &opts) {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }

        Commands::Serve { dir, port } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            rt.block_on(async {
                if let Err(e) = pyntcloud_plot::server::serve(dir, port).await {
                    eprintln!("error: preview server failed: {e}");
                    process::exit(1);
                }
            });
        }
    }
}

/// Parse repeated `COLOR=x,y,z;x,y,z` arguments into overlay pairs,
/// preserving the order they were given on the command line.
fn parse_polylines(args: &[String]) -> Result<Polylines, String> {
    let mut out = Polylines::new();
    for arg in args {
        let (color, rest) = arg
            .split_once('=')
            .ok_or_else(|| format!("bad --polyline '{arg}': expected COLOR=x,y,z;..."))?;
        let mut points = Vec::new();
        for triple in rest.split(';').filter(|s| !s.is_empty()) {
            let coords: Vec<f64> = triple
                .split(',')
                .map(|v| v.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|_| format!("bad --polyline '{arg}': '{triple}' is not a number triple"))?;
            if coords.len() != 3 {
                return Err(format!(
                    "bad --polyline '{arg}': '{triple}' must have exactly 3 coordinates"
                ));
            }
            points.push([coords[0], coords[1], coords[2]]);
        }
        if points.is_empty() {
            return Err(format!("bad --polyline '{arg}': no points given"));
        }
        out.push(color, points);
    }
    Ok(out)
}
