//! boxcmp CLI - lay out boxes and edit shareable fragments from the terminal.
//!
//! Every command starts from the `--fragment` state (empty when omitted),
//! applies one operation through the object store, and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use boxcmp::{
    Alignment, BoxSpec, CameraPose, MeshHandle, ObjectStore, Renderer, ViewerSettings, Viewpoint,
};
use boxcmp::boxcmp_math::{Point3, Vec3};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boxcmp")]
#[command(about = "Compare box sizes side by side and share them as a URL fragment", long_about = None)]
struct Cli {
    /// Starting state: a fragment (`#config=...`) or a full URL containing one
    #[arg(short, long, global = true)]
    fragment: Option<String>,

    /// Viewer settings file (TOML)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show boxes, their placements, the bounding box and the camera
    Show,
    /// Append a box
    Add {
        /// Display name
        #[arg(short, long, default_value = boxcmp_ir::DEFAULT_NAME)]
        name: String,
        /// Extent along x
        #[arg(long)]
        width: f64,
        /// Extent along y (up)
        #[arg(long)]
        height: f64,
        /// Extent along z
        #[arg(long)]
        length: f64,
        /// Color token, e.g. `#ff0000`
        #[arg(short, long, default_value = boxcmp_ir::DEFAULT_COLOR)]
        color: String,
        /// Explicit id (default: a fresh UUID)
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a box by id
    Remove {
        /// Id of the box to remove
        id: String,
    },
    /// Replace the order; boxes not listed are removed
    Reorder {
        /// Ids in the new order
        ids: Vec<String>,
    },
    /// Remove every box
    Clear,
    /// Pack boxes along another axis
    Align {
        /// Packing direction
        #[arg(value_enum)]
        axis: AxisArg,
    },
    /// Frame the boxes from another viewpoint
    View {
        /// Viewpoint tag (front, top, side, isometric, default)
        viewpoint: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    Front,
    Side,
}

impl From<AxisArg> for Alignment {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Front => Alignment::Front,
            AxisArg::Side => Alignment::Side,
        }
    }
}

/// Renderer that reports scene updates as debug events.
#[derive(Default)]
struct LogRenderer {
    next: u64,
}

impl Renderer for LogRenderer {
    fn add_mesh(&mut self, size: Vec3, color: &str, position: Point3) -> MeshHandle {
        self.next += 1;
        tracing::debug!(handle = self.next, ?size, color, ?position, "add mesh");
        MeshHandle(self.next)
    }

    fn move_mesh(&mut self, handle: MeshHandle, position: Point3) {
        tracing::debug!(handle = handle.0, ?position, "move mesh");
    }

    fn remove_mesh(&mut self, handle: MeshHandle) {
        tracing::debug!(handle = handle.0, "remove mesh");
    }

    fn set_camera(&mut self, pose: &CameraPose) {
        tracing::debug!(position = ?pose.position, target = ?pose.target, "camera");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = open_store(&cli)?;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            show(&store, cli.json)?;
            return Ok(());
        }
        Commands::Add {
            name,
            width,
            height,
            length,
            color,
            id,
        } => {
            let mut spec = BoxSpec::new(name, width, height, length, color);
            spec.id = id;
            store.add(spec)?;
        }
        Commands::Remove { id } => {
            if !store.remove(&id) {
                anyhow::bail!("no object with id {id:?}");
            }
        }
        Commands::Reorder { ids } => store.reorder(&ids),
        Commands::Clear => {
            store.clear();
        }
        Commands::Align { axis } => match Alignment::from(axis) {
            Alignment::Front => store.align_front(),
            Alignment::Side => store.align_side(),
        },
        Commands::View { viewpoint } => {
            store.set_viewpoint(Viewpoint::from_tag(&viewpoint));
        }
    }

    print_fragment(&store, cli.json)?;
    Ok(())
}

fn open_store(cli: &Cli) -> Result<ObjectStore> {
    let settings = match &cli.settings {
        Some(path) => ViewerSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ViewerSettings::default(),
    };
    let mut store = ObjectStore::from_settings(&settings)?.with_renderer(LogRenderer::default());

    if let Some(input) = &cli.fragment {
        let hash = input.split_once('#').map_or(input.as_str(), |(_, h)| h);
        let restored = store.load_fragment(hash);
        tracing::debug!(restored, "loaded fragment");
    }
    Ok(store)
}

#[derive(Serialize)]
struct ObjectReport<'a> {
    id: &'a str,
    name: &'a str,
    color: &'a str,
    size: [f64; 3],
    position: [f64; 3],
}

#[derive(Serialize)]
struct Report<'a> {
    alignment: Alignment,
    viewpoint: Viewpoint,
    objects: Vec<ObjectReport<'a>>,
    bounds: Bounds,
    camera: Camera,
    fragment: &'a str,
}

#[derive(Serialize)]
struct Bounds {
    min: [f64; 3],
    max: [f64; 3],
    size: [f64; 3],
}

#[derive(Serialize)]
struct Camera {
    position: [f64; 3],
    target: [f64; 3],
}

fn xyz(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn show(store: &ObjectStore, json: bool) -> Result<()> {
    let bbox = store.bounding_box();
    let camera = store.camera();

    if json {
        let report = Report {
            alignment: store.alignment(),
            viewpoint: store.viewpoint(),
            objects: store
                .objects()
                .iter()
                .map(|o| ObjectReport {
                    id: &o.id,
                    name: &o.name,
                    color: &o.color,
                    size: [o.width, o.height, o.length],
                    position: xyz(&o.position()),
                })
                .collect(),
            bounds: Bounds {
                min: xyz(&bbox.min),
                max: xyz(&bbox.max),
                size: [bbox.size.x, bbox.size.y, bbox.size.z],
            },
            camera: Camera {
                position: xyz(&camera.position),
                target: xyz(&camera.target),
            },
            fragment: store.fragment(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Alignment: {}", store.alignment());
    println!("Viewpoint: {}", store.viewpoint());
    println!("Objects: {}", store.len());
    for (i, o) in store.objects().iter().enumerate() {
        let p = o.position();
        println!(
            "  [{i}] {} {:?} {} x {} x {} {} @ ({:.3}, {:.3}, {:.3})",
            o.id, o.name, o.width, o.height, o.length, o.color, p.x, p.y, p.z
        );
    }
    println!(
        "Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
        bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
    );
    println!(
        "Camera: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.target.x,
        camera.target.y,
        camera.target.z
    );
    println!("Fragment: #{}", store.fragment());
    Ok(())
}

fn print_fragment(store: &ObjectStore, json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "count": store.len(),
            "fragment": format!("#{}", store.fragment()),
        });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("#{}", store.fragment());
    }
    Ok(())
}
