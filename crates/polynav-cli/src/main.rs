//! polynav CLI - path queries against scene files.
//!
//! - `polynav plan` - shortest walkable route between two points
//! - `polynav graph` - dump the visibility graph a query would search
//! - `polynav check` - validate a scene file
//! - `polynav init` - write a starter scene

mod scene;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use polynav::{AgentId, PathPlanner, PathStatus, Vec3, WalkableRegion};

use crate::scene::{SceneFile, STARTER_SCENE};

#[derive(Parser)]
#[command(name = "polynav")]
#[command(about = "Visibility-graph pathfinding over polygon scenes", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Scene file (YAML)
    #[arg(short, long)]
    scene: PathBuf,

    /// Start position as `x,y` or `x,y,z`
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    start: Vec3,

    /// Goal position as `x,y` or `x,y,z`
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    goal: Vec3,

    /// Plan on behalf of this agent: every other agent's footprint becomes a hole
    #[arg(long)]
    agent: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a path between two points
    Plan {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the visibility graph for a query
    Graph {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Validate a scene file
    Check {
        /// Scene file (YAML)
        scene: PathBuf,
    },

    /// Write a starter scene file
    Init {
        /// Where to write the scene
        #[arg(default_value = "scene.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan { query, json } => plan(&query, json),
        Commands::Graph { query } => graph(&query),
        Commands::Check { scene } => check(&scene),
        Commands::Init { path, force } => init_scene(&path, force),
    }
}

fn parse_position(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid coordinate in `{s}`: {err}"))?;
    if parts.iter().any(|v| !v.is_finite()) {
        return Err(format!("coordinates must be finite: `{s}`"));
    }
    match parts[..] {
        [x, y] => Ok(Vec3::new(x, y, 0.0)),
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected `x,y` or `x,y,z`, got `{s}`")),
    }
}

/// Region snapshot for a query: the permanent region plus other agents' footprints.
fn query_region(scene: &SceneFile, agent: Option<u64>) -> Result<WalkableRegion> {
    let region = scene.region()?;
    let Some(agent) = agent else {
        return Ok(region);
    };

    let obstacles = scene.obstacles()?;
    if obstacles.get(AgentId(agent)).is_none() {
        tracing::warn!(agent, "agent not declared in scene; avoiding every footprint");
    }
    Ok(region.with_holes(obstacles.holes_excluding(AgentId(agent))))
}

fn plan(query: &QueryArgs, json: bool) -> Result<()> {
    let scene = SceneFile::load(&query.scene)?;
    let planner = scene.planner()?;
    let region = query_region(&scene, query.agent)?;

    tracing::debug!(
        scene = %query.scene.display(),
        outlines = region.outlines().len(),
        "Planning"
    );

    let result = planner.plan(&region, query.start, query.goal);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let status = match result.status() {
        PathStatus::Direct => "direct".to_string(),
        PathStatus::Routed => "routed".to_string(),
        PathStatus::Fallback(reason) => format!("fallback ({reason})"),
    };
    println!("Status: {status}");
    println!(
        "Length: {:.3}",
        result.length_from(query.start.truncate())
    );
    println!("Waypoints:");
    for (i, p) in result.waypoints().iter().enumerate() {
        println!("  {i}: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }

    Ok(())
}

fn graph(query: &QueryArgs) -> Result<()> {
    let scene = SceneFile::load(&query.scene)?;
    let planner = scene.planner()?;
    let region = query_region(&scene, query.agent)?;

    let graph = planner.build_graph(
        &region,
        &region,
        query.start.truncate(),
        query.goal.truncate(),
    );

    println!("Nodes: {}", graph.node_count());
    for (i, p) in graph.nodes().iter().enumerate() {
        let label = match i {
            polynav::START_NODE => " (start)",
            polynav::GOAL_NODE => " (goal)",
            _ => "",
        };
        println!("  {i}: ({:.3}, {:.3}){label}", p.x, p.y);
    }

    println!("Edges: {}", graph.weights().edge_count());
    for (i, j, w) in graph.edges() {
        println!("  {i} - {j}: {w:.3}");
    }

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let scene = SceneFile::load(path)?;
    let planner = scene.planner()?;
    let region = scene.region()?;
    let obstacles = scene.obstacles()?;

    if region.is_empty() {
        tracing::warn!("scene has no boundary; every query will head straight for its goal");
    }

    let config = planner.config();
    println!("Scene: {}", path.display());
    println!(
        "Region: {} outline(s), {} vertices",
        region.outlines().len(),
        region.vertex_count()
    );
    println!("Agents: {}", obstacles.len());
    for (id, hole) in obstacles.iter() {
        println!("  - {} ({} vertices)", id.0, hole.outline().len());
    }
    println!(
        "Planner: clearance_step={} probe_radius_ratio={} snap_step={} on_mesh_tolerance={}",
        config.clearance_step,
        config.probe_radius_ratio,
        config.snap_step,
        config.on_mesh_tolerance
    );
    println!("Helper: {}", planner.helper_name());

    Ok(())
}

fn init_scene(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, STARTER_SCENE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote starter scene to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  polynav check {}", path.display());
    println!(
        "  polynav plan --scene {} --start 2,8 --goal 8,2",
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_and_three_component_positions() {
        assert_eq!(parse_position("1,2"), Ok(Vec3::new(1.0, 2.0, 0.0)));
        assert_eq!(parse_position(" -1.5, 2 ,3"), Ok(Vec3::new(-1.5, 2.0, 3.0)));
    }

    #[test]
    fn rejects_malformed_positions() {
        assert!(parse_position("1").is_err());
        assert!(parse_position("1,2,3,4").is_err());
        assert!(parse_position("a,b").is_err());
        assert!(parse_position("inf,0").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn agent_queries_cut_out_other_footprints() {
        let scene = SceneFile::from_yaml_str(STARTER_SCENE).expect("starter scene");
        let base = query_region(&scene, None).expect("region");
        assert_eq!(base.outlines().len(), 1);

        let for_agent = query_region(&scene, Some(1)).expect("region");
        assert_eq!(for_agent.outlines().len(), 2);

        let for_stranger = query_region(&scene, Some(99)).expect("region");
        assert_eq!(for_stranger.outlines().len(), 3);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/scene.yaml");
        init_scene(&path, false).expect("first write");
        assert!(init_scene(&path, false).is_err());
        init_scene(&path, true).expect("forced write");

        let scene = SceneFile::load(&path).expect("written scene loads");
        assert_eq!(scene.agents.len(), 2);
    }
}
