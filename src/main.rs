use anyhow::{bail, Context};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use waymark::adapters::outbound::init_navigation_logger;
use waymark::application::RoutePlanner;
use waymark::domains::navigation::Point;
use waymark::Config;

const USAGE: &str = "usage: waymark <classified-map.png> <start-x> <start-y> [config.toml]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        bail!(USAGE);
    }
    let map_path = &args[0];
    let start = Point::new(
        args[1].parse().with_context(|| format!("bad start x: {}", args[1]))?,
        args[2].parse().with_context(|| format!("bad start y: {}", args[2]))?,
    );
    let config_path = args.get(3).map(String::as_str).unwrap_or("waymark.toml");

    let config = Config::load(config_path).context("loading configuration")?;

    // Plain subscriber, without the log bridge: the `log` facade belongs to fast_log.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt().with_env_filter(filter).finish(),
    )
    .context("installing tracing subscriber")?;
    let logger = init_navigation_logger(config.logging.file.as_deref(), config.logging.level_filter());

    info!("Planning over {} from {}", map_path, start);
    let image = image::open(map_path)
        .with_context(|| format!("opening {}", map_path))?
        .to_rgb8();

    let mut planner = RoutePlanner::new(&config);
    let targets = planner.extract_targets(&image);
    let field = planner.build_field(image);
    field.check_bounds(start)?;
    logger.info(&format!("{} targets after dedupe", targets.len()));

    let ordered = planner.order_targets(&field, start, &targets)?;
    let mut cursor = start;
    let mut total = 0u32;
    for (leg, target) in ordered.iter().enumerate() {
        let outcome = match planner.shortest_path(&field, cursor, *target) {
            Ok(outcome) => outcome,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping target {}: {}", target, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let waypoints = planner.plan_waypoints(&field, cursor, *target)?;
        total += outcome.total_cost();
        println!(
            "leg {}: {} -> {} cost {} cells {} waypoints {:?}",
            leg + 1,
            cursor,
            target,
            outcome.total_cost(),
            outcome.path.len(),
            waypoints
        );
        cursor = *target;
    }
    logger.info(&format!(
        "Route through {} targets planned, total cost {}",
        ordered.len(),
        total
    ));

    Ok(())
}
