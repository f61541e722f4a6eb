use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio::time::{interval, MissedTickBehavior};

use dragscroll_core::{AppConfig, CoastTrace, Fling, PointerInput, Simulation, Velocity};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Coast from this horizontal velocity instead of playing a drag
    #[arg(long, requires = "vy", allow_hyphen_values = true)]
    vx: Option<f64>,
    /// Coast from this vertical velocity instead of playing a drag
    #[arg(long, requires = "vx", allow_hyphen_values = true)]
    vy: Option<f64>,

    /// Horizontal drag distance
    #[arg(long, default_value_t = -120.0, allow_hyphen_values = true)]
    dx: f64,
    /// Vertical drag distance
    #[arg(long, default_value_t = -200.0, allow_hyphen_values = true)]
    dy: f64,
    /// Drag duration in milliseconds
    #[arg(long, default_value_t = 100.0)]
    duration: f64,
    /// Move events spread over the drag
    #[arg(long, default_value_t = 6)]
    steps: u32,
    /// Treat the drag as touch input
    #[arg(long)]
    touch: bool,

    /// Frame interval in milliseconds (defaults to the configured frame rate)
    #[arg(long)]
    frame_ms: Option<f64>,
    /// Stop after this many frames
    #[arg(long, default_value_t = Simulation::DEFAULT_MAX_FRAMES)]
    max_frames: usize,
    /// Emit the trace as JSON
    #[arg(long)]
    json: bool,
    /// Print frames at the pace they would be displayed
    #[arg(long)]
    realtime: bool,
}

pub async fn run(config: &AppConfig, args: SimulateArgs) -> Result<()> {
    let frame_ms = args
        .frame_ms
        .unwrap_or(config.ui.frame_interval_ms() as f64);
    let simulation = Simulation::new(frame_ms).with_max_frames(args.max_frames);

    let trace = match (args.vx, args.vy) {
        (Some(vx), Some(vy)) => simulation.coast(
            config.drag.inertia_config(),
            Velocity::new(vx, vy),
            (0.0, 0.0),
        ),
        _ => {
            let fling = Fling {
                input: if args.touch {
                    PointerInput::Touch
                } else {
                    PointerInput::Mouse
                },
                dx: args.dx,
                dy: args.dy,
                duration_ms: args.duration,
                steps: args.steps,
            };
            if !config.drag.inertia {
                tracing::warn!("Inertia is disabled; pass --inertia to coast after release");
            }
            simulation.fling(config.drag, fling)
        }
    };

    if args.json {
        println!("{}", trace.to_json()?);
        return Ok(());
    }

    print_table(&trace, args.realtime.then_some(simulation.frame_interval_ms())).await;
    Ok(())
}

async fn print_table(trace: &CoastTrace, pace_ms: Option<f64>) {
    println!(
        "release velocity: {:.2}, {:.2}",
        trace.initial_velocity.x, trace.initial_velocity.y
    );
    println!("{:>10} {:>10} {:>10} {:>10} {:>10}", "t_ms", "vx", "vy", "left", "top");

    let mut ticker = pace_ms.map(|ms| {
        let mut ticker = interval(Duration::from_secs_f64(ms / 1000.0));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    for sample in &trace.samples {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        println!(
            "{:>10.1} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            sample.t_ms, sample.velocity.x, sample.velocity.y, sample.scroll_left, sample.scroll_top
        );
    }

    let status = if trace.settled { "settled" } else { "frame cap reached" };
    println!(
        "{} frames over {:.0} ms ({})",
        trace.samples.len(),
        trace.duration_ms(),
        status
    );
}
