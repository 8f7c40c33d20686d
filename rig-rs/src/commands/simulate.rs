//! Headless simulation

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rig_anim::{RigSnapshot, TickOutcome};

use super::info::archetype_names;
use super::load_registry;
use crate::cli::OutputFormat;

pub struct SimulateArgs {
    pub archetype: String,
    pub clip: String,
    pub frames: u32,
    pub dt: f32,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn execute(args: &SimulateArgs) -> Result<()> {
    if !args.dt.is_finite() || args.dt < 0.0 {
        bail!("--dt must be a non-negative number of seconds, got {}", args.dt);
    }

    let registry = load_registry(args.config.as_deref())?;
    let mut rig = registry
        .create_rig(&args.archetype)
        .with_context(|| format!("Available archetypes: {}", archetype_names(&registry)))?;

    rig.play(&args.clip).with_context(|| {
        let clips: Vec<&str> = rig.controller().library().names().collect();
        format!("Available clips: {}", clips.join(", "))
    })?;

    log::info!(
        "Simulating '{}' on '{}' for {} frame(s) at {}s",
        args.clip,
        args.archetype,
        args.frames,
        args.dt
    );

    match args.format {
        OutputFormat::Text => {
            println!(
                "{:>6}  {:<14}  {:>8}  {:>9}  outcome",
                "frame", "clip", "elapsed", "intensity"
            );
            for frame in 1..=args.frames {
                let outcome = rig.tick(args.dt);
                let controller = rig.controller();
                println!(
                    "{:>6}  {:<14}  {:>8.3}  {:>9.3}  {}",
                    frame,
                    controller.current_clip().unwrap_or("-"),
                    controller.elapsed(),
                    rig.effect_intensity(),
                    describe(&outcome)
                );
            }
        }
        OutputFormat::Json => {
            let frames: Vec<RigSnapshot> = (0..args.frames)
                .map(|_| {
                    rig.tick(args.dt);
                    rig.snapshot()
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&frames)?);
        }
    }

    Ok(())
}

fn describe(outcome: &TickOutcome) -> String {
    match outcome {
        TickOutcome::Stopped => "stopped".to_string(),
        TickOutcome::Advanced => "advanced".to_string(),
        TickOutcome::Looped => "looped".to_string(),
        TickOutcome::Completed { clip } => format!("completed {clip}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_completed() {
        let outcome = TickOutcome::Completed {
            clip: "block".to_string(),
        };
        assert_eq!(describe(&outcome), "completed block");
        assert_eq!(describe(&TickOutcome::Looped), "looped");
    }
}
