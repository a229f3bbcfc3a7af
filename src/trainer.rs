use std::process::Command;

use crate::config::LaunchConfig;
use crate::plan::TrainPlan;
use crate::util::TrainArgs;

/// Argument vector for the external trainer. Kept pure so tests can pin the
/// exact sequence; the order mirrors the trainer's documented contract and
/// must not change under existing run tooling.
pub fn train_args(cfg: &LaunchConfig, args: &TrainArgs, plan: &TrainPlan) -> Vec<String> {
    let pairs: Vec<(&str, String)> = vec![
        ("--model", plan.model.clone()),
        ("--data", plan.data_config.clone()),
        ("--epochs", args.epoch.to_string()),
        ("--warmup-epochs", args.warmup_epochs.to_string()),
        ("--lr0", args.lr0.to_string()),
        ("--optimizer", args.optimizer.clone()),
        ("--momentum", args.momentum.to_string()),
        ("--imgsz", args.image_size.to_string()),
        ("--mosaic", args.mosaic.to_string()),
        ("--hsv-h", args.hsv_h.to_string()),
        ("--hsv-s", args.hsv_s.to_string()),
        ("--hsv-v", args.hsv_v.to_string()),
        ("--degrees", args.degrees.to_string()),
        ("--translate", args.translate.to_string()),
        ("--scale", args.scale.to_string()),
        ("--shear", args.shear.to_string()),
        ("--perspective", args.perspective.to_string()),
        ("--flipud", args.flipud.to_string()),
        ("--fliplr", args.fliplr.to_string()),
        ("--bgr", args.bgr.to_string()),
        ("--mixup", args.mixup.to_string()),
        ("--copy-paste", args.copy_paste.to_string()),
        ("--auto-augment", args.auto_augment.clone()),
        ("--erasing", args.erasing.to_string()),
        ("--crop-fraction", args.crop_fraction.to_string()),
        ("--batch", args.batch_size.to_string()),
        ("--device", args.device.clone()),
        ("--workers", args.workers.to_string()),
        ("--plots", plan.plots.to_string()),
        // A run name collision must fail, never overwrite.
        ("--exist-ok", "false".to_string()),
        ("--val", plan.val.to_string()),
        ("--val-period", args.val_period.to_string()),
        ("--overlap-mask", args.overlap_mask.to_string()),
        ("--resume", args.resume.to_string()),
        ("--save-period", args.save_period.to_string()),
        ("--patience", args.patience.to_string()),
        ("--project", args.project.display().to_string()),
        ("--name", plan.run_name.clone()),
    ];

    let mut argv = Vec::with_capacity(pairs.len() * 2 + cfg.trainer_args.len());
    for (flag, value) in pairs {
        argv.push(flag.to_string());
        argv.push(value);
    }
    argv.extend(cfg.trainer_args.iter().cloned());
    argv
}

/// One-line rendering of the full invocation, for `--dry-run` output. Parts
/// containing whitespace are single-quoted so the printed line pastes back
/// into a shell unchanged.
pub fn command_line(cfg: &LaunchConfig, args: &TrainArgs, plan: &TrainPlan) -> String {
    let mut parts = vec![shell_quote(cfg.trainer_bin.display().to_string())];
    parts.extend(train_args(cfg, args, plan).into_iter().map(shell_quote));
    parts.join(" ")
}

fn shell_quote(part: String) -> String {
    if !part.is_empty() && !part.chars().any(char::is_whitespace) {
        return part;
    }
    format!("'{}'", part.replace('\'', r"'\''"))
}

/// Run the trainer to completion. Blocks for the whole training run; any
/// failure surfaces as an error carrying the child's exit status.
pub fn launch(cfg: &LaunchConfig, args: &TrainArgs, plan: &TrainPlan) -> anyhow::Result<()> {
    let mut cmd = Command::new(&cfg.trainer_bin);
    cmd.args(train_args(cfg, args, plan));
    if let Some(level) = &cfg.rust_log {
        cmd.env("RUST_LOG", level);
    }
    let status = cmd.status().map_err(|e| {
        anyhow::anyhow!(
            "failed to launch trainer {}: {e}",
            cfg.trainer_bin.display()
        )
    })?;
    if !status.success() {
        anyhow::bail!(
            "trainer {} exited with status {:?}",
            cfg.trainer_bin.display(),
            status
        );
    }
    Ok(())
}
